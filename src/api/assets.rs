use actix_web::{web, HttpRequest, HttpResponse};
use std::path::Path;

use crate::config::AppConfig;
use crate::storage::BlobStorage;

fn get_mime_type(path: &str) -> &'static str {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    match ext {
        "html" => "text/html; charset=utf-8",
        "js" => "application/javascript; charset=utf-8",
        "css" => "text/css; charset=utf-8",
        "json" => "application/json; charset=utf-8",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        "woff" => "font/woff",
        "woff2" => "font/woff2",
        "ttf" => "font/ttf",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

/// Hashed build artifacts can be cached hard; everything else revalidates.
fn should_cache(path: &str) -> bool {
    let ext = Path::new(path)
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("");

    matches!(
        ext,
        "js" | "css" | "woff" | "woff2" | "ttf" | "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp"
    )
}

/// GET /uploads/{filename}: serves an uploaded blob by its stored name.
#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "Uploads",
    params(
        ("filename" = String, Path, description = "Stored blob name, as referenced by frontFile/tocFile")
    ),
    responses(
        (status = 200, description = "Blob bytes"),
        (status = 404, description = "No such blob")
    )
)]
pub async fn serve_blob(
    storage: web::Data<BlobStorage>,
    filename: web::Path<String>,
) -> HttpResponse {
    let name = filename.into_inner();

    match storage.read(&name) {
        Some(data) => HttpResponse::Ok()
            .content_type(get_mime_type(&name))
            .body(data),
        None => {
            log::warn!("❌ Blob not found: {}", name);
            HttpResponse::NotFound().json(serde_json::json!({
                "success": false,
                "message": "File not found"
            }))
        }
    }
}

fn read_public(config: &AppConfig, path: &str) -> Option<Vec<u8>> {
    if path.contains("..") {
        return None;
    }
    std::fs::read(config.public_dir.join(path)).ok()
}

/// Catch-all GET handler: public asset folder with SPA fallback to
/// index.html when the fallback flag is on.
pub async fn serve_public(config: web::Data<AppConfig>, req: HttpRequest) -> HttpResponse {
    let tail = req.match_info().query("tail").trim_start_matches('/');

    let (content, file_path) = if tail.is_empty() {
        (read_public(&config, "index.html"), "index.html")
    } else if let Some(content) = read_public(&config, tail) {
        (Some(content), tail)
    } else if config.spa_fallback {
        (read_public(&config, "index.html"), "index.html")
    } else {
        (None, tail)
    };

    match content {
        Some(data) => {
            let mut response = HttpResponse::Ok();
            response.content_type(get_mime_type(file_path));

            if should_cache(file_path) {
                response.insert_header(("Cache-Control", "public, max-age=31536000, immutable"));
            } else {
                response.insert_header(("Cache-Control", "no-cache"));
            }

            response.body(data)
        }
        None => HttpResponse::NotFound().finish(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_mime_type() {
        assert_eq!(get_mime_type("index.html"), "text/html; charset=utf-8");
        assert_eq!(get_mime_type("app.js"), "application/javascript; charset=utf-8");
        assert_eq!(get_mime_type("style.css"), "text/css; charset=utf-8");
        assert_eq!(get_mime_type("1700000000123_notes.pdf"), "application/pdf");
        assert_eq!(get_mime_type("unknown.xyz"), "application/octet-stream");
        assert_eq!(get_mime_type("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_should_cache() {
        assert!(should_cache("app.js"));
        assert!(should_cache("logo.png"));
        assert!(!should_cache("index.html"));
        assert!(!should_cache("manifest.json"));
    }
}
