use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};

use crate::config::{AppConfig, MAX_FILE_SIZE};
use crate::database::MongoDB;
use crate::models::Upload;
use crate::services::listing_service::{self, UploadResponse};
use crate::storage::multipart::{read_upload_form, UploadFormError};
use crate::storage::BlobStorage;

#[utoipa::path(
    post,
    path = "/api/uploads",
    tag = "Uploads",
    responses(
        (status = 200, description = "Upload successful", body = UploadResponse),
        (status = 400, description = "Missing fields"),
        (status = 413, description = "A file exceeds the 5 MiB limit"),
        (status = 500, description = "Database or filesystem failure")
    )
)]
pub async fn create_upload(
    db: web::Data<MongoDB>,
    config: web::Data<AppConfig>,
    storage: web::Data<BlobStorage>,
    payload: Multipart,
) -> HttpResponse {
    log::info!("📤 POST /api/uploads");

    // Files land on disk while the form is parsed; a failure after this
    // point leaves them behind. There is no cleanup pass.
    let form = match read_upload_form(payload, &storage, MAX_FILE_SIZE).await {
        Ok(form) => form,
        Err(e @ UploadFormError::FileTooLarge(_)) => {
            log::warn!("❌ Upload rejected: {}", e);
            return HttpResponse::PayloadTooLarge().json(serde_json::json!({
                "success": false,
                "message": e.to_string()
            }));
        }
        Err(e @ UploadFormError::DuplicateFile(_)) => {
            log::warn!("❌ Upload rejected: {}", e);
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": e.to_string()
            }));
        }
        Err(e) => {
            log::error!("❌ Upload failed: {}", e);
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Upload failed"
            }));
        }
    };

    if config.strict_upload_validation {
        let meta = &form.meta;
        let missing_field = [&meta.email, &meta.branch, &meta.sem, &meta.subject, &meta.kind]
            .iter()
            .any(|field| field.as_deref().map_or(true, |v| v.trim().is_empty()));

        if missing_field {
            log::warn!("❌ Upload rejected: missing metadata fields");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": "Missing fields"
            }));
        }

        if form.front_file.is_none() {
            log::warn!("❌ Upload rejected: missing front page file");
            return HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": "Missing front file"
            }));
        }
    }

    let upload = Upload::new(form.meta, form.front_file, form.toc_file);

    match listing_service::create_upload(&db, upload).await {
        Ok(response) => {
            log::info!("✅ Upload stored");
            HttpResponse::Ok().json(response)
        }
        Err(e) => {
            log::error!("❌ Upload failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Upload failed"
            }))
        }
    }
}

#[utoipa::path(
    get,
    path = "/uploads",
    tag = "Uploads",
    responses(
        (status = 200, description = "Every upload record", body = [Upload]),
        (status = 500, description = "Database failure")
    )
)]
pub async fn list_uploads(db: web::Data<MongoDB>) -> HttpResponse {
    log::info!("📚 GET /uploads");

    match listing_service::list_uploads(&db).await {
        Ok(uploads) => HttpResponse::Ok().json(uploads),
        Err(e) => {
            log::error!("❌ Failed to fetch uploads: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Failed to fetch uploads"
            }))
        }
    }
}
