use std::env;
use std::path::PathBuf;

/// Per-file upload cap: 5 MiB.
pub const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Runtime configuration, read once at startup and shared via `web::Data`.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: String,
    pub mongodb_uri: String,
    /// Blob Storage directory, created on startup if absent.
    pub upload_dir: PathBuf,
    /// Static asset folder served on the catch-all route.
    pub public_dir: PathBuf,
    /// Require branch/sem/subject/type/email and the frontFile part on upload.
    pub strict_upload_validation: bool,
    /// Also register GET /api/all-uploads as an alias of GET /uploads.
    pub all_uploads_route: bool,
    /// Unknown GET paths fall back to public/index.html.
    pub spa_fallback: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT").unwrap_or_else(|_| "5000".to_string()),
            mongodb_uri: env::var("MONGODB_URI")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            upload_dir: env::var("UPLOAD_DIR")
                .unwrap_or_else(|_| "uploads".to_string())
                .into(),
            public_dir: env::var("PUBLIC_DIR")
                .unwrap_or_else(|_| "public".to_string())
                .into(),
            strict_upload_validation: parse_flag(
                env::var("STRICT_UPLOAD_VALIDATION").ok().as_deref(),
                true,
            ),
            all_uploads_route: parse_flag(env::var("ALL_UPLOADS_ROUTE").ok().as_deref(), true),
            spa_fallback: parse_flag(env::var("SPA_FALLBACK").ok().as_deref(), true),
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_flag(value: Option<&str>, default: bool) -> bool {
    match value {
        Some(v) => !matches!(v.trim().to_ascii_lowercase().as_str(), "0" | "false" | "off" | "no"),
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag(None, true));
        assert!(!parse_flag(None, false));
        assert!(parse_flag(Some("1"), false));
        assert!(parse_flag(Some("true"), false));
        assert!(!parse_flag(Some("0"), true));
        assert!(!parse_flag(Some("false"), true));
        assert!(!parse_flag(Some("OFF"), true));
        assert!(!parse_flag(Some(" no "), true));
    }
}
