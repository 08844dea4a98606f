use actix_web::{web, HttpResponse};

use crate::services::account_service::{self, LoginRequest, LoginResponse, SignupRequest, SignupResponse};
use crate::{database::MongoDB, utils::error::AppError};

#[utoipa::path(
    post,
    path = "/signup",
    tag = "Auth",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "Signup successful", body = SignupResponse),
        (status = 400, description = "Missing fields or user already exists"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn signup(
    db: web::Data<MongoDB>,
    request: web::Json<SignupRequest>,
) -> HttpResponse {
    log::info!("📝 POST /signup - email: {}", request.email);

    match account_service::signup(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Signup successful: {}", request.email);
            HttpResponse::Ok().json(response)
        }
        Err(AppError::ConflictError(msg)) => {
            log::warn!("❌ Signup rejected: {} - {}", request.email, msg);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": msg
            }))
        }
        Err(AppError::ValidationError(msg)) => {
            log::warn!("❌ Signup rejected: {} - {}", request.email, msg);
            HttpResponse::BadRequest().json(serde_json::json!({
                "success": false,
                "message": msg
            }))
        }
        Err(e) => {
            log::error!("❌ Signup failed: {} - {}", request.email, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Signup failed"
            }))
        }
    }
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "Auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Database failure")
    )
)]
pub async fn login(
    db: web::Data<MongoDB>,
    request: web::Json<LoginRequest>,
) -> HttpResponse {
    log::info!("🔐 POST /login - email: {}", request.email);

    match account_service::login(&db, &request).await {
        Ok(response) => {
            log::info!("✅ Login successful: {}", request.email);
            HttpResponse::Ok().json(response)
        }
        Err(AppError::AuthError(msg)) => {
            log::warn!("❌ Login failed: {} - {}", request.email, msg);
            HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "message": msg
            }))
        }
        Err(e) => {
            log::error!("❌ Login failed: {} - {}", request.email, e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Login failed"
            }))
        }
    }
}
