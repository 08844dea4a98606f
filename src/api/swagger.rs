use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "NoteShare Service API",
        version = "1.0.0",
        description = "Document-sharing backend for academic notes. Lenders upload a front page (plus optional table of contents) tagged with branch/semester/subject; borrowers list everything that was shared.\n\n**Note:** no route requires authentication."
    ),
    paths(
        // Auth
        crate::api::auth::signup,
        crate::api::auth::login,

        // Uploads
        crate::api::uploads::create_upload,
        crate::api::uploads::list_uploads,
        crate::api::assets::serve_blob,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::services::account_service::SignupRequest,
            crate::services::account_service::LoginRequest,
            crate::services::account_service::SignupResponse,
            crate::services::account_service::LoginResponse,
            crate::services::listing_service::UploadResponse,
            crate::models::User,
            crate::models::Upload,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Auth", description = "Signup and login. Credentials are matched by plain field equality against the document store."),
        (name = "Uploads", description = "Lender upload submission, borrower listing, and stored blob retrieval."),
        (name = "Health", description = "Health check endpoint for monitoring service status."),
    )
)]
pub struct ApiDoc;
