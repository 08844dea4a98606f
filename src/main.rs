mod api;
mod config;
mod database;
mod models;
mod services;
mod storage;
mod utils;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use config::AppConfig;
use storage::BlobStorage;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let config = AppConfig::from_env();

    log::info!("🚀 Starting NoteShare Service...");
    log::info!("📊 Database: {}", config.mongodb_uri);

    // Initialize MongoDB connection
    let db = database::MongoDB::new(&config.mongodb_uri)
        .await
        .expect("Failed to connect to MongoDB");

    log::info!("✅ MongoDB connected successfully");

    // Blob Storage directory, created if absent
    let storage = BlobStorage::new(&config.upload_dir);
    storage.init().expect("Failed to create upload directory");

    log::info!("📁 Blob storage ready at {}", config.upload_dir.display());

    let bind_addr = config.bind_addr();
    log::info!("🌐 Server starting on {}", bind_addr);
    log::info!("📚 Swagger UI available at: http://{}/swagger-ui/", bind_addr);

    let db_data = web::Data::new(db);
    let storage_data = web::Data::new(storage);
    let config_data = web::Data::new(config);

    // Start HTTP server
    HttpServer::new(move || {
        // CORS is wide open; every route is public
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        let mut app = App::new()
            .app_data(db_data.clone())
            .app_data(storage_data.clone())
            .app_data(config_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Account endpoints
            .route("/signup", web::post().to(api::auth::signup))
            .route("/login", web::post().to(api::auth::login))
            // Lender upload submission
            .route("/api/uploads", web::post().to(api::uploads::create_upload))
            // Borrower listing + stored blob retrieval
            .route("/uploads", web::get().to(api::uploads::list_uploads))
            .route("/uploads/{filename}", web::get().to(api::assets::serve_blob));

        if config_data.all_uploads_route {
            app = app.route("/api/all-uploads", web::get().to(api::uploads::list_uploads));
        }

        // Catch-all must stay last: public assets with SPA fallback
        app.route("/{tail:.*}", web::get().to(api::assets::serve_public))
    })
    .bind(bind_addr.as_str())?
    .run()
    .await
}
