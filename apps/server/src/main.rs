//! Test Review Hub server - main entry point.
//!
//! Starts the Actix-web server with configured routes and middleware.

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, http::header, web};
use chrono::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use test_review_hub_lib::api::{self, ApiDoc, UploadLimit};
use test_review_hub_lib::auth::{IdentityVerifier, JwtVerifier, TokenIssuer};
use test_review_hub_lib::config::Config;
use test_review_hub_lib::db::DbPool;
use test_review_hub_lib::middleware::RequestLogger;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        std::process::exit(1);
    }

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            error!("Please check your environment variables:");
            error!("  - RUST_ENV must be set to 'development' or 'production'");
            error!("  - In production, DATABASE_URL and TRH_JWT_SECRET must be set");
            std::process::exit(1);
        }
    };

    info!("========================================");
    info!("  Test Review Hub");
    info!("  Environment: {}", config.environment);
    info!("========================================");

    if config.is_development() {
        warn!("Running in DEVELOPMENT mode - do not use in production!");
    }

    let pool = match DbPool::new(&config).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        error!("{}", e);
        std::process::exit(1);
    }
    info!("Database migrations complete");

    let bind_address = config.bind_address();
    let is_development = config.is_development();
    let upload_limit = UploadLimit(config.max_upload_size);
    let jwt = JwtVerifier::new(config.jwt_secret.clone());
    let issuer = TokenIssuer::new(jwt.clone(), Duration::hours(config.token_ttl_hours));
    let verifier: Arc<dyn IdentityVerifier> = Arc::new(jwt);

    info!("Upload limit: {}MB", config.max_upload_size / 1024 / 1024);

    let worker_count = if is_development {
        4
    } else {
        num_cpus::get()
    };
    info!(
        "Starting server at http://{} ({} workers)",
        bind_address, worker_count
    );

    let server = HttpServer::new(move || {
        let cors = if is_development {
            Cors::default()
                .allowed_origin("http://localhost:3000")
                .allowed_origin("http://127.0.0.1:3000")
        } else {
            // Same-origin only
            Cors::default()
        }
        .allowed_methods(vec!["GET", "POST", "DELETE", "OPTIONS"])
        .allowed_headers(vec![header::AUTHORIZATION, header::ACCEPT, header::CONTENT_TYPE])
        .expose_headers(vec![api::DEGRADED_HEADER])
        .max_age(3600);

        App::new()
            .wrap(cors)
            .wrap(RequestLogger)
            .app_data(web::Data::new(pool.clone()))
            .app_data(web::Data::from(verifier.clone()))
            .app_data(web::Data::new(issuer.clone()))
            .app_data(web::Data::new(upload_limit))
            .app_data(web::PayloadConfig::new(upload_limit.0))
            .app_data(api::json_config().limit(upload_limit.0))
            .service(web::scope("/api/v1").configure(api::configure_routes))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    });

    server.workers(worker_count).bind(&bind_address)?.run().await
}
