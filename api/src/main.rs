use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use onboard_api::app::create_app;
use onboard_api::middleware::cors::create_cors;
use onboard_api::routes::AppState;
use onboard_api::telemetry::init_tracing;
use onboard_core::services::{
    CustomerService, CustomerServiceConfig, DocumentService, DocumentServiceConfig,
    OtpLifecycleConfig, OtpLifecycleService, SystemClock, TokenService, TokenServiceConfig,
};
use onboard_infra::database::{DatabasePool, MySqlCustomerRepository, MySqlDocumentRepository};
use onboard_infra::email::create_email_service;
use onboard_infra::storage::LocalBlobStore;
use onboard_shared::config::{AppConfig, Environment};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let environment = Environment::from_env();
    dotenvy::from_filename(environment.env_file())
        .or_else(|_| dotenvy::dotenv())
        .ok();

    let config = AppConfig::load_for(environment).context("failed to load configuration")?;
    init_tracing(&config.logging)?;

    tracing::info!(
        environment = %config.environment,
        version = env!("CARGO_PKG_VERSION"),
        "Starting Onboard API server"
    );

    let db_pool = DatabasePool::new(config.database.clone())
        .await
        .context("failed to connect to the database")?;
    if config.database.run_migrations {
        db_pool
            .run_migrations()
            .await
            .context("failed to run database migrations")?;
    }
    tracing::info!(pool = %db_pool.statistics(), "Database ready");

    let repository = Arc::new(MySqlCustomerRepository::new(db_pool.get_pool().clone()));
    let email_service = Arc::new(create_email_service(&config.email));
    let clock = Arc::new(SystemClock);
    tracing::info!(provider = email_service.provider_name(), "Email delivery configured");

    let token_service = Arc::new(TokenService::new(TokenServiceConfig::from(&config.jwt)));
    let otp_service = Arc::new(OtpLifecycleService::new(
        repository.clone(),
        email_service,
        clock.clone(),
        OtpLifecycleConfig::from(&config.otp),
    ));
    let customer_service = Arc::new(CustomerService::new(
        repository.clone(),
        otp_service.clone(),
        token_service.clone(),
        clock.clone(),
        CustomerServiceConfig {
            bcrypt_cost: config.jwt.bcrypt_cost,
            ..CustomerServiceConfig::default()
        },
    ));

    let blob_store = LocalBlobStore::new(&config.documents.storage_dir)
        .await
        .context("failed to prepare document storage")?;
    tracing::info!(root = %blob_store.root().display(), "Document storage ready");
    let document_service = web::Data::new(DocumentService::new(
        repository,
        Arc::new(MySqlDocumentRepository::new(db_pool.get_pool().clone())),
        Arc::new(blob_store),
        clock,
        DocumentServiceConfig::from(&config.documents),
    ));

    let app_state = web::Data::new(AppState::new(customer_service, otp_service));
    let token_data = web::Data::from(token_service);
    let pool_data = web::Data::new(db_pool.clone());
    let server_config = config.server.clone();

    let bind_address = server_config.bind_address();
    tracing::info!(address = %bind_address, "Server will bind");

    let mut server = HttpServer::new(move || {
        create_app(
            app_state.clone(),
            document_service.clone(),
            token_data.clone(),
            server_config.max_payload_size,
        )
        .app_data(pool_data.clone())
        .wrap(create_cors(&server_config.cors))
        .wrap(TracingLogger::default())
    })
    .keep_alive(Duration::from_secs(config.server.keep_alive));

    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    server.bind(&bind_address)?.run().await?;

    db_pool.close().await;
    tracing::info!("Server stopped");
    Ok(())
}
