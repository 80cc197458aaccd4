//! Application state and factory
//!
//! This module wires the route table and provides the factory for creating
//! the Actix-web application. Logging and CORS middleware are added by the
//! caller so tests can drive the bare application.

use actix_web::{
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{InternalError, JsonPayloadError, QueryPayloadError},
    web, App, HttpRequest, HttpResponse,
};

use onboard_core::repositories::{CustomerRepository, DocumentRepository};
use onboard_core::services::{BlobStore, Clock, DocumentService, OtpDelivery, TokenService};

use crate::dto::ErrorResponse;
use crate::middleware::auth::JwtAuth;
use crate::routes::auth::{
    login::login,
    register::register,
    resend_otp::{json_config as resend_json_config, resend_otp},
    verify_email::verify_email,
    AppState,
};
use crate::routes::documents::{list::list_documents, upload::upload_document};
use crate::routes::health::health_check;

/// Register the API routes for the given service types
///
/// `R` is the customer repository shared by every service, `DR` the
/// document repository and `B` the document blob store.
pub fn configure<R, D, K, DR, B>(cfg: &mut web::ServiceConfig)
where
    R: CustomerRepository + 'static,
    D: OtpDelivery + 'static,
    K: Clock + 'static,
    DR: DocumentRepository + 'static,
    B: BlobStore + 'static,
{
    cfg.route("/health", web::get().to(health_check))
        .service(
            web::scope("/auth")
                .route("/register", web::post().to(register::<R, D, K>))
                .route("/login", web::post().to(login::<R, D, K>))
                .service(
                    web::resource("/verify-email")
                        .wrap(JwtAuth::new())
                        .route(web::post().to(verify_email::<R, D, K>)),
                )
                .service(
                    web::resource("/resend-otp")
                        .app_data(resend_json_config())
                        .route(web::post().to(resend_otp::<R, D, K>)),
                ),
        )
        .service(
            web::scope("/documents")
                .wrap(JwtAuth::new())
                .route("", web::get().to(list_documents::<R, DR, B, K>))
                .route("/upload", web::post().to(upload_document::<R, DR, B, K>)),
        );
}

/// Create and configure the application with all dependencies
pub fn create_app<R, D, K, DR, B>(
    app_state: web::Data<AppState<R, D, K>>,
    document_service: web::Data<DocumentService<R, DR, B, K>>,
    token_service: web::Data<TokenService>,
    max_payload_size: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    R: CustomerRepository + 'static,
    D: OtpDelivery + 'static,
    K: Clock + 'static,
    DR: DocumentRepository + 'static,
    B: BlobStore + 'static,
{
    App::new()
        .app_data(app_state)
        .app_data(document_service)
        .app_data(token_service)
        .app_data(json_config(max_payload_size))
        .app_data(query_config())
        .configure(configure::<R, D, K, DR, B>)
        .default_service(web::route().to(not_found))
}

/// Default JSON extraction config: malformed bodies become a 400 error body
pub fn json_config(max_payload_size: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new("VALIDATION_ERROR", "Invalid request data")
            .with_detail("reason", serde_json::json!(err.to_string())),
    );
    InternalError::from_response(err, response).into()
}

/// Query string extraction config: unparsable parameters become a 400 error body
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = HttpResponse::BadRequest().json(
        ErrorResponse::new("VALIDATION_ERROR", "Invalid query parameters")
            .with_detail("reason", serde_json::json!(err.to_string())),
    );
    InternalError::from_response(err, response).into()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "NOT_FOUND",
        "The requested resource was not found",
    ))
}
