use actix_web::{web, HttpResponse};
use validator::Validate;

use onboard_core::repositories::CustomerRepository;
use onboard_core::services::{Clock, OtpDelivery};

use crate::dto::auth::{LoginRequest, LoginResponse};
use crate::handlers::error::{handle_domain_error, validation_error, Operation};

use super::AppState;

/// Handler for POST /auth/login
///
/// ## Errors
/// - 400 Bad Request: "Invalid email or password"
/// - 403 Forbidden: email not verified yet
pub async fn login<R, D, K>(
    state: web::Data<AppState<R, D, K>>,
    request: web::Json<LoginRequest>,
) -> HttpResponse
where
    R: CustomerRepository + 'static,
    D: OtpDelivery + 'static,
    K: Clock + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state
        .customer_service
        .login(&request.email, &request.password)
        .await
    {
        Ok(result) => HttpResponse::Ok().json(LoginResponse {
            message: "Login successful".to_string(),
            token: result.token,
            customer_id: result.customer.id,
        }),
        Err(error) => handle_domain_error(error, Operation::Login),
    }
}
