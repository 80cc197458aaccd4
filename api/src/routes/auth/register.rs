use actix_web::{web, HttpResponse};
use validator::Validate;

use onboard_core::repositories::CustomerRepository;
use onboard_core::services::{Clock, OtpDelivery};

use crate::dto::auth::{RegisterRequest, RegisterResponse};
use crate::handlers::error::{handle_domain_error, validation_error, Operation};

use super::AppState;

/// Handler for POST /auth/register
///
/// Creates the customer, sends the first OTP to their email and returns a
/// bearer token for the verification call.
///
/// # Request Body
///
/// ```json
/// {
///     "f_name": "Ada",
///     "l_name": "Lovelace",
///     "email": "ada@example.com",
///     "password": "s3cret-pass",
///     "phone_no": "1234567890",
///     "address": "London"
/// }
/// ```
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// { "message": "Customer registered successfully", "customerId": "...", "token": "..." }
/// ```
///
/// ## Errors
/// - 400 Bad Request: validation failure or "Customer already exists"
/// - 500 Internal Server Error: "Error registering customer"
pub async fn register<R, D, K>(
    state: web::Data<AppState<R, D, K>>,
    request: web::Json<RegisterRequest>,
) -> HttpResponse
where
    R: CustomerRepository + 'static,
    D: OtpDelivery + 'static,
    K: Clock + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    match state.customer_service.register(request.into_inner().into()).await {
        Ok(registered) => HttpResponse::Created().json(RegisterResponse {
            message: "Customer registered successfully".to_string(),
            customer_id: registered.customer.id,
            token: registered.token,
        }),
        Err(error) => handle_domain_error(error, Operation::Register),
    }
}
