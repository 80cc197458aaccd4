use actix_web::{error::JsonPayloadError, error::InternalError, web, HttpRequest, HttpResponse};

use onboard_core::repositories::CustomerRepository;
use onboard_core::services::{Clock, OtpDelivery};

use crate::dto::auth::ResendOtpRequest;
use crate::dto::MessageResponse;
use crate::handlers::error::{handle_domain_error, server_error, Operation};

use super::AppState;

/// Handler for POST /auth/resend-otp
///
/// Replaces the outstanding OTP once the resend window has passed since the
/// previous one was issued.
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// `{ "message": "New OTP sent successfully" }`
///
/// ## Errors
/// - 400 Bad Request: "Please wait before requesting a new OTP."
/// - 404 Not Found: "Customer not found"
/// - 500 Internal Server Error: "Error resending OTP" for a missing, null or
///   malformed email and any unexpected failure
pub async fn resend_otp<R, D, K>(
    state: web::Data<AppState<R, D, K>>,
    request: web::Json<ResendOtpRequest>,
) -> HttpResponse
where
    R: CustomerRepository + 'static,
    D: OtpDelivery + 'static,
    K: Clock + 'static,
{
    match state
        .otp_service
        .request_resend(request.email.as_deref())
        .await
    {
        Ok(_) => HttpResponse::Ok().json(MessageResponse::new("New OTP sent successfully")),
        Err(error) => handle_domain_error(error, Operation::ResendOtp),
    }
}

/// Body extraction config for this route: an unreadable body is reported
/// the same way as a null email.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, event = "resend_otp_bad_body", "Unreadable resend-otp body");
    InternalError::from_response(err, server_error(Operation::ResendOtp)).into()
}
