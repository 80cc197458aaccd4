use actix_web::{web, HttpResponse};
use validator::Validate;

use onboard_core::errors::DomainError;
use onboard_core::repositories::CustomerRepository;
use onboard_core::services::{Clock, OtpDelivery, VerifyOutcome};
use onboard_shared::validation::normalize_email;

use crate::dto::auth::VerifyEmailRequest;
use crate::dto::MessageResponse;
use crate::handlers::error::{handle_domain_error, validation_error, Operation};
use crate::middleware::auth::AuthContext;

use super::AppState;

/// Handler for POST /auth/verify-email
///
/// Requires the bearer token returned at registration. The token must have
/// been issued for the email in the body.
///
/// # Request Body
///
/// ```json
/// { "email": "ada@example.com", "otp": "482913" }
/// ```
///
/// `otp` may also be sent as a JSON number.
///
/// # Response
///
/// ## Success (200 OK)
/// - `{ "message": "Email verified successfully" }`
/// - `{ "message": "Email already verified" }` when it was verified before
///
/// ## Errors
/// - 400 Bad Request: "Invalid OTP"
/// - 401 Unauthorized: missing or invalid bearer token
/// - 403 Forbidden: token belongs to a different email
/// - 404 Not Found: "Customer not found"
/// - 409 Conflict: already verified and resubmission is rejected
/// - 500 Internal Server Error: "Error verifying email"
pub async fn verify_email<R, D, K>(
    auth: AuthContext,
    state: web::Data<AppState<R, D, K>>,
    request: web::Json<VerifyEmailRequest>,
) -> HttpResponse
where
    R: CustomerRepository + 'static,
    D: OtpDelivery + 'static,
    K: Clock + 'static,
{
    if let Err(errors) = request.validate() {
        return validation_error(&errors);
    }

    if normalize_email(&auth.email) != normalize_email(&request.email) {
        tracing::warn!(
            customer_id = %auth.customer_id,
            event = "verify_email_token_mismatch",
            "Bearer token issued for a different email"
        );
        return handle_domain_error(
            DomainError::Forbidden {
                message: "Token does not match this email".to_string(),
            },
            Operation::VerifyEmail,
        );
    }

    match state.otp_service.verify(&request.email, &request.otp).await {
        Ok(VerifyOutcome::Verified) => {
            HttpResponse::Ok().json(MessageResponse::new("Email verified successfully"))
        }
        Ok(VerifyOutcome::AlreadyVerified) => {
            HttpResponse::Ok().json(MessageResponse::new("Email already verified"))
        }
        Err(error) => handle_domain_error(error, Operation::VerifyEmail),
    }
}
