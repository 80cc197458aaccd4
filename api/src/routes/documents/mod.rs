//! Identity document route handlers
//!
//! Both routes sit behind the JWT middleware. A customer may only touch
//! their own documents.

pub mod list;
pub mod upload;

use actix_web::HttpResponse;
use uuid::Uuid;

use onboard_core::errors::DomainError;

use crate::handlers::error::{handle_domain_error, Operation};
use crate::middleware::auth::AuthContext;

/// Resolve the customer a document request acts on
fn resolve_owner(
    auth: &AuthContext,
    requested: Option<Uuid>,
    operation: Operation,
) -> Result<Uuid, HttpResponse> {
    match requested {
        Some(id) if id != auth.customer_id => {
            tracing::warn!(
                customer_id = %auth.customer_id,
                requested = %id,
                event = "document_access_denied",
                "Token holder asked for another customer's documents"
            );
            Err(handle_domain_error(
                DomainError::Forbidden {
                    message: "Cannot access another customer's documents".to_string(),
                },
                operation,
            ))
        }
        _ => Ok(auth.customer_id),
    }
}
