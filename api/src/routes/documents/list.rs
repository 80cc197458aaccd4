use actix_web::{web, HttpResponse};

use onboard_core::repositories::{CustomerRepository, DocumentRepository};
use onboard_core::services::{BlobStore, Clock, DocumentService};

use crate::dto::{DocumentListResponse, DocumentQuery};
use crate::handlers::error::{handle_domain_error, Operation};
use crate::middleware::auth::AuthContext;

use super::resolve_owner;

/// Handler for GET /documents?customerId=
///
/// Lists the caller's documents, newest first.
pub async fn list_documents<C, R, B, K>(
    auth: AuthContext,
    query: web::Query<DocumentQuery>,
    service: web::Data<DocumentService<C, R, B, K>>,
) -> HttpResponse
where
    C: CustomerRepository + 'static,
    R: DocumentRepository + 'static,
    B: BlobStore + 'static,
    K: Clock + 'static,
{
    let customer_id = match resolve_owner(&auth, query.customer_id, Operation::ListDocuments) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match service.list_for_customer(customer_id).await {
        Ok(documents) => HttpResponse::Ok().json(DocumentListResponse {
            documents: documents.into_iter().map(Into::into).collect(),
        }),
        Err(error) => handle_domain_error(error, Operation::ListDocuments),
    }
}
