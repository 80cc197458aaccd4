use actix_multipart::{Multipart, MultipartError};
use actix_web::{http::header::CONTENT_TYPE, web, HttpRequest, HttpResponse};
use futures_util::TryStreamExt;

use onboard_core::repositories::{CustomerRepository, DocumentRepository};
use onboard_core::services::{BlobStore, Clock, DocumentService, UploadedFile};

use crate::dto::{DocumentQuery, DocumentUploadResponse, ErrorResponse};
use crate::handlers::error::{handle_domain_error, Operation};
use crate::middleware::auth::AuthContext;

use super::resolve_owner;

/// Multipart field that carries the file
pub const DOCUMENT_FIELD: &str = "document";

/// Handler for POST /documents/upload?customerId=
///
/// Accepts a `multipart/form-data` body with the file in the `document`
/// field. The file is checked against the format its extension claims and
/// stored either way; the response reports the outcome.
///
/// # Response
///
/// ## Success (201 Created)
/// ```json
/// {
///   "message": "Document uploaded successfully",
///   "documentId": "<uuid>",
///   "verificationStatus": "verified"
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: "No file uploaded", unsupported type or a broken body
/// - 401 Unauthorized: missing or invalid bearer token
/// - 403 Forbidden: `customerId` is not the token's customer
/// - 404 Not Found: "Customer not found"
/// - 413 Payload Too Large: file over the configured limit
/// - 500 Internal Server Error: "Error uploading document"
pub async fn upload_document<C, R, B, K>(
    auth: AuthContext,
    query: web::Query<DocumentQuery>,
    service: web::Data<DocumentService<C, R, B, K>>,
    req: HttpRequest,
    payload: Multipart,
) -> HttpResponse
where
    C: CustomerRepository + 'static,
    R: DocumentRepository + 'static,
    B: BlobStore + 'static,
    K: Clock + 'static,
{
    let customer_id = match resolve_owner(&auth, query.customer_id, Operation::UploadDocument) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let file = if is_multipart(&req) {
        match read_document_field(payload, service.config().max_file_size_bytes).await {
            Ok(file) => file,
            Err(error) => {
                tracing::warn!(error = %error, event = "document_bad_body", "Unreadable multipart body");
                return HttpResponse::BadRequest().json(ErrorResponse::new(
                    "INVALID_MULTIPART",
                    "Invalid multipart data",
                ));
            }
        }
    } else {
        None
    };

    match service.upload(customer_id, file).await {
        Ok(document) => HttpResponse::Created().json(DocumentUploadResponse {
            message: "Document uploaded successfully".to_string(),
            document_id: document.id,
            verification_status: document.verification_status,
        }),
        Err(error) => handle_domain_error(error, Operation::UploadDocument),
    }
}

fn is_multipart(req: &HttpRequest) -> bool {
    req.headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.to_ascii_lowercase().starts_with("multipart/form-data"))
        .unwrap_or(false)
}

/// Pull the `document` field out of the body. Reading stops one byte past
/// `limit` so an oversized file is reported without buffering all of it.
async fn read_document_field(
    mut payload: Multipart,
    limit: usize,
) -> Result<Option<UploadedFile>, MultipartError> {
    while let Some(mut field) = payload.try_next().await? {
        let disposition = field.content_disposition();
        if disposition.get_name() != Some(DOCUMENT_FIELD) {
            continue;
        }
        let file_name = disposition.get_filename().unwrap_or_default().to_string();
        let content_type = field.content_type().map(|mime| mime.to_string());

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await? {
            let room = (limit + 1).saturating_sub(bytes.len());
            bytes.extend_from_slice(&chunk[..chunk.len().min(room)]);
            if bytes.len() > limit {
                break;
            }
        }

        return Ok(Some(UploadedFile {
            file_name,
            content_type,
            bytes,
        }));
    }
    Ok(None)
}
