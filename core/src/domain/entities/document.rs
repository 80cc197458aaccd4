//! Identity document uploaded by a customer, and the automatic check that
//! decides its verification status.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

use super::customer::truncate_to_seconds;

/// Outcome of the document check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerificationStatus {
    Pending,
    Verified,
    Rejected,
}

impl VerificationStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VerificationStatus::Pending => "pending",
            VerificationStatus::Verified => "verified",
            VerificationStatus::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VerificationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(VerificationStatus::Pending),
            "verified" => Ok(VerificationStatus::Verified),
            "rejected" => Ok(VerificationStatus::Rejected),
            _ => Err(format!("Unknown verification status: {}", s)),
        }
    }
}

/// File formats the check recognises from their leading bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Png,
    Jpeg,
    Pdf,
}

impl DocumentKind {
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension {
            "png" => Some(DocumentKind::Png),
            "jpg" | "jpeg" => Some(DocumentKind::Jpeg),
            "pdf" => Some(DocumentKind::Pdf),
            _ => None,
        }
    }

    /// Identify the format from the file signature
    pub fn sniff(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG\r\n\x1a\n") {
            Some(DocumentKind::Png)
        } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
            Some(DocumentKind::Jpeg)
        } else if bytes.starts_with(b"%PDF-") {
            Some(DocumentKind::Pdf)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentKind::Png => "image/png",
            DocumentKind::Jpeg => "image/jpeg",
            DocumentKind::Pdf => "application/pdf",
        }
    }
}

/// Lower-cased extension of a client-supplied file name
pub fn file_extension(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .filter(|ext| !ext.is_empty())
}

/// Document metadata; the bytes live in the blob store under `storage_key`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: Uuid,
    pub customer_id: Uuid,

    /// File name as sent by the client
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: u64,

    #[serde(skip_serializing)]
    pub storage_key: String,

    pub verification_status: VerificationStatus,
    pub uploaded_at: DateTime<Utc>,
    pub verified_at: Option<DateTime<Utc>>,
}

impl Document {
    /// A pending document whose blob key is derived from its own id
    pub fn new(
        customer_id: Uuid,
        file_name: &str,
        extension: &str,
        content_type: &str,
        size_bytes: u64,
        now: DateTime<Utc>,
    ) -> Self {
        let id = Uuid::new_v4();
        Self {
            id,
            customer_id,
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            size_bytes,
            storage_key: format!("documents/{}/{}.{}", customer_id, id, extension),
            verification_status: VerificationStatus::Pending,
            uploaded_at: truncate_to_seconds(now),
            verified_at: None,
        }
    }

    /// Run the format check: the content must carry the signature of the
    /// format its extension claims.
    pub fn check_contents(&mut self, extension: &str, bytes: &[u8], now: DateTime<Utc>) {
        let claimed = DocumentKind::from_extension(extension);
        if claimed.is_some() && claimed == DocumentKind::sniff(bytes) {
            self.verification_status = VerificationStatus::Verified;
            self.verified_at = Some(truncate_to_seconds(now));
        } else {
            self.verification_status = VerificationStatus::Rejected;
            self.verified_at = None;
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verification_status == VerificationStatus::Verified
    }
}
