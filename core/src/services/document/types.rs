//! Types for document uploads

/// A file received from the client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    /// File name as sent by the client
    pub file_name: String,
    /// Declared media type, if the client sent one
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}
