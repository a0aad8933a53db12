//! Upload encoding: one local file into a multipart/form-data body.
//!
//! The service expects exactly one part named `file`. Content is carried
//! byte-exact — no transcoding, no line-ending normalization. Each encoding
//! draws a fresh random boundary token so collisions with file content are
//! negligible.

use std::path::Path;

use uuid::Uuid;

use crate::error::ClientError;

/// A local file staged for one upload call.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    /// Base name sent as the part's `filename`.
    pub file_name: String,
    /// MIME type for the part; `application/octet-stream` when unknown.
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl UploadPayload {
    /// Read a file from disk into a payload.
    ///
    /// Fails with [`ClientError::Io`] when the file cannot be read; the
    /// caller must not attempt the upload in that case.
    pub fn from_path(path: &Path) -> Result<Self, ClientError> {
        let file_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .ok_or_else(|| {
                ClientError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("path has no usable file name: {}", path.display()),
                ))
            })?
            .to_string();
        let bytes = std::fs::read(path)?;
        let content_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(Self {
            file_name,
            content_type,
            bytes,
        })
    }

    /// Build an in-memory payload, guessing the MIME type from the name.
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Self {
        let content_type = mime_guess::from_path(file_name)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Self {
            file_name: file_name.to_string(),
            content_type,
            bytes,
        }
    }
}

/// An encoded multipart body plus the boundary it was framed with.
#[derive(Debug)]
pub struct MultipartBody {
    pub boundary: String,
    pub bytes: Vec<u8>,
}

impl MultipartBody {
    /// Value for the request's `Content-Type` header.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }
}

/// Encode a payload as a single-part multipart/form-data body.
pub fn encode(payload: &UploadPayload) -> MultipartBody {
    let boundary = format!("Boundary-{}", Uuid::new_v4());
    let header = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
        payload.file_name, payload.content_type,
    );
    let footer = format!("\r\n--{boundary}--\r\n");

    let mut bytes = Vec::with_capacity(header.len() + payload.bytes.len() + footer.len());
    bytes.extend_from_slice(header.as_bytes());
    bytes.extend_from_slice(&payload.bytes);
    bytes.extend_from_slice(footer.as_bytes());

    MultipartBody { boundary, bytes }
}
