//! Error taxonomy shared by every core operation.
//!
//! All four remote operations (list, upload, signed-url, delete) propagate
//! errors to their caller; nothing is retried silently. Every variant
//! renders to a displayable message for the presentation layer.

/// Errors surfaced by the document client, store, and delete negotiator.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Transport or connectivity failure (DNS, refused connection, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The server answered, but the body is not the shape we expect.
    #[error("malformed response: {0}")]
    Decode(String),

    /// The server reports no document with the given id.
    #[error("document not found: {0}")]
    NotFound(String),

    /// The server rejected the request with a non-success status.
    #[error("request rejected ({status}): {body}")]
    Validation { status: u16, body: String },

    /// A local file could not be read; the upload was not attempted.
    #[error("file read failed: {0}")]
    Io(#[from] std::io::Error),

    /// Internal lock error on the document snapshot.
    #[error("internal lock error")]
    LockPoisoned,
}

impl ClientError {
    /// Map a reqwest transport error onto the taxonomy.
    ///
    /// Connectivity and timeout failures become [`ClientError::Network`];
    /// body-decoding failures become [`ClientError::Decode`].
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else if err.is_connect() {
            ClientError::Network(format!("cannot reach server: {err}"))
        } else if err.is_timeout() {
            ClientError::Network(format!("request timed out: {err}"))
        } else {
            ClientError::Network(err.to_string())
        }
    }
}
