//! PaperStack client core.
//!
//! Keeps a local document list consistent with a remote document service
//! and drives the safe-delete protocol on top of it. All business logic
//! lives server-side; this crate orchestrates the REST calls, holds the
//! replace-on-refresh snapshot, and derives filtered views from it.

pub mod client;
pub mod config;
pub mod delete;
pub mod error;
pub mod filter;
pub mod models;
pub mod multipart;
pub mod store;

pub use client::{DeleteAck, DocumentApi, DocumentClient, UploadAck};
pub use config::ClientConfig;
pub use delete::{delete_document, DeleteOutcome, DeletePhase};
pub use error::ClientError;
pub use models::{Document, FilterCriteria};
pub use multipart::UploadPayload;
pub use store::DocumentStore;

use tracing_subscriber::EnvFilter;

/// Initialize tracing for binaries embedding the client core.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .init();
}
