//! Application constants and client configuration.

/// Application-level constants
pub const APP_NAME: &str = "PaperStack";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Development defaults matching the service's own dev identity.
const DEFAULT_API_BASE: &str = "http://localhost:8000";
const DEFAULT_USER_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> String {
    format!("info,{}=debug", env!("CARGO_PKG_NAME"))
}

/// Where and as whom the client talks to the document service.
///
/// Authentication is a single static identity header; there is no token
/// exchange or session state.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the document service, without a trailing slash.
    pub base_url: String,
    /// Value sent as the `X-User-Id` header on every request.
    pub user_id: String,
}

impl ClientConfig {
    /// Resolve configuration from `PAPERSTACK_API_BASE` and
    /// `PAPERSTACK_USER_ID`, falling back to the development defaults.
    pub fn from_env() -> Self {
        let base_url = std::env::var("PAPERSTACK_API_BASE")
            .unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
        let user_id = std::env::var("PAPERSTACK_USER_ID")
            .unwrap_or_else(|_| DEFAULT_USER_ID.to_string());
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            user_id,
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE.to_string(),
            user_id: DEFAULT_USER_ID.to_string(),
        }
    }
}
