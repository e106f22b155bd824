//! Error types for the socialconnect library.

use thiserror::Error;

/// Result type for socialconnect operations.
pub type SocialConnectResult<T> = Result<T, SocialConnectError>;

/// Errors surfaced to callers of the messengers.
///
/// Only batch-fatal conditions are raised from a dispatch call
/// (`Authentication`, and `Validation` for unusable call arguments such as
/// an empty recipient list). Per-destination failures are folded into the
/// returned [`DispatchResult`](crate::models::DispatchResult) instead.
#[derive(Debug, Error)]
pub enum SocialConnectError {
    /// Credential or login failure. Aborts the whole batch.
    #[error("authentication failed: {0}")]
    Authentication(String),

    /// Malformed input detected before any external call.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Invalid or incomplete configuration.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport or automation failure (SMTP, chat gateway, templates).
    #[error("messaging failed: {0}")]
    Messaging(String),
}

impl From<eyre::Report> for SocialConnectError {
    fn from(err: eyre::Report) -> Self {
        Self::Messaging(err.to_string())
    }
}
