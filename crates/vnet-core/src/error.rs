// crates/vnet-core/src/error.rs
use thiserror::Error;

/// Errors raised at the I/O edges of the crate (loading settings, parsing
/// page URLs, talking to browser collaborators).
///
/// Settings resolution itself never fails; see [`crate::resolver::Unresolved`].
#[derive(Debug, Error)]
pub enum VnetError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "json")]
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("script injection failed: {0}")]
    Injection(String),
}

pub type Result<T> = std::result::Result<T, VnetError>;
