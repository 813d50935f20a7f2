//! Error types for the rApp

use thiserror::Error;

/// Main error type for rApp operations
#[derive(Error, Debug)]
pub enum RappError {
    /// Network, DNS, TLS or timeout failure talking to PMS
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// PMS answered with a status code >= 300
    #[error("Upstream rejected {resource}: status {status}")]
    UpstreamRejection {
        /// Upstream resource name (`services`, `policies`)
        resource: String,
        /// HTTP status code returned by PMS
        status: u16,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Base URL or path could not be turned into a request URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl RappError {
    /// Whether this error came from talking to PMS (as opposed to local input)
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            RappError::Transport(_) | RappError::UpstreamRejection { .. }
        )
    }
}

/// Result type alias for rApp operations
pub type Result<T> = std::result::Result<T, RappError>;
