//! Model Atlas error types.
//!
//! Most failures in the catalog are recovered locally: a failed upstream
//! fetch falls back to the built-in list and an incomplete record is filled
//! in by enhancement. The variants here surface at the edges, where a
//! source reports why it could not produce records, where configuration is
//! read, and where the HTTP service rejects a request.

use thiserror::Error;

/// Model Atlas errors.
#[derive(Error, Debug)]
pub enum AtlasError {
    /// Network communication error.
    #[error("Network error: {0}")]
    Network(String),

    /// Upstream service answered with a non-success status.
    #[error("Upstream error ({status}): {message}")]
    Upstream {
        /// HTTP status code returned by the upstream.
        status: u16,
        /// Response body or reason phrase.
        message: String,
    },

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Request rejected before reaching the catalog.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Model not found in the catalog.
    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// Server-side error.
    #[error("Server error: {0}")]
    Server(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Model Atlas operations
pub type Result<T> = std::result::Result<T, AtlasError>;

impl From<reqwest::Error> for AtlasError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => AtlasError::Upstream {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None => AtlasError::Network(err.to_string()),
        }
    }
}

impl From<toml::de::Error> for AtlasError {
    fn from(err: toml::de::Error) -> Self {
        AtlasError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_display() {
        let err = AtlasError::Upstream {
            status: 503,
            message: "Service Unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "Upstream error (503): Service Unavailable");
    }

    #[test]
    fn test_toml_error_maps_to_config() {
        let parsed: std::result::Result<toml::Value, _> = toml::from_str("port = ");
        let err: AtlasError = parsed.unwrap_err().into();
        assert!(matches!(err, AtlasError::Config(_)));
    }
}
