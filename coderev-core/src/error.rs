//! Error types for review generation

use thiserror::Error;

/// Result type alias for review operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while generating or retrieving reviews
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing credentials, unparseable config file)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid caller input; no side effects have occurred
    #[error("Validation error: {0}")]
    Validation(String),

    /// The model request failed in transport or with a non-success status
    #[error("Model request failed: {0}")]
    Upstream(String),

    /// The model answered without any content
    #[error("Model returned an empty response")]
    EmptyModelResponse,

    /// The model answered with content that is not a JSON object
    #[error("Failed to parse model response as JSON: {0}")]
    MalformedModelResponse(String),

    /// No review with this id is owned by the caller
    #[error("Review {0} not found")]
    NotFound(i64),

    /// Persistence error
    #[error("Storage error: {0}")]
    Db(#[from] coderev_db::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error originates from the external model service
    ///
    /// Upstream errors abort the pipeline before any persistence write, so a
    /// stored review always reflects a fully successful generation.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Error::Upstream(_) | Error::EmptyModelResponse | Error::MalformedModelResponse(_)
        )
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Upstream(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upstream_classification() {
        assert!(Error::EmptyModelResponse.is_upstream());
        assert!(Error::MalformedModelResponse("bad".to_string()).is_upstream());
        assert!(Error::Upstream("status 500".to_string()).is_upstream());

        assert!(!Error::Validation("code is required".to_string()).is_upstream());
        assert!(!Error::Config("no api key".to_string()).is_upstream());
        assert!(!Error::NotFound(42).is_upstream());
    }
}
