//! Error types for the ponder retrieval core.

use thiserror::Error;

/// Result type alias using ponder's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for ponder operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Embedding generation failed or the word-vector table is unusable
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Category routing via the language model failed
    #[error("Routing error: {0}")]
    Routing(String),

    /// Answer synthesis via the language model failed
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Empty or whitespace-only query
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_embedding() {
        let err = Error::Embedding("table not loaded".to_string());
        assert_eq!(err.to_string(), "Embedding error: table not loaded");
    }

    #[test]
    fn test_error_display_routing() {
        let err = Error::Routing("no matching category".to_string());
        assert_eq!(err.to_string(), "Routing error: no matching category");
    }

    #[test]
    fn test_error_display_synthesis() {
        let err = Error::Synthesis("model timeout".to_string());
        assert_eq!(err.to_string(), "Synthesis error: model timeout");
    }

    #[test]
    fn test_error_display_invalid_query() {
        let err = Error::InvalidQuery("empty query".to_string());
        assert_eq!(err.to_string(), "Invalid query: empty query");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing endpoint".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing endpoint");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("network unreachable".to_string());
        assert_eq!(err.to_string(), "Request error: network unreachable");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        match err {
            Error::Io(_) => {}
            _ => panic!("Expected Io error"),
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn test_result_type_ok() {
        fn get_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(get_result().unwrap(), 42);
    }
}
