//! Error types for the notification bus client

use thiserror::Error;

/// Errors that can occur when talking to the notification service
#[derive(Error, Debug)]
pub enum BusError {
    /// Connection to the NATS server failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// No reply arrived before the request timeout
    #[error("Request timed out")]
    Timeout,

    /// Nothing is subscribed to the subject
    #[error("No responders for subject: {0}")]
    NoResponders(String),

    /// The request could not be delivered
    #[error("Request error: {0}")]
    Request(String),

    /// Failed to serialize a request body
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The bus was closed before the operation
    #[error("Bus closed")]
    Closed,
}

/// Result type for bus operations
pub type Result<T> = std::result::Result<T, BusError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_connection() {
        let err = BusError::Connection("connection refused".to_string());
        assert_eq!(err.to_string(), "Connection error: connection refused");
    }

    #[test]
    fn test_error_display_timeout() {
        assert_eq!(BusError::Timeout.to_string(), "Request timed out");
    }

    #[test]
    fn test_error_display_no_responders() {
        let err = BusError::NoResponders("NOTIFICATION.list".to_string());
        assert_eq!(err.to_string(), "No responders for subject: NOTIFICATION.list");
    }

    #[test]
    fn test_error_display_request() {
        let err = BusError::Request("broken pipe".to_string());
        assert_eq!(err.to_string(), "Request error: broken pipe");
    }

    #[test]
    fn test_error_display_closed() {
        assert_eq!(BusError::Closed.to_string(), "Bus closed");
    }

    #[test]
    fn test_error_from_serde_json() {
        let json_err = serde_json::from_str::<String>("not valid json").unwrap_err();
        let err: BusError = json_err.into();
        assert!(matches!(err, BusError::Serialization(_)));
        assert!(err.to_string().starts_with("Serialization error:"));
    }
}
