//! Error types for the networking module.

use std::fmt;

/// Network-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The HTTP client could not be constructed.
    ClientBuild(String),
    /// The request failed for a reason not covered below.
    Request(String),
    /// The URL did not parse.
    InvalidUrl(String),
    /// No response within the configured timeout.
    Timeout,
    /// The server could not be reached.
    Connection(String),
    /// The body was not the JSON the caller expected.
    Json(String),
    /// A non-2xx response.
    HttpStatus {
        /// The HTTP status code.
        status: u16,
        /// Response body, when one could be read.
        message: Option<String>,
    },
}

impl NetworkError {
    /// The HTTP status code, if this error came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ClientBuild(msg) => write!(f, "Failed to create HTTP client: {msg}"),
            Self::Request(msg) => write!(f, "HTTP request error: {msg}"),
            Self::InvalidUrl(msg) => write!(f, "Invalid URL: {msg}"),
            Self::Timeout => write!(f, "Request timed out"),
            Self::Connection(msg) => write!(f, "Connection error: {msg}"),
            Self::Json(msg) => write!(f, "JSON error: {msg}"),
            Self::HttpStatus { status, message } => match message.as_deref() {
                Some(msg) if !msg.is_empty() => write!(f, "HTTP {status}: {msg}"),
                _ => write!(f, "HTTP {status}"),
            },
        }
    }
}

impl std::error::Error for NetworkError {}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else if err.is_connect() {
            Self::Connection(err.to_string())
        } else if err.is_decode() {
            Self::Json(err.to_string())
        } else {
            Self::Request(err.to_string())
        }
    }
}

impl From<url::ParseError> for NetworkError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for NetworkError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// A specialized Result type for network operations.
pub type Result<T> = std::result::Result<T, NetworkError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_display() {
        let err = NetworkError::HttpStatus {
            status: 401,
            message: Some("Invalid API key".to_string()),
        };
        assert_eq!(err.to_string(), "HTTP 401: Invalid API key");
        assert_eq!(err.status(), Some(401));

        let err = NetworkError::HttpStatus {
            status: 503,
            message: Some(String::new()),
        };
        assert_eq!(err.to_string(), "HTTP 503");
        assert_eq!(NetworkError::Timeout.status(), None);
    }

    #[test]
    fn test_url_parse_error_conversion() {
        let err: NetworkError = url::Url::parse("not a url").unwrap_err().into();
        assert!(matches!(err, NetworkError::InvalidUrl(_)));
    }

    #[test]
    fn test_json_error_conversion() {
        let err: NetworkError = serde_json::from_str::<Vec<i64>>("{").unwrap_err().into();
        assert!(matches!(err, NetworkError::Json(_)));
    }
}
