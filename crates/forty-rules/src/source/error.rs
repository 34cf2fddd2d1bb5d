//! The single user-facing error kind.

use forty_rules_net::NetworkError;
use thiserror::Error;

/// The rules could not be loaded.
///
/// Always recovered locally by the collection view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DataUnavailable {
    /// Required environment variables are absent. No request was made.
    #[error("rules source is not configured: missing {}", .missing.join(", "))]
    NotConfigured {
        /// Names of the missing variables.
        missing: Vec<&'static str>,
    },
    /// The remote call failed or returned something unreadable.
    #[error("rules source request failed: {0}")]
    Remote(#[from] NetworkError),
}

impl DataUnavailable {
    /// Whether the failure came from configuration rather than the network.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, Self::NotConfigured { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_configured_names_variables() {
        let err = DataUnavailable::NotConfigured {
            missing: vec!["SUPABASE_URL", "SUPABASE_ANON_KEY"],
        };
        assert_eq!(
            err.to_string(),
            "rules source is not configured: missing SUPABASE_URL, SUPABASE_ANON_KEY"
        );
        assert!(err.is_not_configured());
    }

    #[test]
    fn test_remote_wraps_status() {
        let err = DataUnavailable::from(NetworkError::HttpStatus {
            status: 401,
            message: Some("Invalid API key".to_string()),
        });
        assert_eq!(
            err.to_string(),
            "rules source request failed: HTTP 401: Invalid API key"
        );
        assert!(!err.is_not_configured());
    }
}
