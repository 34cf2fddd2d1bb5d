//! Environment configuration.
//!
//! Everything is read through a lookup function so tests can pass a map
//! instead of touching the process environment:
//!
//! ```
//! use std::collections::HashMap;
//! use forty_rules::config::AppConfig;
//!
//! let env = HashMap::from([
//!     ("SUPABASE_URL", "https://project.supabase.co"),
//!     ("SUPABASE_ANON_KEY", "anon-key"),
//! ]);
//! let config = AppConfig::from_lookup(|name| env.get(name).map(|v| v.to_string()));
//! assert!(config.source.is_configured());
//! ```

use std::path::PathBuf;
use std::time::Duration;

use crate::view::FallbackPolicy;

/// Endpoint of the hosted project.
pub const URL_VAR: &str = "SUPABASE_URL";
/// Anonymous access key.
pub const KEY_VAR: &str = "SUPABASE_ANON_KEY";
/// Table holding the rules.
pub const TABLE_VAR: &str = "FORTY_RULES_TABLE";
/// Request timeout in whole seconds.
pub const TIMEOUT_VAR: &str = "FORTY_RULES_TIMEOUT_SECS";
/// `off` disables the placeholder fallback.
pub const PLACEHOLDERS_VAR: &str = "FORTY_RULES_PLACEHOLDERS";
/// Log file path.
pub const LOG_FILE_VAR: &str = "FORTY_RULES_LOG_FILE";

/// Default table name.
pub const DEFAULT_TABLE: &str = "rules";
/// Default request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Settings for the rules source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceConfig {
    /// Project endpoint, e.g. `https://project.supabase.co`.
    pub url: Option<String>,
    /// Anonymous access key.
    pub anon_key: Option<String>,
    /// Table to read.
    pub table: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            url: None,
            anon_key: None,
            table: DEFAULT_TABLE.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl SourceConfig {
    /// A configured source pointing at `url`.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            anon_key: Some(anon_key.into()),
            ..Self::default()
        }
    }

    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through `lookup`. Empty and whitespace-only values count as absent.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |name: &str| non_empty(lookup(name));

        let timeout = match read(TIMEOUT_VAR) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    tracing::warn!(
                        target: "forty_rules::config",
                        value = %raw,
                        "Ignoring invalid {TIMEOUT_VAR}, using {}s",
                        DEFAULT_TIMEOUT.as_secs()
                    );
                    DEFAULT_TIMEOUT
                }
            },
            None => DEFAULT_TIMEOUT,
        };

        Self {
            url: read(URL_VAR),
            anon_key: read(KEY_VAR),
            table: read(TABLE_VAR).unwrap_or_else(|| DEFAULT_TABLE.to_string()),
            timeout,
        }
    }

    /// Names of the required variables that are absent.
    pub fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.url.is_none() {
            missing.push(URL_VAR);
        }
        if self.anon_key.is_none() {
            missing.push(KEY_VAR);
        }
        missing
    }

    /// Whether both the endpoint and the key are present.
    pub fn is_configured(&self) -> bool {
        self.missing().is_empty()
    }
}

/// Application settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Rules source settings.
    pub source: SourceConfig,
    /// What the grid shows when the fetch fails.
    pub fallback: FallbackPolicy,
    /// Explicit log file path, if set.
    pub log_file: Option<PathBuf>,
}

impl AppConfig {
    /// Read from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let fallback = match non_empty(lookup(PLACEHOLDERS_VAR)) {
            Some(value) if is_disabled(&value) => FallbackPolicy::ErrorPage,
            _ => FallbackPolicy::Placeholders,
        };
        let log_file = non_empty(lookup(LOG_FILE_VAR)).map(PathBuf::from);

        Self {
            source: SourceConfig::from_lookup(&lookup),
            fallback,
            log_file,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn is_disabled(value: &str) -> bool {
    matches!(
        value.to_ascii_lowercase().as_str(),
        "off" | "false" | "0" | "no"
    )
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup<'a>(env: &'a HashMap<&str, &str>) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| env.get(name).map(|v| v.to_string())
    }

    #[test]
    fn test_empty_environment() {
        let env = HashMap::new();
        let config = AppConfig::from_lookup(lookup(&env));

        assert_eq!(config.source.missing(), vec![URL_VAR, KEY_VAR]);
        assert_eq!(config.source.table, DEFAULT_TABLE);
        assert_eq!(config.source.timeout, DEFAULT_TIMEOUT);
        assert_eq!(config.fallback, FallbackPolicy::Placeholders);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let env = HashMap::from([(URL_VAR, "https://x.supabase.co"), (KEY_VAR, "   ")]);
        let config = SourceConfig::from_lookup(lookup(&env));

        assert!(!config.is_configured());
        assert_eq!(config.missing(), vec![KEY_VAR]);
    }

    #[test]
    fn test_optional_settings() {
        let env = HashMap::from([
            (URL_VAR, "https://x.supabase.co"),
            (KEY_VAR, "key"),
            (TABLE_VAR, "quotes"),
            (TIMEOUT_VAR, "3"),
            (PLACEHOLDERS_VAR, "OFF"),
            (LOG_FILE_VAR, "/tmp/forty.log"),
        ]);
        let config = AppConfig::from_lookup(lookup(&env));

        assert!(config.source.is_configured());
        assert_eq!(config.source.table, "quotes");
        assert_eq!(config.source.timeout, Duration::from_secs(3));
        assert_eq!(config.fallback, FallbackPolicy::ErrorPage);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/forty.log")));
    }

    #[test]
    fn test_invalid_timeout_falls_back() {
        let env = HashMap::from([(TIMEOUT_VAR, "soon")]);
        assert_eq!(SourceConfig::from_lookup(lookup(&env)).timeout, DEFAULT_TIMEOUT);

        let env = HashMap::from([(TIMEOUT_VAR, "0")]);
        assert_eq!(SourceConfig::from_lookup(lookup(&env)).timeout, DEFAULT_TIMEOUT);
    }
}
