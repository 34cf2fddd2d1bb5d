//! The shared `reqwest` client.

use std::time::Duration;

use super::request::HttpRequestBuilder;
use crate::error::{NetworkError, Result};

/// Request timeout used when the builder is not given one.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("FortyRules/", env!("CARGO_PKG_VERSION"));

/// Builder for an [`HttpClient`].
#[derive(Clone, Debug)]
pub struct HttpClientBuilder {
    timeout: Duration,
}

impl Default for HttpClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpClientBuilder {
    /// A builder with [`DEFAULT_TIMEOUT`].
    pub fn new() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Total time allowed for a request, connect to last body byte.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<HttpClient> {
        let inner = reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| NetworkError::ClientBuild(e.to_string()))?;

        Ok(HttpClient {
            inner,
            timeout: self.timeout,
        })
    }
}

/// An HTTP client.
///
/// Clones share one connection pool.
#[derive(Clone, Debug)]
pub struct HttpClient {
    inner: reqwest::Client,
    timeout: Duration,
}

impl HttpClient {
    /// A client with default settings.
    pub fn new() -> Result<Self> {
        HttpClientBuilder::new().build()
    }

    /// Start configuring a client.
    pub fn builder() -> HttpClientBuilder {
        HttpClientBuilder::new()
    }

    /// The request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Start a GET request to `url`.
    pub fn get(&self, url: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(self.clone(), url.into())
    }

    pub(crate) fn reqwest_client(&self) -> &reqwest::Client {
        &self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_defaults_and_overrides() {
        let client = HttpClient::new().unwrap();
        assert_eq!(client.timeout(), DEFAULT_TIMEOUT);

        let client = HttpClient::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(5));
    }
}
