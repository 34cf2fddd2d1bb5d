//! REST client over a base URL.
//!
//! Paths are appended to the base URL, and every request carries the
//! client's default headers and credentials.
//!
//! # Example
//!
//! ```ignore
//! use forty_rules_net::http::RestApiClient;
//!
//! let client = RestApiClient::builder("https://project.supabase.co/rest/v1")
//!     .api_key("apikey", "anon-key")
//!     .bearer_auth("anon-key")
//!     .accept_json()
//!     .build()?;
//!
//! let rows: Vec<Row> = client.get("/rules").query("select", "*").json_response().await?;
//! ```

use std::sync::Arc;

use serde::de::DeserializeOwned;

use super::client::{HttpClient, HttpClientBuilder};
use super::request::{HttpRequest, HttpRequestBuilder};
use crate::error::Result;

/// A credential attached to every request.
///
/// A client holds any number of API key headers and at most one bearer
/// token; they are sent together.
#[derive(Clone, Debug, PartialEq, Eq)]
enum ApiAuth {
    Bearer(String),
    ApiKey { header: String, value: String },
}

impl ApiAuth {
    /// Whether `other` would be sent in the same place as `self`.
    fn replaces(&self, other: &ApiAuth) -> bool {
        match (self, other) {
            (Self::Bearer(_), Self::Bearer(_)) => true,
            (Self::ApiKey { header: a, .. }, Self::ApiKey { header: b, .. }) => {
                a.eq_ignore_ascii_case(b)
            }
            _ => false,
        }
    }
}

/// Builder for a [`RestApiClient`].
#[derive(Debug)]
pub struct RestApiClientBuilder {
    base_url: String,
    http: HttpClientBuilder,
    default_headers: http::HeaderMap,
    credentials: Vec<ApiAuth>,
}

impl RestApiClientBuilder {
    /// Start a builder for `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            http: HttpClientBuilder::new(),
            default_headers: http::HeaderMap::new(),
            credentials: Vec::new(),
        }
    }

    /// Settings for the underlying [`HttpClient`].
    pub fn http_client_builder(mut self, builder: HttpClientBuilder) -> Self {
        self.http = builder;
        self
    }

    /// Send `name: value` with every request. Invalid pairs are ignored.
    pub fn default_header(mut self, name: &str, value: &str) -> Self {
        if let (Ok(name), Ok(value)) = (
            http::HeaderName::try_from(name),
            http::HeaderValue::try_from(value),
        ) {
            self.default_headers.insert(name, value);
        }
        self
    }

    /// Send `Accept: application/json`.
    pub fn accept_json(self) -> Self {
        self.default_header("Accept", "application/json")
    }

    /// Send a bearer token, replacing an earlier one.
    pub fn bearer_auth(self, token: impl Into<String>) -> Self {
        self.credential(ApiAuth::Bearer(token.into()))
    }

    /// Send an API key in `header`, replacing an earlier key for that header.
    pub fn api_key(self, header: impl Into<String>, key: impl Into<String>) -> Self {
        self.credential(ApiAuth::ApiKey {
            header: header.into(),
            value: key.into(),
        })
    }

    fn credential(mut self, auth: ApiAuth) -> Self {
        self.credentials.retain(|existing| !existing.replaces(&auth));
        self.credentials.push(auth);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<RestApiClient> {
        let http = self.http.build()?;
        Ok(RestApiClient {
            inner: Arc::new(RestApiClientInner {
                http,
                base_url: self.base_url.trim_end_matches('/').to_string(),
                default_headers: self.default_headers,
                credentials: self.credentials,
            }),
        })
    }
}

struct RestApiClientInner {
    http: HttpClient,
    base_url: String,
    default_headers: http::HeaderMap,
    credentials: Vec<ApiAuth>,
}

/// A client for one REST endpoint. Cheap to clone.
#[derive(Clone)]
pub struct RestApiClient {
    inner: Arc<RestApiClientInner>,
}

impl RestApiClient {
    /// Start configuring a client for `base_url`.
    pub fn builder(base_url: impl Into<String>) -> RestApiClientBuilder {
        RestApiClientBuilder::new(base_url)
    }

    /// The base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Start a GET request for `path` below the base URL.
    pub fn get(&self, path: &str) -> RestApiRequestBuilder {
        let url = format!("{}/{}", self.inner.base_url, path.trim_start_matches('/'));
        let mut request = self.inner.http.get(url).headers(&self.inner.default_headers);
        for credential in &self.inner.credentials {
            request = match credential {
                ApiAuth::ApiKey { header, value } => request.header(header, value),
                ApiAuth::Bearer(token) => request.bearer_auth(token.as_str()),
            };
        }
        RestApiRequestBuilder { request }
    }
}

impl std::fmt::Debug for RestApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestApiClient")
            .field("base_url", &self.inner.base_url)
            .field("credentials", &self.inner.credentials.len())
            .finish()
    }
}

/// A request against a [`RestApiClient`].
#[derive(Debug)]
pub struct RestApiRequestBuilder {
    request: HttpRequestBuilder,
}

impl RestApiRequestBuilder {
    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request = self.request.query(key, value);
        self
    }

    /// The request as it would be sent.
    pub fn build(self) -> HttpRequest {
        self.request.build()
    }

    /// Send once, fail on a non-2xx status and decode the body as JSON.
    pub async fn json_response<T: DeserializeOwned>(self) -> Result<T> {
        let response = self.request.send().await?;
        response.error_for_status_with_body().await?.json().await
    }
}
