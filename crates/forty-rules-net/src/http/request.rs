//! GET requests and their builder.

use super::client::HttpClient;
use super::response::HttpResponse;
use crate::error::Result;

const TARGET: &str = "forty_rules_net::http";

/// A GET request ready to be sent.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    /// The request URL, without query parameters.
    pub url: String,
    /// Request headers.
    pub headers: http::HeaderMap,
    /// Query parameters, in insertion order.
    pub query: Vec<(String, String)>,
    /// Bearer token for the `Authorization` header.
    pub bearer: Option<String>,
}

impl HttpRequest {
    /// The URL with the query parameters appended.
    pub fn full_url(&self) -> Result<url::Url> {
        let mut url = url::Url::parse(&self.url)?;
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }

    async fn send(self, client: &HttpClient) -> Result<HttpResponse> {
        let url = self.full_url()?;
        tracing::debug!(target: TARGET, %url, "GET");

        let mut request = client.reqwest_client().get(url).headers(self.headers);
        if let Some(token) = &self.bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        Ok(HttpResponse::from_reqwest(response))
    }
}

/// Builds an [`HttpRequest`] bound to the client that will send it.
#[derive(Debug)]
pub struct HttpRequestBuilder {
    client: HttpClient,
    request: HttpRequest,
}

impl HttpRequestBuilder {
    pub(crate) fn new(client: HttpClient, url: String) -> Self {
        Self {
            client,
            request: HttpRequest {
                url,
                headers: http::HeaderMap::new(),
                query: Vec::new(),
                bearer: None,
            },
        }
    }

    /// Set a header, replacing an earlier value. Invalid names or values are
    /// skipped with a warning.
    pub fn header(mut self, name: &str, value: &str) -> Self {
        match (
            http::HeaderName::try_from(name),
            http::HeaderValue::try_from(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.request.headers.insert(name, value);
            }
            _ => tracing::warn!(target: TARGET, header = name, "Skipping invalid header"),
        }
        self
    }

    /// Copy every entry of `headers` onto the request.
    pub fn headers(mut self, headers: &http::HeaderMap) -> Self {
        for (name, value) in headers {
            self.request.headers.insert(name.clone(), value.clone());
        }
        self
    }

    /// Append a query parameter.
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.query.push((key.into(), value.into()));
        self
    }

    /// Send `Authorization: Bearer <token>`.
    pub fn bearer_auth(mut self, token: impl Into<String>) -> Self {
        self.request.bearer = Some(token.into());
        self
    }

    /// The request as built so far.
    pub fn build(self) -> HttpRequest {
        self.request
    }

    /// Send the request. Any status is returned as a response.
    pub async fn send(self) -> Result<HttpResponse> {
        self.request.send(&self.client).await
    }
}
