//! HTTP client for Forty Rules.
//!
//! A thin layer over `reqwest` for read-only JSON endpoints: a configured
//! client, a GET request builder, a response wrapper, and a REST client that
//! prefixes paths with a base URL and attaches credentials to every call.
//!
//! # Example
//!
//! ```ignore
//! use forty_rules_net::http::HttpClient;
//!
//! let client = HttpClient::new()?;
//!
//! let response = client.get("https://api.example.com/users").send().await?;
//! println!("Status: {}", response.status());
//! println!("Body: {}", response.text().await?);
//! ```
//!
//! Requests are issued once. Nothing in this module retries on failure; callers
//! that want another attempt ask for one explicitly.

mod client;
mod request;
mod response;
mod rest_api;

pub use client::{DEFAULT_TIMEOUT, HttpClient, HttpClientBuilder};
pub use request::{HttpRequest, HttpRequestBuilder};
pub use response::HttpResponse;
pub use rest_api::{RestApiClient, RestApiClientBuilder, RestApiRequestBuilder};
