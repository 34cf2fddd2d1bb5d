//! Networking module for Forty Rules.
//!
//! This crate provides the HTTP plumbing the rules source is built on:
//!
//! - **HTTP Client**: A configured `reqwest` client with a GET request builder
//! - **REST API Client**: Base URL, default headers and API-key/bearer auth
//!
//! # HTTP Client
//!
//! ```ignore
//! use forty_rules_net::HttpClient;
//!
//! let client = HttpClient::new()?;
//!
//! let data: MyData = client
//!     .get("https://api.example.com/data")
//!     .header("Accept", "application/json")
//!     .send()
//!     .await?
//!     .error_for_status_with_body()
//!     .await?
//!     .json()
//!     .await?;
//! ```
//!
//! # REST API Client
//!
//! ```ignore
//! use forty_rules_net::RestApiClient;
//!
//! let client = RestApiClient::builder("https://project.supabase.co/rest/v1")
//!     .api_key("apikey", "anon-key")
//!     .bearer_auth("anon-key")
//!     .accept_json()
//!     .build()?;
//!
//! let rows: Vec<Row> = client
//!     .get("/rules")
//!     .query("select", "*")
//!     .query("order", "id.asc")
//!     .json_response()
//!     .await?;
//! ```

mod error;
pub mod http;

pub use error::{NetworkError, Result};

// Re-export commonly used types at the crate root
pub use self::http::{
    HttpClient, HttpClientBuilder, HttpRequest, HttpRequestBuilder, HttpResponse,
    RestApiClient, RestApiClientBuilder, RestApiRequestBuilder,
};
