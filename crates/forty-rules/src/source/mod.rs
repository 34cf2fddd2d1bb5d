//! Where rules come from.
//!
//! [`RulesSource`] is the seam between the views and the network. The
//! application builds one [`SupabaseRulesSource`] at startup and hands it to
//! the fetch task behind an `Arc`; tests substitute their own implementation.
//!
//! ```ignore
//! use std::sync::Arc;
//! use forty_rules::config::SourceConfig;
//! use forty_rules::source::{RulesSource, SupabaseRulesSource};
//!
//! let source: Arc<dyn RulesSource> = Arc::new(SupabaseRulesSource::new(&SourceConfig::from_env()));
//! let rules = source.fetch_all_rules().await?;
//! ```

mod error;
mod supabase;

use async_trait::async_trait;

use crate::model::Rule;

pub use error::DataUnavailable;
pub use supabase::SupabaseRulesSource;

/// A read-only provider of the full rule list.
#[async_trait]
pub trait RulesSource: Send + Sync {
    /// Fetch every rule, ascending by `id`.
    ///
    /// One best-effort attempt per call: no caching, no retries.
    async fn fetch_all_rules(&self) -> Result<Vec<Rule>, DataUnavailable>;
}
