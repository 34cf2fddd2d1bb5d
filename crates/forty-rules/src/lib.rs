//! Forty Rules - The Forty Rules of Love as a terminal quote grid.
//!
//! This is the application crate. It re-exports the core primitives and
//! layers the rules model, the remote source, the view models and the
//! terminal front end on top.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use forty_rules::config::AppConfig;
//! use forty_rules::source::{RulesSource, SupabaseRulesSource};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::from_env();
//!     let source: Arc<dyn RulesSource> = Arc::new(SupabaseRulesSource::new(&config.source));
//!     forty_rules::tui::run(&config, source)
//! }
//! ```

pub use forty_rules_core::*;

pub mod config;
pub mod model;
pub mod platform;
pub mod source;
pub mod tui;
pub mod view;
pub mod widget;
