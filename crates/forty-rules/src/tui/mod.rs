//! Terminal front end built on ratatui and crossterm.
//!
//! - [`app`]: the event loop and fetch hand-off
//! - [`render`]: drawing and pointer hit-testing
//! - [`theme`]: colours

pub mod app;
pub mod render;
pub mod theme;

pub use app::{App, FRAME_INTERVAL, IDLE_INTERVAL, run};
pub use render::{GridScroll, Hit, HitMap, draw};
