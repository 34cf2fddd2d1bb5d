//! Animation support for Forty Rules.
//!
//! This module provides easing functions and the staggered reveal used by the
//! detail overlay. Nothing here reads the clock; callers pass `now`.
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use forty_rules::widget::animation::{OverlayElement, Reveal};
//!
//! let start = Instant::now();
//! let mut reveal = Reveal::new();
//! reveal.enter(start);
//!
//! let later = start + Duration::from_millis(400);
//! assert!(reveal.progress(OverlayElement::Title, later) > 0.0);
//! assert_eq!(reveal.progress(OverlayElement::Actions, later), 0.0);
//! ```

mod easing;
mod stagger;

pub use easing::{Easing, ease, lerp_eased};
pub use stagger::{CONTAINER_FADE, OverlayElement, Reveal};
