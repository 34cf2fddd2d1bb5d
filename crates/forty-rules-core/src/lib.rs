//! Core systems for Forty Rules.
//!
//! This crate provides the small reactive foundation the presentation layer is
//! built on:
//!
//! - **Signal/Slot System**: Type-safe notification of state changes
//! - **Property System**: Values with change detection
//! - **Timers**: One-shot and repeating timers driven by an injected clock
//! - **Logging**: Target names and subscriber setup for `tracing`
//!
//! # Signal/Slot Example
//!
//! ```
//! use forty_rules_core::Signal;
//!
//! let selection_changed = Signal::<Option<i64>>::new();
//!
//! let conn_id = selection_changed.connect(|id| {
//!     println!("Selected rule: {:?}", id);
//! });
//!
//! selection_changed.emit(Some(7));
//! selection_changed.disconnect(conn_id);
//! ```
//!
//! # Timer Example
//!
//! Timers never read the wall clock themselves. The owner passes `now` into
//! every call, so the same code runs in the UI loop and in tests.
//!
//! ```
//! use std::time::{Duration, Instant};
//! use forty_rules_core::TimerManager;
//!
//! let mut timers = TimerManager::new();
//! let start = Instant::now();
//! let id = timers.start_one_shot(start, Duration::from_millis(200));
//!
//! assert!(timers.process_expired(start + Duration::from_millis(199)).is_empty());
//! assert_eq!(timers.process_expired(start + Duration::from_millis(200)), vec![id]);
//! ```

mod error;
pub mod logging;
pub mod property;
pub mod signal;
mod timer;

pub use error::{CoreError, Result, TimerError};
pub use property::Property;
pub use signal::{ConnectionId, Signal};
pub use timer::{TimerId, TimerKind, TimerManager};
