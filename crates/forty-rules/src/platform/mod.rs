//! Platform services.
//!
//! # Clipboard
//!
//! ```ignore
//! use forty_rules::platform::{Clipboard, ClipboardWriter};
//!
//! let mut clipboard = Clipboard::new()?;
//! clipboard.write_text("Copied text")?;
//! ```

mod clipboard;

pub use clipboard::{Clipboard, ClipboardError, ClipboardWriter, MemoryClipboard, SystemClipboard};
