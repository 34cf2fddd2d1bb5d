//! Clipboard access for the share action.
//!
//! This module provides a thin wrapper around the `arboard` crate plus the
//! [`ClipboardWriter`] seam the detail overlay writes through.
//!
//! # Example
//!
//! ```ignore
//! use forty_rules::platform::{ClipboardWriter, SystemClipboard};
//!
//! let mut clipboard = SystemClipboard::new();
//! clipboard.write_text("\"Love is patient.\" - Rule 3 from The Forty Rules of Love")?;
//! ```
//!
//! # Platform Notes
//!
//! - **Windows**: Uses the Win32 clipboard API
//! - **macOS**: Uses NSPasteboard
//! - **Linux**: Uses X11 selections or Wayland data-control protocol. Headless
//!   sessions have no clipboard; writes fail with a [`ClipboardError`].

use std::fmt;

/// Error type for clipboard operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipboardError {
    message: String,
}

impl ClipboardError {
    /// Create an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for ClipboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "clipboard error: {}", self.message)
    }
}

impl std::error::Error for ClipboardError {}

impl From<arboard::Error> for ClipboardError {
    fn from(err: arboard::Error) -> Self {
        Self::new(err.to_string())
    }
}

/// Something text can be copied to.
pub trait ClipboardWriter {
    /// Replace the clipboard contents with `text`.
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Cross-platform clipboard access.
///
/// While `Clipboard` is `Send`, clipboard operations should stay on the UI
/// thread for best compatibility across platforms.
pub struct Clipboard {
    inner: arboard::Clipboard,
}

impl Clipboard {
    /// Open the system clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the system clipboard is unavailable or locked by
    /// another process.
    pub fn new() -> Result<Self, ClipboardError> {
        Ok(Self {
            inner: arboard::Clipboard::new()?,
        })
    }

    /// Get the current text content from the clipboard.
    pub fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.inner.get_text().map_err(Into::into)
    }

    /// Set the clipboard text content.
    pub fn set_text(&mut self, text: impl AsRef<str>) -> Result<(), ClipboardError> {
        self.inner.set_text(text.as_ref()).map_err(Into::into)
    }
}

impl ClipboardWriter for Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.set_text(text)
    }
}

impl fmt::Debug for Clipboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Clipboard").finish_non_exhaustive()
    }
}

/// The system clipboard, opened on first write.
///
/// A failed open is not cached: the next write tries again.
#[derive(Debug, Default)]
pub struct SystemClipboard {
    inner: Option<Clipboard>,
}

impl SystemClipboard {
    /// Create a handle without touching the system clipboard yet.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardWriter for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut clipboard = match self.inner.take() {
            Some(clipboard) => clipboard,
            None => Clipboard::new()?,
        };
        let result = clipboard.write_text(text);
        self.inner = Some(clipboard);
        result
    }
}

/// An in-memory clipboard that records every write.
///
/// Used where no system clipboard exists and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    writes: Vec<String>,
    fail_with: Option<ClipboardError>,
}

impl MemoryClipboard {
    /// An empty clipboard that accepts writes.
    pub fn new() -> Self {
        Self::default()
    }

    /// A clipboard whose writes fail with `message`. Failed writes are still recorded.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            writes: Vec::new(),
            fail_with: Some(ClipboardError::new(message)),
        }
    }

    /// Every text written, oldest first.
    pub fn writes(&self) -> &[String] {
        &self.writes
    }

    /// The most recent text written.
    pub fn contents(&self) -> Option<&str> {
        self.writes.last().map(String::as_str)
    }
}

impl ClipboardWriter for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.writes.push(text.to_string());
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}
