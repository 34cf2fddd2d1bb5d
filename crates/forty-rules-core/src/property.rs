//! Property system for Forty Rules.
//!
//! Properties are the data backbone of the view models: a `Property<T>` wraps a
//! value and reports whether a write actually changed it, so the owner knows
//! when to emit the paired change signal.
//!
//! # Example
//!
//! ```
//! use forty_rules_core::{Property, Signal};
//!
//! struct Indicator {
//!     active: Property<bool>,
//!     active_changed: Signal<bool>,
//! }
//!
//! impl Indicator {
//!     fn set_active(&self, active: bool) {
//!         if self.active.set(active) {
//!             self.active_changed.emit(active);
//!         }
//!     }
//! }
//!
//! let indicator = Indicator { active: Property::new(false), active_changed: Signal::new() };
//! indicator.set_active(true);
//! assert!(indicator.active.get());
//! ```

use std::fmt;

use parking_lot::RwLock;

/// A reactive property that tracks changes.
///
/// When `set()` is called, the new value is compared with the current one and
/// the return value says whether it actually changed.
///
/// # Thread Safety
///
/// `Property<T>` uses interior mutability with `RwLock` and is `Send + Sync`
/// whenever `T` is.
pub struct Property<T> {
    value: RwLock<T>,
}

impl<T: Clone> Property<T> {
    /// Create a new property with an initial value.
    pub fn new(value: T) -> Self {
        Self {
            value: RwLock::new(value),
        }
    }

    /// Get the current value.
    ///
    /// This clones the value. For large types, consider using `with()` instead.
    pub fn get(&self) -> T {
        self.value.read().clone()
    }

    /// Access the value through a closure without cloning.
    pub fn with<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&T) -> R,
    {
        f(&self.value.read())
    }

    /// Set the value without change detection.
    pub fn set_silent(&self, value: T) {
        *self.value.write() = value;
    }
}

impl<T: Clone + PartialEq> Property<T> {
    /// Set the value, returning `true` if the value changed.
    ///
    /// The caller should emit the associated notification signal when this
    /// returns `true`.
    pub fn set(&self, value: T) -> bool {
        let mut current = self.value.write();
        if *current != value {
            *current = value;
            true
        } else {
            false
        }
    }

    /// Set the value, returning the old value if it changed.
    pub fn replace(&self, value: T) -> Option<T> {
        let mut current = self.value.write();
        if *current != value {
            Some(std::mem::replace(&mut *current, value))
        } else {
            None
        }
    }
}

impl<T: Clone> Clone for Property<T> {
    fn clone(&self) -> Self {
        Self::new(self.get())
    }
}

impl<T: Clone + Default> Default for Property<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone + fmt::Debug> fmt::Debug for Property<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Property")
            .field("value", &self.get())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_property_set_reports_change() {
        let prop = Property::new(42);
        assert_eq!(prop.get(), 42);

        assert!(!prop.set(42));
        assert!(prop.set(100));
        assert_eq!(prop.get(), 100);
    }

    #[test]
    fn test_property_replace() {
        let prop = Property::new(Some("a".to_string()));

        assert_eq!(prop.replace(Some("a".to_string())), None);
        assert_eq!(prop.replace(None), Some(Some("a".to_string())));
        assert_eq!(prop.get(), None);
    }

    #[test]
    fn test_property_with_and_silent() {
        let prop = Property::new(vec![1, 2, 3]);
        assert_eq!(prop.with(|v| v.len()), 3);

        prop.set_silent(Vec::new());
        assert!(prop.with(|v| v.is_empty()));
    }
}
