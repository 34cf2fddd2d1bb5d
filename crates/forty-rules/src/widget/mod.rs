//! Input and animation building blocks shared by the views.
//!
//! - [`keyboard`]: backend-independent key presses
//! - [`animation`]: easing and the overlay's staggered reveal

pub mod animation;
pub mod keyboard;

pub use keyboard::{Key, KeyPress, KeyboardModifiers};
