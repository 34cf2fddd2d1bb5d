//! Data model: rules, the placeholder sequence, and selection state.

mod placeholder;
mod rule;
mod selection;

pub use placeholder::{PLACEHOLDER_COUNT, placeholder_rules, placeholder_text};
pub use rule::{Rule, sort_by_id};
pub use selection::{SelectedRule, SelectionState};
