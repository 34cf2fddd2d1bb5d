//! Selection state for the rule grid.
//!
//! [`SelectionState`] holds the selected rule and the open flag as a pair so
//! the invariant "open implies selected" is kept by construction. The owner
//! closes in two steps: [`SelectionState::begin_close`] clears the open flag
//! and [`SelectionState::clear`] drops the rule once the exit animation has had
//! time to run.

use super::rule::Rule;

/// A rule together with its display position in the grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedRule {
    /// The selected rule.
    pub rule: Rule,
    /// Zero-based index in the grid.
    pub index: usize,
}

impl SelectedRule {
    /// Create a selection for the rule at `index`.
    pub fn new(rule: Rule, index: usize) -> Self {
        Self { rule, index }
    }

    /// One-based display position, as shown on the card.
    #[inline]
    pub fn position(&self) -> usize {
        self.index + 1
    }
}

/// Selected rule plus open flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<SelectedRule>,
    is_open: bool,
}

impl SelectionState {
    /// An empty, closed selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// The selected rule, if any.
    pub fn selected(&self) -> Option<&SelectedRule> {
        self.selected.as_ref()
    }

    /// Whether the detail overlay should be presented.
    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Select a rule and open it.
    pub fn open(&mut self, selected: SelectedRule) {
        self.selected = Some(selected);
        self.is_open = true;
    }

    /// Clear the open flag, keeping the rule. Returns `true` if it was open.
    pub fn begin_close(&mut self) -> bool {
        std::mem::replace(&mut self.is_open, false)
    }

    /// Drop the selection entirely.
    pub fn clear(&mut self) {
        self.is_open = false;
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_close_sequence() {
        let mut state = SelectionState::new();
        assert!(!state.is_open());
        assert!(!state.begin_close());

        state.open(SelectedRule::new(Rule::new(7, "seven"), 6));
        assert!(state.is_open());
        assert_eq!(state.selected().map(SelectedRule::position), Some(7));

        assert!(state.begin_close());
        assert!(!state.is_open());
        assert!(state.selected().is_some());

        state.clear();
        assert_eq!(state, SelectionState::new());
    }
}
