//! The rule grid view model.
//!
//! [`CollectionView`] owns the rule list, the load state and the selection.
//! It has no knowledge of the surface it is drawn on: the loop feeds it key
//! presses, load results and the current time, and reads back a [`Screen`].
//!
//! # Example
//!
//! ```
//! use std::time::{Duration, Instant};
//! use forty_rules::model::Rule;
//! use forty_rules::view::{CollectionView, FallbackPolicy};
//!
//! let mut view = CollectionView::new(FallbackPolicy::Placeholders);
//! view.begin_load();
//! view.finish_load(Ok(vec![Rule::new(1, "one"), Rule::new(2, "two")]));
//!
//! let now = Instant::now();
//! view.select_index(1);
//! view.close(now);
//! assert!(!view.is_open());
//! assert!(view.selected().is_some());
//!
//! view.tick(now + Duration::from_millis(200));
//! assert!(view.selected().is_none());
//! ```

use std::time::{Duration, Instant};

use forty_rules_core::{Property, Signal, TimerId, TimerManager};

use super::card::CardModel;
use super::grid::{GridCursor, GridMove, WIDE_COLUMNS};
use crate::model::{Rule, SelectedRule, SelectionState, placeholder_rules, sort_by_id};
use crate::source::{DataUnavailable, RulesSource};
use crate::widget::{Key, KeyPress};

const TARGET: &str = "forty_rules::view";

/// Time between closing the overlay and dropping the selection.
pub const SELECTION_CLEAR_DELAY: Duration = Duration::from_millis(200);

/// What to show when the fetch fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FallbackPolicy {
    /// Substitute the 40 placeholder rules and show a warning banner.
    #[default]
    Placeholders,
    /// Keep the list empty and show the error page with a retry action.
    ErrorPage,
}

/// Load progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    /// A fetch is in flight.
    Loading,
    /// The list is populated; `error` is set if it came from the fallback.
    Ready {
        /// The failure that triggered the fallback.
        error: Option<DataUnavailable>,
    },
}

impl LoadState {
    /// The error recorded by the last load, if any.
    pub fn error(&self) -> Option<&DataUnavailable> {
        match self {
            Self::Ready { error } => error.as_ref(),
            Self::Loading => None,
        }
    }
}

/// What the surface should draw.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// The loading indicator.
    Loading,
    /// The full-page error with a retry action.
    ErrorPage {
        /// Error detail.
        message: String,
    },
    /// The card grid, with a warning banner when showing placeholders.
    Grid {
        /// Error detail for the banner.
        warning: Option<String>,
    },
}

/// The grid of rule cards plus selection state.
pub struct CollectionView {
    rules: Vec<Rule>,
    state: Property<LoadState>,
    selection: SelectionState,
    cursor: GridCursor,
    columns: usize,
    fallback: FallbackPolicy,
    timers: TimerManager,
    clear_timer: Option<TimerId>,
    /// Emitted when the load state changes.
    pub state_changed: Signal<LoadState>,
    /// Emitted with the selected rule's id, or `None` once the selection is dropped.
    pub selection_changed: Signal<Option<i64>>,
    /// Emitted when the open flag changes.
    pub open_changed: Signal<bool>,
}

impl CollectionView {
    /// An empty view in the loading state.
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self {
            rules: Vec::new(),
            state: Property::new(LoadState::Loading),
            selection: SelectionState::new(),
            cursor: GridCursor::default(),
            columns: WIDE_COLUMNS,
            fallback,
            timers: TimerManager::new(),
            clear_timer: None,
            state_changed: Signal::new(),
            selection_changed: Signal::new(),
            open_changed: Signal::new(),
        }
    }

    // =========================================================================
    // Loading
    // =========================================================================

    /// Current load state.
    pub fn state(&self) -> LoadState {
        self.state.get()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.with(|state| *state == LoadState::Loading)
    }

    /// Enter the loading state.
    pub fn begin_load(&mut self) {
        self.set_state(LoadState::Loading);
    }

    /// Apply a fetch result.
    ///
    /// Success replaces the list, sorted by `id`. Failure applies the fallback
    /// policy and records the error. Results arriving outside the loading
    /// state are dropped.
    pub fn finish_load(&mut self, result: Result<Vec<Rule>, DataUnavailable>) {
        if !self.is_loading() {
            tracing::debug!(target: TARGET, "Ignoring load result outside the loading state");
            return;
        }

        let state = match result {
            Ok(mut rules) => {
                sort_by_id(&mut rules);
                tracing::info!(target: TARGET, count = rules.len(), "Rules loaded");
                self.rules = rules;
                LoadState::Ready { error: None }
            }
            Err(error) => {
                self.rules = match self.fallback {
                    FallbackPolicy::Placeholders => {
                        tracing::warn!(target: TARGET, %error, "Using placeholder rules");
                        placeholder_rules()
                    }
                    FallbackPolicy::ErrorPage => {
                        tracing::warn!(target: TARGET, %error, "Rules unavailable");
                        Vec::new()
                    }
                };
                LoadState::Ready { error: Some(error) }
            }
        };

        self.cursor.clamp(self.rules.len());
        self.set_state(state);
    }

    /// Fetch from `source` and apply the result.
    pub async fn load(&mut self, source: &dyn RulesSource) {
        self.begin_load();
        let result = source.fetch_all_rules().await;
        self.finish_load(result);
    }

    /// Whether a retry would be honored: the last load failed and left no rules.
    pub fn can_retry(&self) -> bool {
        self.rules.is_empty() && self.state.with(|state| state.error().is_some())
    }

    /// Re-enter loading if [`Self::can_retry`]. Returns whether it did; the
    /// caller then starts the fetch.
    pub fn retry(&mut self) -> bool {
        if !self.can_retry() {
            tracing::debug!(target: TARGET, "Retry ignored");
            return false;
        }
        tracing::info!(target: TARGET, "Retrying rules fetch");
        self.begin_load();
        true
    }

    fn set_state(&mut self, state: LoadState) {
        if self.state.set(state.clone()) {
            self.state_changed.emit(state);
        }
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// The rules, in grid order.
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// One card per rule, in grid order.
    pub fn cards(&self) -> Vec<CardModel> {
        self.rules
            .iter()
            .enumerate()
            .map(|(index, rule)| CardModel::new(rule, index))
            .collect()
    }

    /// What to draw.
    pub fn screen(&self) -> Screen {
        self.state.with(|state| match state {
            LoadState::Loading => Screen::Loading,
            LoadState::Ready { error: Some(error) } if self.rules.is_empty() => {
                Screen::ErrorPage {
                    message: error.to_string(),
                }
            }
            LoadState::Ready { error } => Screen::Grid {
                warning: error.as_ref().map(ToString::to_string),
            },
        })
    }

    /// Set the column count used for vertical navigation.
    pub fn set_columns(&mut self, columns: usize) {
        self.columns = columns.max(1);
    }

    /// Column count used for vertical navigation.
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Index of the focused card.
    pub fn focused(&self) -> usize {
        self.cursor.index()
    }

    // =========================================================================
    // Selection
    // =========================================================================

    /// The selected rule, if any. Still set for a short while after closing.
    pub fn selected(&self) -> Option<&SelectedRule> {
        self.selection.selected()
    }

    /// Whether the overlay should be presented.
    pub fn is_open(&self) -> bool {
        self.selection.is_open()
    }

    /// Select and open the rule at grid index `index`.
    ///
    /// Cancels a pending selection clear. Returns `false` if out of range.
    pub fn select_index(&mut self, index: usize) -> bool {
        let Some(rule) = self.rules.get(index).cloned() else {
            return false;
        };

        self.cancel_clear_timer();
        let previous = self.selection.selected().map(|s| s.index);
        let was_open = self.selection.is_open();
        let id = rule.id;

        self.selection.open(SelectedRule::new(rule, index));
        self.cursor.set(index, self.rules.len());
        tracing::debug!(target: TARGET, id, position = index + 1, "Rule selected");

        if previous != Some(index) {
            self.selection_changed.emit(Some(id));
        }
        if !was_open {
            self.open_changed.emit(true);
        }
        true
    }

    /// Select and open the rule with `id`. Returns `false` if no such rule.
    pub fn select_id(&mut self, id: i64) -> bool {
        match self.rules.iter().position(|rule| rule.id == id) {
            Some(index) => self.select_index(index),
            None => false,
        }
    }

    /// Clear the open flag now and drop the selection after
    /// [`SELECTION_CLEAR_DELAY`]. Closing again restarts the delay.
    pub fn close(&mut self, now: Instant) {
        if self.selection.selected().is_none() {
            return;
        }

        if self.selection.begin_close() {
            tracing::debug!(target: TARGET, "Overlay closed");
            self.open_changed.emit(false);
        }

        self.cancel_clear_timer();
        self.clear_timer = Some(self.timers.start_one_shot(now, SELECTION_CLEAR_DELAY));
    }

    fn cancel_clear_timer(&mut self) {
        if let Some(id) = self.clear_timer.take()
            && self.timers.stop(id).is_ok()
        {
            tracing::trace!(target: TARGET, "Pending selection clear cancelled");
        }
    }

    // =========================================================================
    // Input and time
    // =========================================================================

    /// Grid navigation and selection. Ignored while the overlay is open or no
    /// grid is shown. Returns whether the key was used.
    pub fn handle_key(&mut self, press: KeyPress) -> bool {
        if self.is_open() || !matches!(self.screen(), Screen::Grid { .. }) {
            return false;
        }

        if let Some(movement) = GridMove::from_key(press.key) {
            self.cursor.apply(movement, self.columns, self.rules.len());
            return true;
        }

        match press.key {
            Key::Enter | Key::Space => self.select_index(self.cursor.index()),
            _ => false,
        }
    }

    /// Fire due timers.
    pub fn tick(&mut self, now: Instant) {
        for id in self.timers.process_expired(now) {
            if self.clear_timer == Some(id) {
                self.clear_timer = None;
                self.selection.clear();
                tracing::debug!(target: TARGET, "Selection cleared");
                self.selection_changed.emit(None);
            }
        }
    }

    /// When [`Self::tick`] next has work to do.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.timers.next_deadline()
    }
}

impl std::fmt::Debug for CollectionView {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionView")
            .field("rules", &self.rules.len())
            .field("state", &self.state)
            .field("selection", &self.selection)
            .field("focused", &self.cursor.index())
            .finish()
    }
}
