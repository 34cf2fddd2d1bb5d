//! The page composing the grid and the overlay.
//!
//! [`RulesPage`] routes input to the overlay first and the grid second, and
//! keeps the overlay in step with the grid's selection after every change.

use std::time::Instant;

use super::collection::{CollectionView, FallbackPolicy};
use super::overlay::{DetailOverlay, OverlayEvent, OverlayHit};
use crate::platform::ClipboardWriter;
use crate::widget::KeyPress;

/// What the event loop should do after an input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCommand {
    /// Nothing beyond redrawing.
    None,
    /// Start a new fetch; the grid has already entered loading.
    Fetch,
    /// Leave the application.
    Quit,
}

/// Grid plus overlay.
#[derive(Debug)]
pub struct RulesPage {
    /// The card grid and selection.
    pub collection: CollectionView,
    /// The detail overlay.
    pub overlay: DetailOverlay,
}

impl RulesPage {
    /// A page in the loading state.
    pub fn new(fallback: FallbackPolicy) -> Self {
        Self {
            collection: CollectionView::new(fallback),
            overlay: DetailOverlay::new(),
        }
    }

    /// Route a key press.
    pub fn handle_key(
        &mut self,
        press: KeyPress,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> PageCommand {
        if press.is_quit() {
            return PageCommand::Quit;
        }

        let command = if self.overlay.handle_key(press, clipboard, now) {
            PageCommand::None
        } else if press.is_char('r') && self.collection.retry() {
            PageCommand::Fetch
        } else {
            self.collection.handle_key(press);
            PageCommand::None
        };

        self.sync();
        command
    }

    /// A click on the card at grid index `index`.
    pub fn click_card(&mut self, index: usize) -> bool {
        if self.overlay.is_visible() {
            return false;
        }
        let selected = self.collection.select_index(index);
        self.sync();
        selected
    }

    /// Select and open the rule with `id`.
    pub fn select_id(&mut self, id: i64) -> bool {
        let selected = self.collection.select_id(id);
        self.sync();
        selected
    }

    /// A click on an overlay region.
    pub fn click_overlay(
        &mut self,
        hit: OverlayHit,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> bool {
        let handled = self.overlay.handle_click(hit, clipboard, now);
        self.sync();
        handled
    }

    /// A click on the error page's retry action.
    pub fn click_retry(&mut self) -> PageCommand {
        if self.collection.retry() {
            PageCommand::Fetch
        } else {
            PageCommand::None
        }
    }

    /// Advance both components to `now`.
    pub fn tick(&mut self, now: Instant) {
        self.collection.tick(now);
        if let Some(OverlayEvent::Closed) = self.overlay.tick(now) {
            self.collection.close(now);
        }
        self.sync();
    }

    /// Earliest timer deadline across both components.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        match (self.collection.next_deadline(), self.overlay.next_deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Whether an animation wants continuous frames.
    pub fn needs_frames(&self, now: Instant) -> bool {
        self.overlay.needs_frames(now)
    }

    fn sync(&mut self) {
        self.overlay
            .sync(self.collection.selected(), self.collection.is_open());
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::model::Rule;
    use crate::platform::MemoryClipboard;
    use crate::source::DataUnavailable;
    use crate::widget::{Key, KeyboardModifiers};

    fn loaded() -> RulesPage {
        let mut page = RulesPage::new(FallbackPolicy::Placeholders);
        page.collection
            .finish_load(Ok((1..=8).map(|i| Rule::new(i, format!("r{i}"))).collect()));
        page
    }

    #[test]
    fn test_quit_keys() {
        let mut page = loaded();
        let mut clipboard = MemoryClipboard::new();
        let now = Instant::now();
        assert_eq!(
            page.handle_key(Key::Char('q').into(), &mut clipboard, now),
            PageCommand::Quit
        );
        let ctrl_c = KeyPress::with_modifiers(Key::Char('c'), KeyboardModifiers::CONTROL);
        assert_eq!(page.handle_key(ctrl_c, &mut clipboard, now), PageCommand::Quit);
    }

    #[test]
    fn test_escape_runs_full_close_sequence() {
        let start = Instant::now();
        let mut page = loaded();
        let mut clipboard = MemoryClipboard::new();

        page.handle_key(Key::Enter.into(), &mut clipboard, start);
        page.tick(start);
        assert!(page.overlay.is_animating());

        page.handle_key(Key::Escape.into(), &mut clipboard, start);
        assert!(page.collection.is_open());

        page.tick(start + Duration::from_millis(500));
        assert!(!page.collection.is_open());
        assert!(page.collection.selected().is_some());
        assert!(!page.overlay.is_visible());

        page.tick(start + Duration::from_millis(700));
        assert!(page.collection.selected().is_none());
    }

    #[test]
    fn test_card_click_ignored_under_overlay() {
        let mut page = loaded();
        assert!(page.click_card(2));
        assert!(!page.click_card(3));
        assert_eq!(page.collection.selected().map(|s| s.index), Some(2));
    }

    #[test]
    fn test_retry_from_error_page() {
        let mut page = RulesPage::new(FallbackPolicy::ErrorPage);
        page.collection
            .finish_load(Err(DataUnavailable::NotConfigured {
                missing: vec!["SUPABASE_URL"],
            }));
        let mut clipboard = MemoryClipboard::new();

        assert_eq!(
            page.handle_key(Key::Char('r').into(), &mut clipboard, Instant::now()),
            PageCommand::Fetch
        );
        assert!(page.collection.is_loading());
        assert_eq!(page.click_retry(), PageCommand::None);
    }
}
