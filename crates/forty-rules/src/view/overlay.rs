//! The rule detail overlay.
//!
//! [`DetailOverlay`] mirrors the grid's selection through [`DetailOverlay::sync`]
//! and owns everything that happens while a rule is presented: the staggered
//! reveal, the delayed close and the copied indicator. It never changes the
//! selection itself. When its exit fade finishes, [`DetailOverlay::tick`]
//! returns [`OverlayEvent::Closed`] and the owner closes the grid's selection.

use std::time::{Duration, Instant};

use forty_rules_core::{Property, Signal, TimerId, TimerManager};

use crate::model::SelectedRule;
use crate::platform::ClipboardWriter;
use crate::widget::animation::{OverlayElement, Reveal};
use crate::widget::{Key, KeyPress};

const TARGET: &str = "forty_rules::overlay";

/// Time between a close request and [`OverlayEvent::Closed`].
pub const CLOSE_DELAY: Duration = Duration::from_millis(500);

/// How long the copied indicator stays up after a share.
pub const COPIED_DURATION: Duration = Duration::from_secs(2);

/// Book title, used in headings and share text.
pub const BOOK_TITLE: &str = "The Forty Rules of Love";

/// Attribution line under the quote.
pub const ATTRIBUTION: &str = "— From “The Forty Rules of Love” by Elif Shafak";

/// Share button label.
pub const SHARE_LABEL: &str = "Share This Wisdom";

/// Share button label while the copied indicator is up.
pub const COPIED_LABEL: &str = "✓ Copied!";

/// Dismiss button label.
pub const CONTINUE_LABEL: &str = "Continue Journey";

/// Clipboard text for a rule shown at `position`.
///
/// ```
/// use forty_rules::view::share_text;
///
/// assert_eq!(
///     share_text("Love is patient.", 3),
///     "\"Love is patient.\" - Rule 3 from The Forty Rules of Love",
/// );
/// ```
pub fn share_text(text: &str, position: usize) -> String {
    format!("\"{text}\" - Rule {position} from {BOOK_TITLE}")
}

/// Notifications for the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayEvent {
    /// The exit fade finished; close the selection.
    Closed,
}

/// Result of a share request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// The text was copied and the indicator shown.
    Copied,
    /// The indicator was already up; its window was restarted.
    Restarted,
    /// Nothing is presented.
    Ignored,
}

/// Interactive regions of the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayHit {
    /// The corner close control.
    CloseButton,
    /// The share button.
    Share,
    /// The dismiss button.
    Continue,
    /// Outside the dialog.
    Backdrop,
    /// Inside the dialog but not on a control.
    Content,
}

/// Detail overlay state.
pub struct DetailOverlay {
    rule: Option<SelectedRule>,
    is_open: bool,
    animating: bool,
    reveal_pending: bool,
    reveal: Reveal,
    copied: Property<bool>,
    timers: TimerManager,
    close_timer: Option<TimerId>,
    copied_timer: Option<TimerId>,
    /// Emitted when the copied indicator appears or goes away.
    pub copied_changed: Signal<bool>,
}

impl Default for DetailOverlay {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailOverlay {
    /// A closed overlay.
    pub fn new() -> Self {
        Self {
            rule: None,
            is_open: false,
            animating: false,
            reveal_pending: false,
            reveal: Reveal::new(),
            copied: Property::new(false),
            timers: TimerManager::new(),
            close_timer: None,
            copied_timer: None,
            copied_changed: Signal::new(),
        }
    }

    /// Mirror the grid's selection.
    ///
    /// A new presentation (closed to open, or a different rule) resets the
    /// copied indicator and schedules the entrance for the next tick.
    pub fn sync(&mut self, selected: Option<&SelectedRule>, is_open: bool) {
        match selected {
            Some(selected) if is_open => {
                if !self.is_open || self.rule.as_ref() != Some(selected) {
                    self.present(selected.clone());
                }
            }
            _ => {
                if self.is_open {
                    self.is_open = false;
                    self.animating = false;
                    self.reveal_pending = false;
                    self.stop_timer(TimerSlot::Close);
                }
                self.rule = selected.cloned();
            }
        }
    }

    fn present(&mut self, selected: SelectedRule) {
        tracing::debug!(target: TARGET, id = selected.rule.id, "Presenting rule");
        self.stop_timer(TimerSlot::Close);
        self.stop_timer(TimerSlot::Copied);
        self.set_copied(false);
        self.rule = Some(selected);
        self.is_open = true;
        self.animating = false;
        self.reveal_pending = true;
        self.reveal.reset();
    }

    /// Start a pending entrance and fire due timers.
    pub fn tick(&mut self, now: Instant) -> Option<OverlayEvent> {
        if self.reveal_pending && self.is_visible() {
            self.reveal_pending = false;
            self.animating = true;
            self.reveal.enter(now);
        }

        let mut event = None;
        for id in self.timers.process_expired(now) {
            if self.close_timer == Some(id) {
                self.close_timer = None;
                tracing::debug!(target: TARGET, "Exit fade finished");
                event = Some(OverlayEvent::Closed);
            } else if self.copied_timer == Some(id) {
                self.copied_timer = None;
                self.set_copied(false);
            }
        }
        event
    }

    /// Begin the exit fade; [`OverlayEvent::Closed`] follows after
    /// [`CLOSE_DELAY`]. A second request restarts the delay.
    pub fn request_close(&mut self, now: Instant) -> bool {
        if !self.is_visible() {
            return false;
        }
        self.animating = false;
        self.reveal_pending = false;
        self.reveal.leave(now);
        self.stop_timer(TimerSlot::Close);
        self.close_timer = Some(self.timers.start_one_shot(now, CLOSE_DELAY));
        true
    }

    /// Copy the share text and show the indicator for [`COPIED_DURATION`].
    ///
    /// While the indicator is up, a repeat only restarts its window. A failed
    /// write is logged; the indicator is shown regardless.
    pub fn share(&mut self, clipboard: &mut dyn ClipboardWriter, now: Instant) -> ShareOutcome {
        let Some(selected) = self.rule.as_ref().filter(|_| self.is_open) else {
            return ShareOutcome::Ignored;
        };

        let outcome = if self.is_copied() {
            ShareOutcome::Restarted
        } else {
            let text = share_text(selected.rule.text(), selected.position());
            match clipboard.write_text(&text) {
                Ok(()) => tracing::info!(target: TARGET, id = selected.rule.id, "Rule copied"),
                Err(error) => tracing::warn!(target: TARGET, %error, "Copy failed"),
            }
            self.set_copied(true);
            ShareOutcome::Copied
        };

        self.stop_timer(TimerSlot::Copied);
        self.copied_timer = Some(self.timers.start_one_shot(now, COPIED_DURATION));
        outcome
    }

    /// Overlay keys: Escape closes, Enter continues, `s` shares.
    ///
    /// While visible every key is consumed so the grid underneath stays put.
    pub fn handle_key(
        &mut self,
        press: KeyPress,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> bool {
        if !self.is_visible() {
            return false;
        }
        match press.key {
            Key::Escape | Key::Enter => {
                self.request_close(now);
            }
            Key::Char('s') => {
                self.share(clipboard, now);
            }
            _ => {}
        }
        true
    }

    /// Pointer activation of a region.
    pub fn handle_click(
        &mut self,
        hit: OverlayHit,
        clipboard: &mut dyn ClipboardWriter,
        now: Instant,
    ) -> bool {
        if !self.is_visible() {
            return false;
        }
        match hit {
            OverlayHit::CloseButton | OverlayHit::Continue | OverlayHit::Backdrop => {
                self.request_close(now);
            }
            OverlayHit::Share => {
                self.share(clipboard, now);
            }
            OverlayHit::Content => {}
        }
        true
    }

    // =========================================================================
    // Presentation
    // =========================================================================

    /// Whether anything is drawn. Requires both a rule and the open flag.
    pub fn is_visible(&self) -> bool {
        self.is_open && self.rule.is_some()
    }

    /// The presented rule, if any.
    pub fn rule(&self) -> Option<&SelectedRule> {
        self.rule.as_ref()
    }

    /// Whether the entrance has started and no close was requested.
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Whether the copied indicator is up.
    pub fn is_copied(&self) -> bool {
        self.copied.get()
    }

    /// Current share button label.
    pub fn share_label(&self) -> &'static str {
        if self.is_copied() { COPIED_LABEL } else { SHARE_LABEL }
    }

    /// Heading, e.g. `Rule 7`.
    pub fn title(&self) -> Option<String> {
        self.rule.as_ref().map(|s| format!("Rule {}", s.position()))
    }

    /// Quote text wrapped in typographic quotes.
    pub fn quote(&self) -> Option<String> {
        self.rule.as_ref().map(|s| format!("“{}”", s.rule.text()))
    }

    /// Page reference line, when the rule has one.
    pub fn page_line(&self) -> Option<String> {
        self.rule
            .as_ref()
            .and_then(|s| s.rule.page)
            .map(|page| format!("Page {page}"))
    }

    /// Visibility of `element` at `now`.
    pub fn progress(&self, element: OverlayElement, now: Instant) -> f32 {
        self.reveal.progress(element, now)
    }

    /// Slide-in offset of `element` at `now`.
    pub fn offset(&self, element: OverlayElement, now: Instant, distance: u16) -> u16 {
        self.reveal.offset(element, now, distance)
    }

    /// Whether frames should keep coming: an entrance is pending or running,
    /// or the exit fade is in progress.
    pub fn needs_frames(&self, now: Instant) -> bool {
        self.is_visible() && (self.reveal_pending || self.reveal.is_in_motion(now))
    }

    /// When [`Self::tick`] next has timer work.
    pub fn next_deadline(&mut self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    fn set_copied(&mut self, copied: bool) {
        if self.copied.set(copied) {
            tracing::trace!(target: TARGET, copied, "Copied indicator changed");
            self.copied_changed.emit(copied);
        }
    }

    fn stop_timer(&mut self, slot: TimerSlot) {
        let timer = match slot {
            TimerSlot::Close => self.close_timer.take(),
            TimerSlot::Copied => self.copied_timer.take(),
        };
        if let Some(id) = timer
            && self.timers.stop(id).is_err()
        {
            tracing::trace!(target: TARGET, ?slot, "Timer already fired");
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum TimerSlot {
    Close,
    Copied,
}

impl std::fmt::Debug for DetailOverlay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DetailOverlay")
            .field("rule", &self.rule.as_ref().map(|s| s.rule.id))
            .field("is_open", &self.is_open)
            .field("animating", &self.animating)
            .field("copied", &self.is_copied())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rule;
    use crate::platform::MemoryClipboard;

    fn selected(id: i64, index: usize) -> SelectedRule {
        SelectedRule::new(Rule::new(id, format!("rule {id}")), index)
    }

    #[test]
    fn test_hidden_without_open_flag() {
        let mut overlay = DetailOverlay::new();
        let rule = selected(1, 0);
        overlay.sync(Some(&rule), false);
        assert!(!overlay.is_visible());
        assert!(overlay.rule().is_some());

        overlay.sync(None, true);
        assert!(!overlay.is_visible());
    }

    #[test]
    fn test_entrance_starts_on_next_tick() {
        let start = Instant::now();
        let mut overlay = DetailOverlay::new();
        overlay.sync(Some(&selected(1, 0)), true);

        assert!(overlay.is_visible());
        assert!(!overlay.is_animating());
        assert!(overlay.needs_frames(start));

        overlay.tick(start);
        assert!(overlay.is_animating());
    }

    #[test]
    fn test_close_fires_after_delay() {
        let start = Instant::now();
        let mut overlay = DetailOverlay::new();
        overlay.sync(Some(&selected(1, 0)), true);
        overlay.tick(start);

        assert!(overlay.request_close(start));
        assert!(!overlay.is_animating());
        assert_eq!(overlay.tick(start + Duration::from_millis(499)), None);
        assert_eq!(
            overlay.tick(start + CLOSE_DELAY),
            Some(OverlayEvent::Closed)
        );
    }

    #[test]
    fn test_presentation_strings() {
        let mut overlay = DetailOverlay::new();
        let rule = SelectedRule::new(Rule::new(12, "Love is patient.").with_page(88), 6);
        overlay.sync(Some(&rule), true);

        assert_eq!(overlay.title().as_deref(), Some("Rule 7"));
        assert_eq!(overlay.quote().as_deref(), Some("“Love is patient.”"));
        assert_eq!(overlay.page_line().as_deref(), Some("Page 88"));
        assert_eq!(overlay.share_label(), SHARE_LABEL);
    }

    #[test]
    fn test_new_presentation_resets_copied() {
        let start = Instant::now();
        let mut clipboard = MemoryClipboard::new();
        let mut overlay = DetailOverlay::new();

        overlay.sync(Some(&selected(1, 0)), true);
        overlay.share(&mut clipboard, start);
        assert!(overlay.is_copied());

        overlay.sync(Some(&selected(2, 1)), true);
        assert!(!overlay.is_copied());
        assert_eq!(overlay.next_deadline(), None);
    }

    #[test]
    fn test_share_ignored_when_closed() {
        let mut clipboard = MemoryClipboard::new();
        let mut overlay = DetailOverlay::new();
        assert_eq!(
            overlay.share(&mut clipboard, Instant::now()),
            ShareOutcome::Ignored
        );
        assert!(clipboard.writes().is_empty());
    }

    #[test]
    fn test_clicks() {
        let start = Instant::now();
        let mut clipboard = MemoryClipboard::new();
        let mut overlay = DetailOverlay::new();
        overlay.sync(Some(&selected(5, 4)), true);

        assert!(overlay.handle_click(OverlayHit::Content, &mut clipboard, start));
        assert_eq!(overlay.next_deadline(), None);

        assert!(overlay.handle_click(OverlayHit::Share, &mut clipboard, start));
        assert_eq!(
            clipboard.contents(),
            Some("\"rule 5\" - Rule 5 from The Forty Rules of Love")
        );

        assert!(overlay.handle_click(OverlayHit::Backdrop, &mut clipboard, start));
        assert_eq!(
            overlay.tick(start + CLOSE_DELAY),
            Some(OverlayEvent::Closed)
        );
    }
}
