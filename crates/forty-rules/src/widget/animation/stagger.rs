//! Staggered reveal of the detail overlay.
//!
//! Each overlay element starts its entrance after its own delay and eases in
//! over its own duration. Leaving fades everything with the container,
//! starting from wherever each element had got to.

use std::time::{Duration, Instant};

use super::easing::{Easing, ease};

/// Container fade duration, both directions.
pub const CONTAINER_FADE: Duration = Duration::from_millis(500);

/// The animated parts of the detail overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OverlayElement {
    /// Backdrop and frame.
    Container,
    /// The close button.
    CloseButton,
    /// The "Rule N" title.
    Title,
    /// The quote text.
    Quote,
    /// Attribution and page line.
    Attribution,
    /// Share and continue buttons.
    Actions,
}

impl OverlayElement {
    /// Every element, in reveal order.
    pub const ALL: [OverlayElement; 6] = [
        Self::Container,
        Self::CloseButton,
        Self::Title,
        Self::Quote,
        Self::Attribution,
        Self::Actions,
    ];

    /// Delay before the element starts to enter.
    pub const fn delay(self) -> Duration {
        match self {
            Self::Container => Duration::ZERO,
            Self::CloseButton => Duration::from_millis(200),
            Self::Title => Duration::from_millis(300),
            Self::Quote => Duration::from_millis(500),
            Self::Attribution => Duration::from_millis(700),
            Self::Actions => Duration::from_millis(800),
        }
    }

    /// How long the entrance takes once started.
    pub const fn duration(self) -> Duration {
        match self {
            Self::Container => CONTAINER_FADE,
            Self::CloseButton => Duration::from_millis(300),
            Self::Title | Self::Quote | Self::Attribution | Self::Actions => {
                Duration::from_millis(700)
            }
        }
    }

    /// When the element is fully shown, measured from the start of the reveal.
    pub const fn settled_after(self) -> Duration {
        self.delay().saturating_add(self.duration())
    }

    fn entrance(self, elapsed: Duration) -> f32 {
        let Some(active) = elapsed.checked_sub(self.delay()) else {
            return 0.0;
        };
        ease(
            Easing::EaseOut,
            active.as_secs_f32() / self.duration().as_secs_f32(),
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Phase {
    #[default]
    Hidden,
    Entering {
        since: Instant,
    },
    Leaving {
        entered: Option<Instant>,
        since: Instant,
    },
}

/// Reveal state for one overlay presentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Reveal {
    phase: Phase,
}

impl Reveal {
    /// A hidden reveal.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start entering at `now`.
    pub fn enter(&mut self, now: Instant) {
        self.phase = Phase::Entering { since: now };
    }

    /// Start leaving at `now`, fading from the current progress.
    ///
    /// Leaving again while already leaving restarts the fade from the
    /// original entrance state.
    pub fn leave(&mut self, now: Instant) {
        let entered = match self.phase {
            Phase::Hidden => None,
            Phase::Entering { since } => Some(since),
            Phase::Leaving { entered, .. } => entered,
        };
        self.phase = Phase::Leaving {
            entered,
            since: now,
        };
    }

    /// Back to hidden.
    pub fn reset(&mut self) {
        self.phase = Phase::Hidden;
    }

    /// Whether the reveal is running forward.
    pub fn is_entering(&self) -> bool {
        matches!(self.phase, Phase::Entering { .. })
    }

    /// Visibility of `element` at `now`, 0.0 (hidden) to 1.0 (fully shown).
    pub fn progress(&self, element: OverlayElement, now: Instant) -> f32 {
        match self.phase {
            Phase::Hidden => 0.0,
            Phase::Entering { since } => element.entrance(now.saturating_duration_since(since)),
            Phase::Leaving { entered, since } => {
                let reached = entered
                    .map(|start| element.entrance(since.saturating_duration_since(start)))
                    .unwrap_or(0.0);
                let fade = now.saturating_duration_since(since).as_secs_f32()
                    / CONTAINER_FADE.as_secs_f32();
                reached * (1.0 - ease(Easing::EaseInOut, fade))
            }
        }
    }

    /// Rows to shift `element` down by while it slides in from `distance` rows.
    pub fn offset(&self, element: OverlayElement, now: Instant, distance: u16) -> u16 {
        let remaining = 1.0 - self.progress(element, now);
        (remaining * f32::from(distance)).round() as u16
    }

    /// Whether anything is still moving at `now`.
    pub fn is_in_motion(&self, now: Instant) -> bool {
        match self.phase {
            Phase::Hidden => false,
            Phase::Entering { since } => {
                now.saturating_duration_since(since) < OverlayElement::Actions.settled_after()
            }
            Phase::Leaving { since, .. } => now.saturating_duration_since(since) < CONTAINER_FADE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_delays_and_durations() {
        assert_eq!(OverlayElement::CloseButton.delay(), ms(200));
        assert_eq!(OverlayElement::Title.delay(), ms(300));
        assert_eq!(OverlayElement::Quote.delay(), ms(500));
        assert_eq!(OverlayElement::Attribution.delay(), ms(700));
        assert_eq!(OverlayElement::Actions.delay(), ms(800));
        assert_eq!(OverlayElement::CloseButton.duration(), ms(300));
        assert_eq!(OverlayElement::Quote.duration(), ms(700));
        assert_eq!(OverlayElement::Container.duration(), ms(500));
        assert_eq!(OverlayElement::Actions.settled_after(), ms(1500));
    }

    #[test]
    fn test_staggered_entrance() {
        let start = Instant::now();
        let mut reveal = Reveal::new();
        assert_eq!(reveal.progress(OverlayElement::Title, start), 0.0);

        reveal.enter(start);
        let at = start + ms(400);
        assert!(reveal.progress(OverlayElement::Title, at) > 0.0);
        assert_eq!(reveal.progress(OverlayElement::Quote, at), 0.0);
        assert_eq!(reveal.progress(OverlayElement::CloseButton, start + ms(500)), 1.0);

        let settled = start + ms(1500);
        for element in OverlayElement::ALL {
            assert_eq!(reveal.progress(element, settled), 1.0);
        }
        assert!(!reveal.is_in_motion(settled));
        assert_eq!(reveal.offset(OverlayElement::Title, settled, 2), 0);
        assert_eq!(reveal.offset(OverlayElement::Actions, start, 2), 2);
    }

    #[test]
    fn test_leave_fades_from_reached_progress() {
        let start = Instant::now();
        let mut reveal = Reveal::new();
        reveal.enter(start);

        let leave_at = start + ms(2000);
        reveal.leave(leave_at);
        assert!(!reveal.is_entering());
        assert_eq!(reveal.progress(OverlayElement::Quote, leave_at), 1.0);
        assert!(reveal.is_in_motion(leave_at + ms(250)));
        assert_eq!(reveal.progress(OverlayElement::Quote, leave_at + ms(500)), 0.0);
        assert!(!reveal.is_in_motion(leave_at + ms(500)));
    }

    #[test]
    fn test_leave_before_enter_stays_hidden() {
        let now = Instant::now();
        let mut reveal = Reveal::new();
        reveal.leave(now);
        assert_eq!(reveal.progress(OverlayElement::Container, now), 0.0);
    }
}
