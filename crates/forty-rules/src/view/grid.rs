//! Keyboard focus within the card grid.

use crate::widget::Key;

/// Columns on narrow surfaces.
pub const NARROW_COLUMNS: usize = 2;
/// Columns on wide surfaces.
pub const WIDE_COLUMNS: usize = 4;
/// Minimum surface width, in cells, for the wide layout.
pub const WIDE_BREAKPOINT: u16 = 80;
/// Rows moved by Page Up / Page Down.
pub const PAGE_ROWS: usize = 4;

/// Column count for a surface `width` cells wide.
pub fn columns_for_width(width: u16) -> usize {
    if width >= WIDE_BREAKPOINT {
        WIDE_COLUMNS
    } else {
        NARROW_COLUMNS
    }
}

/// A focus movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridMove {
    /// Previous card, wrapping to the end of the row above.
    Left,
    /// Next card, wrapping to the start of the row below.
    Right,
    /// Same column, one row up.
    Up,
    /// Same column, one row down.
    Down,
    /// The first card.
    First,
    /// The last card.
    Last,
    /// Same column, [`PAGE_ROWS`] rows up.
    PageUp,
    /// Same column, [`PAGE_ROWS`] rows down.
    PageDown,
}

impl GridMove {
    /// The movement bound to `key`, if any.
    pub fn from_key(key: Key) -> Option<Self> {
        match key {
            Key::ArrowLeft => Some(Self::Left),
            Key::ArrowRight => Some(Self::Right),
            Key::ArrowUp => Some(Self::Up),
            Key::ArrowDown => Some(Self::Down),
            Key::Home => Some(Self::First),
            Key::End => Some(Self::Last),
            Key::PageUp => Some(Self::PageUp),
            Key::PageDown => Some(Self::PageDown),
            _ => None,
        }
    }
}

/// The focused card index.
///
/// Vertical moves keep the column and stop at the first or last row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridCursor {
    index: usize,
}

impl GridCursor {
    /// Focused index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Focus `index`, clamped to a grid of `len` cards.
    pub fn set(&mut self, index: usize, len: usize) {
        self.index = index.min(len.saturating_sub(1));
    }

    /// Keep the focus inside a grid of `len` cards.
    pub fn clamp(&mut self, len: usize) {
        self.set(self.index, len);
    }

    /// Apply `movement`. Returns `true` if the focus changed.
    pub fn apply(&mut self, movement: GridMove, columns: usize, len: usize) -> bool {
        if len == 0 {
            return false;
        }
        let columns = columns.max(1);
        let current = self.index.min(len - 1);
        let down = |i: usize, rows: usize| {
            let mut i = i;
            for _ in 0..rows {
                if i + columns < len {
                    i += columns;
                }
            }
            i
        };
        let up = |i: usize, rows: usize| i.saturating_sub(columns * rows.min(i / columns));

        let next = match movement {
            GridMove::Left => current.saturating_sub(1),
            GridMove::Right => (current + 1).min(len - 1),
            GridMove::Up => up(current, 1),
            GridMove::Down => down(current, 1),
            GridMove::First => 0,
            GridMove::Last => len - 1,
            GridMove::PageUp => up(current, PAGE_ROWS),
            GridMove::PageDown => down(current, PAGE_ROWS),
        };

        let changed = next != self.index;
        self.index = next;
        changed
    }
}
