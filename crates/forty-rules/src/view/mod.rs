//! View models for the rules page.
//!
//! Everything here is surface-independent: time comes in as `now`, input as
//! [`KeyPress`](crate::widget::KeyPress) values and overlay hits, and the
//! result is read back as plain data. The terminal front end lives in
//! [`crate::tui`].

mod card;
mod collection;
mod grid;
mod overlay;
mod page;

pub use card::{CardModel, CardVariant, PALETTE_SIZE};
pub use collection::{
    CollectionView, FallbackPolicy, LoadState, SELECTION_CLEAR_DELAY, Screen,
};
pub use grid::{
    GridCursor, GridMove, NARROW_COLUMNS, PAGE_ROWS, WIDE_BREAKPOINT, WIDE_COLUMNS,
    columns_for_width,
};
pub use overlay::{
    ATTRIBUTION, BOOK_TITLE, CLOSE_DELAY, CONTINUE_LABEL, COPIED_DURATION, COPIED_LABEL,
    DetailOverlay, OverlayEvent, OverlayHit, SHARE_LABEL, ShareOutcome, share_text,
};
pub use page::{PageCommand, RulesPage};
