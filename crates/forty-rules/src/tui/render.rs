//! Drawing the rules page onto a ratatui frame.
//!
//! [`draw`] renders the page and returns a [`HitMap`] describing where the
//! interactive regions ended up, so mouse input can be resolved against the
//! frame that was actually shown.

use std::time::Instant;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Position, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap};

use super::theme;
use crate::view::{
    ATTRIBUTION, BOOK_TITLE, CONTINUE_LABEL, CardModel, CardVariant, OverlayHit, RulesPage,
    Screen,
};
use crate::widget::animation::OverlayElement;

/// Subtitle under the page heading.
pub const SUBTITLE: &str = "Click on any rule to discover the wisdom within. Each rule is a step on the journey toward deeper understanding and love.";
/// Banner shown over placeholder rules.
pub const PLACEHOLDER_BANNER: &str =
    "Using placeholder data. Please check your rules source connection.";
/// Footer quote.
pub const FOOTER_QUOTE: &str = "“Love is the bridge between you and everything.” — Rumi";
/// Loading indicator text.
pub const LOADING_TEXT: &str = "Loading the forty rules...";
/// Error page heading.
pub const ERROR_TITLE: &str = "Unable to load rules";
/// Error page action.
pub const RETRY_LABEL: &str = "Try Again";
/// Caption under each card's number; the quote itself is only shown in the overlay.
pub const CARD_CAPTION: &str = "Rule";

/// Rows per card, borders included.
pub const CARD_HEIGHT: u16 = 5;

const HEADER_HEIGHT: u16 = 4;
const FOOTER_HEIGHT: u16 = 2;
const DIALOG_WIDTH: u16 = 72;
const DIALOG_HEIGHT: u16 = 20;
const SLIDE_ROWS: u16 = 1;
const CLOSE_GLYPH: &str = " ✕ ";

/// Loading spinner frame for animation tick `tick`.
pub fn spinner(tick: u64) -> char {
    const FRAMES: [char; 8] = ['⣾', '⣽', '⣻', '⢿', '⡿', '⣟', '⣯', '⣷'];
    FRAMES[(tick % FRAMES.len() as u64) as usize]
}

/// A centered rectangle of at most `max_width` by `max_height` inside `area`.
pub fn centered_dialog_area(area: Rect, max_width: u16, max_height: u16) -> Rect {
    let width = area.width.min(max_width);
    let height = area.height.min(max_height);
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect::new(x, y, width, height)
}

/// First visible grid row, kept so the focused card stays on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GridScroll {
    first_row: usize,
}

impl GridScroll {
    /// First visible row.
    pub fn first_row(&self) -> usize {
        self.first_row
    }

    /// Scroll the minimum needed to show `row` in a window of `visible` rows.
    pub fn follow(&mut self, row: usize, visible: usize) {
        let visible = visible.max(1);
        if row < self.first_row {
            self.first_row = row;
        } else if row >= self.first_row + visible {
            self.first_row = row + 1 - visible;
        }
    }
}

/// What a pointer position resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// A grid card, by index.
    Card(usize),
    /// A region of the open overlay.
    Overlay(OverlayHit),
    /// The error page's retry action.
    Retry,
    /// Nothing interactive.
    Nothing,
}

#[derive(Debug, Clone, Copy)]
struct DialogRegions {
    area: Rect,
    close: Rect,
    share: Rect,
    proceed: Rect,
}

/// Interactive regions of the last drawn frame.
#[derive(Debug, Clone, Default)]
pub struct HitMap {
    cards: Vec<(Rect, usize)>,
    dialog: Option<DialogRegions>,
    retry: Option<Rect>,
}

impl HitMap {
    /// Resolve a pointer position. The overlay, when drawn, takes every position.
    pub fn hit(&self, column: u16, row: u16) -> Hit {
        let position = Position::new(column, row);

        if let Some(dialog) = &self.dialog {
            let region = if dialog.close.contains(position) {
                OverlayHit::CloseButton
            } else if dialog.share.contains(position) {
                OverlayHit::Share
            } else if dialog.proceed.contains(position) {
                OverlayHit::Continue
            } else if dialog.area.contains(position) {
                OverlayHit::Content
            } else {
                OverlayHit::Backdrop
            };
            return Hit::Overlay(region);
        }

        if self.retry.is_some_and(|rect| rect.contains(position)) {
            return Hit::Retry;
        }

        self.cards
            .iter()
            .find(|(rect, _)| rect.contains(position))
            .map_or(Hit::Nothing, |(_, index)| Hit::Card(*index))
    }

    /// Number of cards on screen.
    pub fn visible_cards(&self) -> usize {
        self.cards.len()
    }
}

/// Draw the whole page.
pub fn draw(
    frame: &mut Frame<'_>,
    page: &RulesPage,
    scroll: &mut GridScroll,
    now: Instant,
    tick: u64,
) -> HitMap {
    let area = frame.area();
    let mut hits = HitMap::default();

    frame.render_widget(
        Block::new().style(Style::new().bg(theme::BACKGROUND).fg(theme::TEXT)),
        area,
    );

    let screen = page.collection.screen();
    let banner_height = match &screen {
        Screen::Grid { warning: Some(_) } => 2,
        _ => 0,
    };
    let [header, banner, body, footer] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Length(banner_height),
        Constraint::Min(0),
        Constraint::Length(FOOTER_HEIGHT),
    ])
    .areas(area);

    draw_header(frame, header);

    match &screen {
        Screen::Loading => draw_loading(frame, body, tick),
        Screen::ErrorPage { message } => hits.retry = Some(draw_error_page(frame, body, message)),
        Screen::Grid { warning } => {
            if let Some(warning) = warning {
                draw_banner(frame, banner, warning);
            }
            hits.cards = draw_grid(frame, body, page, scroll);
        }
    }

    draw_footer(frame, footer, page, &screen);

    if page.overlay.is_visible() {
        hits.dialog = draw_overlay(frame, area, page, now);
    }

    hits
}

fn draw_header(frame: &mut Frame<'_>, area: Rect) {
    let text = vec![
        Line::styled(
            BOOK_TITLE,
            Style::new().fg(theme::HEADING).add_modifier(Modifier::BOLD),
        ),
        Line::styled(SUBTITLE, Style::new().fg(theme::MUTED)),
    ];
    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_banner(frame: &mut Frame<'_>, area: Rect, warning: &str) {
    let text = vec![
        Line::styled(
            PLACEHOLDER_BANNER,
            Style::new().fg(theme::WARNING).add_modifier(Modifier::BOLD),
        ),
        Line::styled(warning.to_string(), Style::new().fg(theme::MUTED)),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_loading(frame: &mut Frame<'_>, area: Rect, tick: u64) {
    let line = Line::from(vec![
        Span::styled(spinner(tick).to_string(), Style::new().fg(theme::HEADING)),
        Span::raw(" "),
        Span::styled(LOADING_TEXT, Style::new().fg(theme::MUTED)),
    ]);
    let row = centered_dialog_area(area, area.width, 1);
    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), row);
}

fn draw_error_page(frame: &mut Frame<'_>, area: Rect, message: &str) -> Rect {
    let dialog = centered_dialog_area(area, 60, 7);
    let [title, detail, _, action] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(dialog);

    frame.render_widget(
        Paragraph::new(Line::styled(
            ERROR_TITLE,
            Style::new().fg(theme::ERROR).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        title,
    );
    frame.render_widget(
        Paragraph::new(message.to_string())
            .style(Style::new().fg(theme::MUTED))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        detail,
    );

    let label = format!("[ {RETRY_LABEL} ]");
    let button = centered_dialog_area(action, Span::raw(label.as_str()).width() as u16, 1);
    frame.render_widget(
        Paragraph::new(Line::styled(
            label,
            Style::new().fg(theme::HEADING).add_modifier(Modifier::BOLD),
        )),
        button,
    );
    button
}

fn draw_grid(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &RulesPage,
    scroll: &mut GridScroll,
) -> Vec<(Rect, usize)> {
    let collection = &page.collection;
    let columns = collection.columns();
    let cards = collection.cards();
    let mut placed = Vec::new();
    if cards.is_empty() || area.width == 0 || area.height < CARD_HEIGHT {
        return placed;
    }

    let visible_rows = usize::from(area.height / CARD_HEIGHT);
    scroll.follow(collection.focused() / columns, visible_rows);
    let card_width = area.width / columns as u16;

    for (slot, card) in cards
        .iter()
        .skip(scroll.first_row() * columns)
        .take(visible_rows * columns)
        .enumerate()
    {
        let row = (slot / columns) as u16;
        let column = (slot % columns) as u16;
        let rect = Rect::new(
            area.x + column * card_width,
            area.y + row * CARD_HEIGHT,
            card_width,
            CARD_HEIGHT,
        );
        draw_card(frame, rect, card, card.index == collection.focused());
        placed.push((rect, card.index));
    }
    placed
}

fn draw_card(frame: &mut Frame<'_>, area: Rect, card: &CardModel, focused: bool) {
    let accent = theme::accent(card.variant);
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(if focused {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(theme::card_border(card.variant, focused));

    let lines = vec![
        Line::styled(
            card.position.to_string(),
            Style::new().fg(accent).add_modifier(Modifier::BOLD),
        ),
        Line::styled(CARD_CAPTION, Style::new().fg(theme::MUTED)),
    ];
    frame.render_widget(
        Paragraph::new(lines)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

fn draw_footer(frame: &mut Frame<'_>, area: Rect, page: &RulesPage, screen: &Screen) {
    let hints = if page.overlay.is_visible() {
        "s share · Enter continue · Esc close · q quit"
    } else {
        match screen {
            Screen::Loading => "q quit",
            Screen::ErrorPage { .. } => "r try again · q quit",
            Screen::Grid { .. } => "←↑↓→ move · Enter open · q quit",
        }
    };
    let text = vec![
        Line::styled(
            FOOTER_QUOTE,
            Style::new().fg(theme::HEADING).add_modifier(Modifier::ITALIC),
        ),
        Line::styled(hints, Style::new().fg(theme::MUTED)),
    ];
    frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
}

fn draw_overlay(
    frame: &mut Frame<'_>,
    area: Rect,
    page: &RulesPage,
    now: Instant,
) -> Option<DialogRegions> {
    let overlay = &page.overlay;
    let selected = overlay.rule()?;
    let variant = CardVariant::for_index(selected.index);
    let accent = theme::accent(variant);

    let dialog = centered_dialog_area(
        area,
        DIALOG_WIDTH.min(area.width.saturating_sub(2)),
        DIALOG_HEIGHT.min(area.height.saturating_sub(2)),
    );
    frame.render_widget(Clear, dialog);

    let container = overlay.progress(OverlayElement::Container, now);
    let block = Block::new()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::new().fg(theme::fade(accent, theme::DIALOG, container)))
        .style(Style::new().bg(theme::DIALOG));
    let inner = block.inner(dialog);
    frame.render_widget(block, dialog);

    let [close_row, title, quote, attribution, page_ref, _, actions] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Min(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(inner);

    let styled = |element: OverlayElement, color| {
        Style::new().fg(theme::fade(color, theme::DIALOG, overlay.progress(element, now)))
    };
    let slid = |element: OverlayElement, rect: Rect| {
        let offset = overlay.offset(element, now, SLIDE_ROWS).min(rect.height);
        Rect::new(rect.x, rect.y + offset, rect.width, rect.height - offset)
    };

    let close = Rect::new(
        inner.right().saturating_sub(CLOSE_GLYPH.chars().count() as u16),
        close_row.y,
        (CLOSE_GLYPH.chars().count() as u16).min(inner.width),
        1,
    );
    frame.render_widget(
        Paragraph::new(CLOSE_GLYPH).style(styled(OverlayElement::CloseButton, theme::MUTED)),
        close,
    );

    if let Some(heading) = overlay.title() {
        frame.render_widget(
            Paragraph::new(heading)
                .style(styled(OverlayElement::Title, accent).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            slid(OverlayElement::Title, title),
        );
    }

    if let Some(text) = overlay.quote() {
        frame.render_widget(
            Paragraph::new(text)
                .style(styled(OverlayElement::Quote, theme::TEXT).add_modifier(Modifier::ITALIC))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            slid(OverlayElement::Quote, quote),
        );
    }

    frame.render_widget(
        Paragraph::new(ATTRIBUTION)
            .style(styled(OverlayElement::Attribution, theme::MUTED))
            .alignment(Alignment::Center),
        slid(OverlayElement::Attribution, attribution),
    );
    if let Some(line) = overlay.page_line() {
        frame.render_widget(
            Paragraph::new(line)
                .style(styled(OverlayElement::Attribution, theme::MUTED))
                .alignment(Alignment::Center),
            slid(OverlayElement::Attribution, page_ref),
        );
    }

    let share_label = format!("[ {} ]", overlay.share_label());
    let continue_label = format!("[ {CONTINUE_LABEL} ]");
    let share_width = Span::raw(share_label.as_str()).width() as u16;
    let continue_width = Span::raw(continue_label.as_str()).width() as u16;
    let gap = 3;
    let total = share_width + gap + continue_width;
    let start = actions.x + actions.width.saturating_sub(total) / 2;
    let share = Rect::new(start, actions.y, share_width.min(actions.width), 1)
        .intersection(actions);
    let proceed = Rect::new(start + share_width + gap, actions.y, continue_width, 1)
        .intersection(actions);
    let action_style = styled(OverlayElement::Actions, accent).add_modifier(Modifier::BOLD);
    frame.render_widget(Paragraph::new(share_label).style(action_style), share);
    frame.render_widget(Paragraph::new(continue_label).style(action_style), proceed);

    Some(DialogRegions {
        area: dialog,
        close,
        share,
        proceed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_follows_focus() {
        let mut scroll = GridScroll::default();
        scroll.follow(2, 3);
        assert_eq!(scroll.first_row(), 0);
        scroll.follow(5, 3);
        assert_eq!(scroll.first_row(), 3);
        scroll.follow(1, 3);
        assert_eq!(scroll.first_row(), 1);
    }

    #[test]
    fn test_centered_dialog_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_dialog_area(area, 60, 20), Rect::new(20, 10, 60, 20));
        assert_eq!(centered_dialog_area(area, 200, 80), area);
    }

    #[test]
    fn test_empty_hit_map() {
        assert_eq!(HitMap::default().hit(3, 3), Hit::Nothing);
    }
}
