//! Colours for the terminal surface.

use ratatui::style::{Color, Modifier, Style};

use crate::view::CardVariant;
use crate::widget::animation::{Easing, lerp_eased};

/// Page background.
pub const BACKGROUND: Color = Color::Rgb(250, 245, 255);
/// Body text.
pub const TEXT: Color = Color::Rgb(55, 48, 72);
/// Secondary text.
pub const MUTED: Color = Color::Rgb(120, 113, 140);
/// Heading accent.
pub const HEADING: Color = Color::Rgb(124, 58, 237);
/// Warning banner.
pub const WARNING: Color = Color::Rgb(180, 83, 9);
/// Error page.
pub const ERROR: Color = Color::Rgb(190, 18, 60);
/// Overlay dialog background.
pub const DIALOG: Color = Color::Rgb(255, 255, 255);

/// Accent colour of a card variant.
pub fn accent(variant: CardVariant) -> Color {
    match variant {
        CardVariant::Violet => Color::Rgb(139, 92, 246),
        CardVariant::Rose => Color::Rgb(244, 63, 94),
        CardVariant::Emerald => Color::Rgb(16, 185, 129),
        CardVariant::Amber => Color::Rgb(245, 158, 11),
        CardVariant::Blue => Color::Rgb(59, 130, 246),
        CardVariant::Purple => Color::Rgb(168, 85, 247),
        CardVariant::Pink => Color::Rgb(236, 72, 153),
        CardVariant::Indigo => Color::Rgb(99, 102, 241),
        CardVariant::Teal => Color::Rgb(20, 184, 166),
        CardVariant::Orange => Color::Rgb(249, 115, 22),
        CardVariant::Cyan => Color::Rgb(6, 182, 212),
        CardVariant::Lime => Color::Rgb(132, 204, 22),
    }
}

/// Card border style; the focused card is drawn bold in its accent colour.
pub fn card_border(variant: CardVariant, focused: bool) -> Style {
    let style = Style::default().fg(accent(variant));
    if focused {
        style.add_modifier(Modifier::BOLD)
    } else {
        style.add_modifier(Modifier::DIM)
    }
}

/// Blend `color` toward `base` as `visibility` goes from 1.0 to 0.0.
///
/// Non-RGB colours snap: visible above one half, `base` below.
pub fn fade(color: Color, base: Color, visibility: f32) -> Color {
    let t = visibility.clamp(0.0, 1.0);
    match (color, base) {
        (Color::Rgb(r, g, b), Color::Rgb(br, bg, bb)) => {
            let mix = |from: u8, to: u8| {
                lerp_eased(Easing::Linear, f32::from(to), f32::from(from), t).round() as u8
            };
            Color::Rgb(mix(r, br), mix(g, bg), mix(b, bb))
        }
        _ if t >= 0.5 => color,
        _ => base,
    }
}
