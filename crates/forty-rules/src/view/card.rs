//! Card presentation data.

use crate::model::Rule;

/// Number of colour variants cards cycle through.
pub const PALETTE_SIZE: usize = 12;

/// Colour variant of a card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardVariant {
    Violet,
    Rose,
    Emerald,
    Amber,
    Blue,
    Purple,
    Pink,
    Indigo,
    Teal,
    Orange,
    Cyan,
    Lime,
}

impl CardVariant {
    /// Every variant in palette order.
    pub const ALL: [CardVariant; PALETTE_SIZE] = [
        Self::Violet,
        Self::Rose,
        Self::Emerald,
        Self::Amber,
        Self::Blue,
        Self::Purple,
        Self::Pink,
        Self::Indigo,
        Self::Teal,
        Self::Orange,
        Self::Cyan,
        Self::Lime,
    ];

    /// The variant for the card at grid index `index`.
    pub fn for_index(index: usize) -> Self {
        Self::ALL[index % PALETTE_SIZE]
    }

    /// Position in the palette.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Lowercase colour name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Violet => "violet",
            Self::Rose => "rose",
            Self::Emerald => "emerald",
            Self::Amber => "amber",
            Self::Blue => "blue",
            Self::Purple => "purple",
            Self::Pink => "pink",
            Self::Indigo => "indigo",
            Self::Teal => "teal",
            Self::Orange => "orange",
            Self::Cyan => "cyan",
            Self::Lime => "lime",
        }
    }
}

/// What a single grid card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardModel {
    /// Id of the rule behind the card.
    pub rule_id: i64,
    /// Zero-based grid index.
    pub index: usize,
    /// One-based number shown on the card.
    pub position: usize,
    /// Colour variant.
    pub variant: CardVariant,
}

impl CardModel {
    /// Card for `rule` at grid index `index`.
    pub fn new(rule: &Rule, index: usize) -> Self {
        Self {
            rule_id: rule.id,
            index,
            position: index + 1,
            variant: CardVariant::for_index(index),
        }
    }

    /// Palette index, `index mod PALETTE_SIZE`.
    pub fn variant_index(&self) -> usize {
        self.variant.index()
    }
}
