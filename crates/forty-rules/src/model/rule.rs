//! The rule entity.

use serde::{Deserialize, Serialize};

/// One quote from the book.
///
/// Rows are read-only: the views clone rules into their state but never
/// mutate them. Unknown columns in the source row are ignored on decode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RuleRow")]
pub struct Rule {
    /// Unique identifier and ordering key.
    pub id: i64,
    /// The quote text. Some tables name this column `quote`.
    pub rule: String,
    /// Page reference into the source book.
    pub page: Option<i64>,
}

/// A table row as stored. The text lives in `rule`, `quote`, or both.
#[derive(Deserialize)]
struct RuleRow {
    id: i64,
    #[serde(default)]
    rule: Option<String>,
    #[serde(default)]
    quote: Option<String>,
    #[serde(default)]
    page: Option<i64>,
}

impl From<RuleRow> for Rule {
    fn from(row: RuleRow) -> Self {
        // `rule` wins unless it is blank.
        let text = row
            .rule
            .filter(|text| !text.trim().is_empty())
            .or(row.quote)
            .unwrap_or_default();
        Self {
            id: row.id,
            rule: text,
            page: row.page,
        }
    }
}

impl Rule {
    /// Create a rule without a page reference.
    pub fn new(id: i64, text: impl Into<String>) -> Self {
        Self {
            id,
            rule: text.into(),
            page: None,
        }
    }

    /// Attach a page reference.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// The quote text.
    #[inline]
    pub fn text(&self) -> &str {
        &self.rule
    }

    /// Whether there is any text to show. Blank rows are not displayable.
    pub fn has_text(&self) -> bool {
        !self.rule.trim().is_empty()
    }
}

/// Sort rules ascending by `id`.
///
/// The sort is stable, so rows sharing an id keep their relative order.
pub fn sort_by_id(rules: &mut [Rule]) {
    rules.sort_by_key(|rule| rule.id);
}
