//! Placeholder rules shown when the source cannot be reached.

use super::rule::Rule;

/// Number of placeholder rules.
pub const PLACEHOLDER_COUNT: usize = 40;

/// Text of placeholder rule `n`.
pub fn placeholder_text(n: i64) -> String {
    format!("This is rule number {n} - quote will be loaded from the rules source")
}

/// The deterministic placeholder sequence: ids `1..=40` in order.
pub fn placeholder_rules() -> Vec<Rule> {
    (1..=PLACEHOLDER_COUNT as i64)
        .map(|n| Rule::new(n, placeholder_text(n)))
        .collect()
}
