//! Element-level currency sweep
//!
//! Finds elements whose rendered text carries the currency marker next to a
//! raw digit, reformats the number with de-DE grouping, and rewrites the
//! element text as `<number> <marker>`. The candidate list is collected in
//! full before any element is mutated; mutating while the query's result
//! set is still being walked is unsafe.

use crate::error::{CoreError, Result};
use crate::locale;
use crate::tree::{NodeId, Tree};
use regex::Regex;

/// Default currency marker
pub const DEFAULT_MARKER: char = '€';

/// Reformats unformatted monetary text under a subtree
pub struct CurrencySweep {
    marker: char,
    needle: String,
    digit_before_marker: Regex,
    digit_after_marker: Regex,
}

impl CurrencySweep {
    /// Sweep for the default `€` marker
    pub fn new() -> Result<Self> {
        Self::with_marker(DEFAULT_MARKER)
    }

    /// Sweep for a custom marker
    pub fn with_marker(marker: char) -> Result<Self> {
        let needle = marker.to_string();
        let escaped = regex::escape(&needle);
        let digit_before_marker = compile(&format!("[0-9]{escaped}"))?;
        let digit_after_marker = compile(&format!("{escaped},?[0-9]"))?;
        Ok(Self {
            marker,
            needle,
            digit_before_marker,
            digit_after_marker,
        })
    }

    /// The secondary trigger: a digit adjacent to the marker, either side,
    /// optionally across the decimal separator
    ///
    /// The formatted shape `19,99 €` separates digit and marker with a
    /// space and never triggers, which is what terminates the rewrite loop.
    pub fn needs_formatting(&self, text: &str) -> bool {
        self.digit_before_marker.is_match(text) || self.digit_after_marker.is_match(text)
    }

    /// Collect all marker-bearing elements under `root`, then rewrite the
    /// ones that trigger
    ///
    /// A candidate whose remaining text is not a numeric literal is left
    /// untouched; the failure never stops the remaining candidates from
    /// being processed.
    pub fn sweep(&self, tree: &mut Tree, root: NodeId) {
        let candidates = tree.elements_containing(root, &self.needle);
        // Innermost elements first: once "19,99€" inside a wrapper becomes
        // "19,99 €", the wrapper's own combined text no longer triggers.
        for id in candidates.into_iter().rev() {
            if !tree.is_attached(id) {
                continue;
            }
            let text = tree.text_of(id);
            if !self.needs_formatting(&text) {
                continue;
            }
            let stripped: String = text.chars().filter(|c| *c != self.marker).collect();
            match locale::parse_decimal_de(stripped.trim()) {
                Some(number) => {
                    let formatted = locale::format_decimal_de(&number);
                    tree.set_element_text(id, &format!("{} {}", formatted, self.marker));
                }
                None => {
                    log::debug!(
                        "currency candidate is not a numeric literal, leaving it unchanged"
                    );
                }
            }
        }
    }
}

fn compile(pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|e| CoreError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price_tree(texts: &[&str]) -> (Tree, Vec<NodeId>) {
        let mut tree = Tree::new("body");
        let mut prices = Vec::new();
        for text in texts {
            let price = tree.append_element(tree.root(), "span");
            tree.append_leaf(price, text);
            prices.push(price);
        }
        tree.take_changes();
        (tree, prices)
    }

    #[test]
    fn reformats_digit_adjacent_to_marker() {
        let (mut tree, prices) = price_tree(&["19,99€"]);
        let root = tree.root();
        CurrencySweep::new().unwrap().sweep(&mut tree, root);
        assert_eq!(tree.text_of(prices[0]), "19,99 €");
    }

    #[test]
    fn groups_large_amounts() {
        let (mut tree, prices) = price_tree(&["1234567,50€"]);
        let root = tree.root();
        CurrencySweep::new().unwrap().sweep(&mut tree, root);
        assert_eq!(tree.text_of(prices[0]), "1.234.567,50 €");
    }

    #[test]
    fn marker_before_digit_also_triggers() {
        let (mut tree, prices) = price_tree(&["€5"]);
        let root = tree.root();
        CurrencySweep::new().unwrap().sweep(&mut tree, root);
        assert_eq!(tree.text_of(prices[0]), "5 €");
    }

    #[test]
    fn formatted_text_is_left_alone() {
        let (mut tree, prices) = price_tree(&["19,99 €"]);
        let root = tree.root();
        CurrencySweep::new().unwrap().sweep(&mut tree, root);
        assert_eq!(tree.text_of(prices[0]), "19,99 €");
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn sweep_is_idempotent() {
        let (mut tree, prices) = price_tree(&["19,99€"]);
        let sweep = CurrencySweep::new().unwrap();
        let root = tree.root();
        sweep.sweep(&mut tree, root);
        tree.take_changes();

        let root = tree.root();
        sweep.sweep(&mut tree, root);
        assert_eq!(tree.text_of(prices[0]), "19,99 €");
        assert!(tree.take_changes().is_empty());
    }

    #[test]
    fn parse_failure_is_isolated_per_element() {
        let (mut tree, prices) = price_tree(&["wow€1deal", "19,99€"]);
        let root = tree.root();
        CurrencySweep::new().unwrap().sweep(&mut tree, root);
        // the garbled sibling keeps its text, the valid one is reformatted
        assert_eq!(tree.text_of(prices[0]), "wow€1deal");
        assert_eq!(tree.text_of(prices[1]), "19,99 €");
    }

    #[test]
    fn unrelated_marker_occurrence_does_not_trigger() {
        let (mut tree, prices) = price_tree(&["Preise in €"]);
        let root = tree.root();
        CurrencySweep::new().unwrap().sweep(&mut tree, root);
        assert_eq!(tree.text_of(prices[0]), "Preise in €");
    }
}
