//! Two-phase leaf scanner
//!
//! Walks all text leaves under a changed subtree, classifies each (first
//! recognizer wins), and only then applies the captured rewrites. The two
//! passes are strictly separated: rewriting mid-walk could corrupt the
//! traversal or re-classify a half-rewritten leaf against mutated text.

use crate::classify::{Classification, Classifiers};
use crate::dictionary::Dictionary;
use crate::error::Result;
use crate::tree::{NodeId, Tree};
use std::sync::Arc;

/// Scans and rewrites text leaves under a subtree
pub struct TextScanner {
    classifiers: Classifiers,
    dictionary: Arc<Dictionary>,
}

impl TextScanner {
    /// Scanner with the default recognizer set
    pub fn new(dictionary: Arc<Dictionary>) -> Result<Self> {
        Ok(Self {
            classifiers: Classifiers::new()?,
            dictionary,
        })
    }

    /// Scanner with a custom classifier set
    pub fn with_classifiers(dictionary: Arc<Dictionary>, classifiers: Classifiers) -> Self {
        Self {
            classifiers,
            dictionary,
        }
    }

    /// Classify every leaf under `root`, then apply the captured rewrites
    /// in document order
    pub fn scan(&self, tree: &mut Tree, root: NodeId) {
        let candidates = tree.leaves_where(root, |text| !text.trim().is_empty());

        // Phase 1: classify; nothing is mutated here.
        let mut accepted: Vec<(NodeId, Classification<'_>)> = Vec::new();
        for id in candidates {
            let Some(text) = tree.leaf_text(id) else {
                continue;
            };
            if let Some(classification) = self.classifiers.classify(text, &self.dictionary) {
                accepted.push((id, classification));
            }
        }

        // Phase 2: apply the captured rewrites.
        for (id, classification) in accepted {
            match classification {
                Classification::Date { rendered, .. } => {
                    tree.set_leaf_text(id, &rendered);
                }
                Classification::Dictionary { phrases } => {
                    let Some(current) = tree.leaf_text(id) else {
                        continue;
                    };
                    let mut next = current.to_string();
                    for entry in phrases {
                        next = next.replace(entry.source.as_str(), entry.target.as_str());
                    }
                    tree.set_leaf_text(id, &next);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::Classifiers;
    use crate::dictionary::default_german;

    fn scanner() -> TextScanner {
        TextScanner::with_classifiers(
            Arc::new(default_german().clone()),
            Classifiers::with_reference_year(2024).unwrap(),
        )
    }

    fn single_leaf_tree(text: &str) -> (Tree, NodeId) {
        let mut tree = Tree::new("body");
        let leaf = tree.append_leaf(tree.root(), text);
        tree.take_changes();
        (tree, leaf)
    }

    #[test]
    fn rewrites_date_leaves() {
        let (mut tree, leaf) = single_leaf_tree("June 3rd, 2024");
        let root = tree.root();
        scanner().scan(&mut tree, root);
        assert_eq!(tree.leaf_text(leaf), Some("03. Juni 2024"));
    }

    #[test]
    fn longest_phrase_wins_without_cross_contamination() {
        let (mut tree, leaf) = single_leaf_tree("Pause Subscription");
        let root = tree.root();
        scanner().scan(&mut tree, root);
        assert_eq!(tree.leaf_text(leaf), Some("Abonnement pausieren ;("));
    }

    #[test]
    fn substitutes_all_occurrences_of_each_phrase() {
        let (mut tree, leaf) = single_leaf_tree("Subscription and Subscription");
        let root = tree.root();
        scanner().scan(&mut tree, root);
        assert_eq!(tree.leaf_text(leaf), Some("Abonnement and Abonnement"));
    }

    #[test]
    fn scans_every_leaf_under_the_subtree() {
        let mut tree = Tree::new("body");
        let card = tree.append_element(tree.root(), "div");
        let first = tree.append_leaf(card, "Next delivery");
        let nested = tree.append_element(card, "span");
        let second = tree.append_leaf(nested, "3 Wochen");
        let third = tree.append_leaf(card, "Paused");
        tree.take_changes();

        scanner().scan(&mut tree, card);
        assert_eq!(tree.leaf_text(first), Some("Nächste Lieferung"));
        assert_eq!(tree.leaf_text(second), Some("3 Wochen"));
        assert_eq!(tree.leaf_text(third), Some("Pausiert"));
    }

    #[test]
    fn second_scan_changes_nothing() {
        let (mut tree, _) = single_leaf_tree("Pause until June 3rd");
        let scanner = scanner();
        let root = tree.root();
        scanner.scan(&mut tree, root);
        let after_first = tree.text_of(tree.root());
        tree.take_changes();

        let root = tree.root();
        scanner.scan(&mut tree, root);
        assert_eq!(tree.text_of(tree.root()), after_first);
        assert!(tree.take_changes().is_empty());
    }
}
