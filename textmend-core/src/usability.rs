//! Accessory fixer for a blocking inline style
//!
//! The third-party component occasionally re-renders the root container
//! with `pointer-events: none` left in its inline style, freezing the whole
//! page. This fixer watches attribute changes on the root and strips the
//! property again.

use crate::change::{ChangeKind, ChangeRecord};
use crate::tree::Tree;

const STYLE_ATTRIBUTE: &str = "style";

/// Reverts a blocking inline style property on the root container
#[derive(Debug, Clone)]
pub struct UsabilityFixer {
    property: String,
}

impl UsabilityFixer {
    /// Fixer for the default `pointer-events` property
    pub fn new() -> Self {
        Self::for_property("pointer-events")
    }

    /// Fixer for a custom property name
    pub fn for_property(property: &str) -> Self {
        Self {
            property: property.to_string(),
        }
    }

    /// Check one change record and strip the property when it applies
    ///
    /// Only a `style` attribute change on the root container qualifies.
    /// When the property is absent nothing is written, so the fixer's own
    /// rewrite never re-triggers it.
    pub fn inspect(&self, tree: &mut Tree, record: &ChangeRecord) {
        if record.target != tree.root() || record.kind != ChangeKind::Attributes {
            return;
        }
        if record.attribute_name.as_deref() != Some(STYLE_ATTRIBUTE) {
            return;
        }
        let Some(style) = tree
            .attribute(record.target, STYLE_ATTRIBUTE)
            .map(str::to_string)
        else {
            return;
        };
        if let Some(cleaned) = remove_declaration(&style, &self.property) {
            log::debug!("removing blocking '{}' declaration from root style", self.property);
            tree.set_attribute(record.target, STYLE_ATTRIBUTE, &cleaned);
        }
    }
}

impl Default for UsabilityFixer {
    fn default() -> Self {
        Self::new()
    }
}

/// Remove one declaration from an inline style string; `None` when the
/// property was not present
fn remove_declaration(style: &str, property: &str) -> Option<String> {
    let mut removed = false;
    let kept: Vec<&str> = style
        .split(';')
        .map(str::trim)
        .filter(|declaration| !declaration.is_empty())
        .filter(|declaration| {
            let name = declaration.split(':').next().unwrap_or("").trim();
            if name.eq_ignore_ascii_case(property) {
                removed = true;
                false
            } else {
                true
            }
        })
        .collect();
    removed.then(|| kept.join("; "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_blocking_property_from_root_style() {
        let mut tree = Tree::new("body");
        tree.set_attribute(tree.root(), "style", "pointer-events: none; color: red");
        let batch = tree.take_changes();

        let fixer = UsabilityFixer::new();
        fixer.inspect(&mut tree, &batch[0]);
        assert_eq!(tree.attribute(tree.root(), "style"), Some("color: red"));
    }

    #[test]
    fn second_pass_writes_nothing() {
        let mut tree = Tree::new("body");
        tree.set_attribute(tree.root(), "style", "pointer-events: none");
        let batch = tree.take_changes();

        let fixer = UsabilityFixer::new();
        fixer.inspect(&mut tree, &batch[0]);
        let follow_up = tree.take_changes();
        assert_eq!(follow_up.len(), 1);

        fixer.inspect(&mut tree, &follow_up[0]);
        assert!(tree.take_changes().is_empty());
        assert_eq!(tree.attribute(tree.root(), "style"), Some(""));
    }

    #[test]
    fn ignores_changes_below_the_root() {
        let mut tree = Tree::new("body");
        let child = tree.append_element(tree.root(), "div");
        tree.set_attribute(child, "style", "pointer-events: none");
        let batch = tree.take_changes();

        let fixer = UsabilityFixer::new();
        for record in &batch {
            fixer.inspect(&mut tree, record);
        }
        assert_eq!(
            tree.attribute(child, "style"),
            Some("pointer-events: none")
        );
    }

    #[test]
    fn ignores_other_attributes() {
        let mut tree = Tree::new("body");
        tree.set_attribute(tree.root(), "class", "pointer-events: none");
        let batch = tree.take_changes();

        UsabilityFixer::new().inspect(&mut tree, &batch[0]);
        assert_eq!(
            tree.attribute(tree.root(), "class"),
            Some("pointer-events: none")
        );
    }

    #[test]
    fn remove_declaration_keeps_other_properties() {
        assert_eq!(
            remove_declaration("color: red; pointer-events: none; margin: 0", "pointer-events"),
            Some("color: red; margin: 0".to_string())
        );
        assert_eq!(remove_declaration("color: red", "pointer-events"), None);
    }
}
