//! Arena-backed host tree with a change journal
//!
//! Stands in for the live tree a third-party component re-renders: element
//! nodes carry a tag, attributes, and children; leaves carry mutable text.
//! Every mutation that changes state appends a [`ChangeRecord`] to an
//! internal journal; [`Tree::take_changes`] drains the journal as one batch.
//! Writes that leave a value unchanged emit nothing, which is what lets the
//! repair pipeline settle.

use crate::change::ChangeRecord;
use std::collections::BTreeMap;

/// Opaque handle to a node in the tree arena
///
/// Ids stay valid for the lifetime of the tree; nodes removed from the
/// rendered structure are marked detached, never destroyed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug)]
enum NodeKind {
    Element {
        tag: String,
        attributes: BTreeMap<String, String>,
        children: Vec<NodeId>,
    },
    Leaf {
        text: String,
    },
}

#[derive(Debug)]
struct Node {
    parent: Option<NodeId>,
    detached: bool,
    kind: NodeKind,
}

/// The host tree
#[derive(Debug)]
pub struct Tree {
    nodes: Vec<Node>,
    root: NodeId,
    journal: Vec<ChangeRecord>,
}

impl Tree {
    /// Create a tree with a single root element
    pub fn new(root_tag: &str) -> Self {
        let root_node = Node {
            parent: None,
            detached: false,
            kind: NodeKind::Element {
                tag: root_tag.to_string(),
                attributes: BTreeMap::new(),
                children: Vec::new(),
            },
        };
        Self {
            nodes: vec![root_node],
            root: NodeId(0),
            journal: Vec::new(),
        }
    }

    /// The root element
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Whether the id refers to a node in this tree
    pub fn contains(&self, id: NodeId) -> bool {
        id.0 < self.nodes.len()
    }

    /// Whether the node is still part of the rendered structure
    pub fn is_attached(&self, id: NodeId) -> bool {
        self.contains(id) && !self.nodes[id.0].detached
    }

    /// Whether the node is a text leaf
    pub fn is_leaf(&self, id: NodeId) -> bool {
        matches!(self.nodes[id.0].kind, NodeKind::Leaf { .. })
    }

    /// The element tag, or `None` for leaves
    pub fn tag(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { tag, .. } => Some(tag),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// The leaf text, or `None` for elements
    pub fn leaf_text(&self, id: NodeId) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Leaf { text } => Some(text),
            NodeKind::Element { .. } => None,
        }
    }

    /// Child ids of an element, in document order; empty for leaves
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        match &self.nodes[id.0].kind {
            NodeKind::Element { children, .. } => children,
            NodeKind::Leaf { .. } => &[],
        }
    }

    /// One attribute value of an element
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => attributes.get(name).map(String::as_str),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// All attributes of an element
    pub fn attributes(&self, id: NodeId) -> Option<&BTreeMap<String, String>> {
        match &self.nodes[id.0].kind {
            NodeKind::Element { attributes, .. } => Some(attributes),
            NodeKind::Leaf { .. } => None,
        }
    }

    /// Append a child element and report the structural change
    pub fn append_element(&mut self, parent: NodeId, tag: &str) -> NodeId {
        let id = self.push_node(
            parent,
            NodeKind::Element {
                tag: tag.to_string(),
                attributes: BTreeMap::new(),
                children: Vec::new(),
            },
        );
        self.journal.push(ChangeRecord::child_list(parent));
        id
    }

    /// Append a text leaf and report the structural change
    pub fn append_leaf(&mut self, parent: NodeId, text: &str) -> NodeId {
        let id = self.push_node(
            parent,
            NodeKind::Leaf {
                text: text.to_string(),
            },
        );
        self.journal.push(ChangeRecord::child_list(parent));
        id
    }

    /// Set an attribute; identical writes emit no change record
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) {
        let NodeKind::Element { attributes, .. } = &mut self.nodes[id.0].kind else {
            return;
        };
        if attributes.get(name).map(String::as_str) == Some(value) {
            return;
        }
        attributes.insert(name.to_string(), value.to_string());
        self.journal.push(ChangeRecord::attributes(id, name));
    }

    /// Rewrite a leaf's text; identical writes emit no change record
    ///
    /// The change is reported against the leaf's parent element, matching
    /// the subtree scoping the dispatcher scans with.
    pub fn set_leaf_text(&mut self, id: NodeId, text: &str) {
        let parent = self.nodes[id.0].parent.unwrap_or(id);
        let NodeKind::Leaf { text: current } = &mut self.nodes[id.0].kind else {
            return;
        };
        if current == text {
            return;
        }
        *current = text.to_string();
        self.journal.push(ChangeRecord::character_data(parent));
    }

    /// Replace an element's content with a single text leaf
    ///
    /// Mirrors an `innerText` assignment: previous children are detached.
    /// A write equal to the element's current rendered text is a no-op.
    pub fn set_element_text(&mut self, id: NodeId, text: &str) {
        if !matches!(self.nodes[id.0].kind, NodeKind::Element { .. }) {
            return;
        }
        if self.text_of(id) == text {
            return;
        }
        let old_children = match &mut self.nodes[id.0].kind {
            NodeKind::Element { children, .. } => std::mem::take(children),
            NodeKind::Leaf { .. } => unreachable!(),
        };
        for child in old_children {
            self.detach_recursive(child);
        }
        self.push_node(
            id,
            NodeKind::Leaf {
                text: text.to_string(),
            },
        );
        self.journal.push(ChangeRecord::child_list(id));
    }

    /// Concatenated descendant leaf text in document order
    ///
    /// For a leaf, its own text.
    pub fn text_of(&self, id: NodeId) -> String {
        let mut out = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match &self.nodes[current.0].kind {
                NodeKind::Leaf { text } => out.push_str(text),
                NodeKind::Element { children, .. } => {
                    stack.extend(children.iter().rev().copied());
                }
            }
        }
        out
    }

    /// Text leaves under a subtree, in document order, filtered by a
    /// predicate over their text content
    pub fn leaves_where<F>(&self, root: NodeId, accept: F) -> Vec<NodeId>
    where
        F: Fn(&str) -> bool,
    {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            match &self.nodes[current.0].kind {
                NodeKind::Leaf { text } => {
                    if accept(text) {
                        out.push(current);
                    }
                }
                NodeKind::Element { children, .. } => {
                    stack.extend(children.iter().rev().copied());
                }
            }
        }
        out
    }

    /// Elements under a subtree whose combined rendered text contains the
    /// needle, in document order (the subtree root included when it matches)
    pub fn elements_containing(&self, root: NodeId, needle: &str) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![root];
        while let Some(current) = stack.pop() {
            if let NodeKind::Element { children, .. } = &self.nodes[current.0].kind {
                if self.text_of(current).contains(needle) {
                    out.push(current);
                }
                stack.extend(children.iter().rev().copied());
            }
        }
        out
    }

    /// Drain the pending change journal as one batch
    pub fn take_changes(&mut self) -> Vec<ChangeRecord> {
        std::mem::take(&mut self.journal)
    }

    /// Number of pending change records
    pub fn pending_changes(&self) -> usize {
        self.journal.len()
    }

    fn push_node(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        assert!(
            matches!(self.nodes[parent.0].kind, NodeKind::Element { .. }),
            "cannot append a child to a text leaf"
        );
        let detached = self.nodes[parent.0].detached;
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            parent: Some(parent),
            detached,
            kind,
        });
        match &mut self.nodes[parent.0].kind {
            NodeKind::Element { children, .. } => children.push(id),
            NodeKind::Leaf { .. } => unreachable!(),
        }
        id
    }

    fn detach_recursive(&mut self, id: NodeId) {
        self.nodes[id.0].detached = true;
        self.nodes[id.0].parent = None;
        let children = match &self.nodes[id.0].kind {
            NodeKind::Element { children, .. } => children.clone(),
            NodeKind::Leaf { .. } => Vec::new(),
        };
        for child in children {
            self.detach_recursive(child);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::change::ChangeKind;

    fn sample_tree() -> (Tree, NodeId, NodeId) {
        let mut tree = Tree::new("body");
        let card = tree.append_element(tree.root(), "div");
        let title = tree.append_element(card, "span");
        tree.append_leaf(title, "Next delivery");
        let price = tree.append_element(card, "span");
        tree.append_leaf(price, "19,99€");
        (tree, card, price)
    }

    #[test]
    fn text_of_concatenates_in_document_order() {
        let (tree, card, _) = sample_tree();
        assert_eq!(tree.text_of(card), "Next delivery19,99€");
    }

    #[test]
    fn leaves_where_filters_and_preserves_order() {
        let (tree, card, _) = sample_tree();
        let all = tree.leaves_where(card, |_| true);
        assert_eq!(all.len(), 2);
        assert_eq!(tree.leaf_text(all[0]), Some("Next delivery"));
        assert_eq!(tree.leaf_text(all[1]), Some("19,99€"));

        let priced = tree.leaves_where(card, |text| text.contains('€'));
        assert_eq!(priced.len(), 1);
    }

    #[test]
    fn elements_containing_matches_combined_text() {
        let (tree, card, price) = sample_tree();
        let hits = tree.elements_containing(tree.root(), "€");
        // body, div, and the price span all render the marker
        assert_eq!(hits, vec![tree.root(), card, price]);
    }

    #[test]
    fn identical_writes_emit_no_change_records() {
        let (mut tree, _, price) = sample_tree();
        tree.take_changes();

        let leaf = tree.leaves_where(price, |_| true)[0];
        tree.set_leaf_text(leaf, "19,99€");
        tree.set_element_text(price, "19,99€");
        tree.set_attribute(tree.root(), "style", "color: red");
        tree.set_attribute(tree.root(), "style", "color: red");
        assert_eq!(tree.take_changes().len(), 1);
    }

    #[test]
    fn set_element_text_detaches_old_children() {
        let (mut tree, _, price) = sample_tree();
        let old_leaf = tree.leaves_where(price, |_| true)[0];
        tree.take_changes();

        tree.set_element_text(price, "19,99 €");
        assert!(!tree.is_attached(old_leaf));
        assert_eq!(tree.text_of(price), "19,99 €");

        let batch = tree.take_changes();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].kind, ChangeKind::ChildList);
        assert_eq!(batch[0].target, price);
    }

    #[test]
    fn leaf_edit_reports_the_parent_element() {
        let (mut tree, _, price) = sample_tree();
        let leaf = tree.leaves_where(price, |_| true)[0];
        tree.take_changes();

        tree.set_leaf_text(leaf, "cheap");
        let batch = tree.take_changes();
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].kind, ChangeKind::CharacterData);
        assert_eq!(batch[0].target, price);
    }
}
