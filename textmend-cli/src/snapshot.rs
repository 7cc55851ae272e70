//! JSON tree snapshots
//!
//! A recursive serde form of the host tree, used to feed page captures
//! through the pipeline and to write the repaired result back out.

use crate::error::CliError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use textmend_core::{NodeId, Tree};

/// One node of a serialized tree
///
/// Elements carry `tag`, optional `attributes`, and `children`; text leaves
/// carry only `text`. The two shapes are disjoint, so the representation
/// stays untagged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NodeSnapshot {
    /// A text leaf
    Text {
        /// The leaf content
        text: String,
    },
    /// An element with children
    Element {
        /// The element tag
        tag: String,
        /// Attribute name/value pairs
        #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
        attributes: BTreeMap<String, String>,
        /// Child nodes, in document order
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        children: Vec<NodeSnapshot>,
    },
}

/// Build a live tree from a snapshot; the root must be an element
///
/// Every append goes through the journaling tree API, so the freshly built
/// tree already carries the change batch that seeds the pipeline.
pub fn build_tree(snapshot: &NodeSnapshot) -> Result<Tree, CliError> {
    let NodeSnapshot::Element {
        tag,
        attributes,
        children,
    } = snapshot
    else {
        return Err(CliError::InvalidSnapshot(
            "root node must be an element".to_string(),
        ));
    };
    let mut tree = Tree::new(tag);
    let root = tree.root();
    for (name, value) in attributes {
        tree.set_attribute(root, name, value);
    }
    for child in children {
        append_snapshot(&mut tree, root, child);
    }
    Ok(tree)
}

fn append_snapshot(tree: &mut Tree, parent: NodeId, snapshot: &NodeSnapshot) {
    match snapshot {
        NodeSnapshot::Text { text } => {
            tree.append_leaf(parent, text);
        }
        NodeSnapshot::Element {
            tag,
            attributes,
            children,
        } => {
            let id = tree.append_element(parent, tag);
            for (name, value) in attributes {
                tree.set_attribute(id, name, value);
            }
            for child in children {
                append_snapshot(tree, id, child);
            }
        }
    }
}

/// Serialize a tree back into its snapshot form
pub fn from_tree(tree: &Tree) -> NodeSnapshot {
    node_snapshot(tree, tree.root())
}

fn node_snapshot(tree: &Tree, id: NodeId) -> NodeSnapshot {
    if let Some(text) = tree.leaf_text(id) {
        return NodeSnapshot::Text {
            text: text.to_string(),
        };
    }
    NodeSnapshot::Element {
        tag: tree.tag(id).unwrap_or_default().to_string(),
        attributes: tree.attributes(id).cloned().unwrap_or_default(),
        children: tree
            .children(id)
            .iter()
            .map(|child| node_snapshot(tree, *child))
            .collect(),
    }
}
