//! Change records emitted by the tree journal
//!
//! Every mutation that actually changes tree state is reported as a
//! [`ChangeRecord`]. Records are drained in batches and consumed exactly
//! once per dispatcher pass; rewrites performed while a batch is being
//! processed surface in a later batch, never in the current one.

use crate::tree::NodeId;

/// What kind of change a record describes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    /// Children were added to or replaced under the target element
    ChildList,
    /// The text content of a leaf under the target changed
    CharacterData,
    /// An attribute of the target element changed
    Attributes,
}

/// One reported structural, content, or attribute change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRecord {
    /// The node the change happened on (the parent element for leaf edits)
    pub target: NodeId,
    /// The kind of change
    pub kind: ChangeKind,
    /// The attribute name, for [`ChangeKind::Attributes`] records
    pub attribute_name: Option<String>,
}

impl ChangeRecord {
    /// Create a structural change record
    pub fn child_list(target: NodeId) -> Self {
        Self {
            target,
            kind: ChangeKind::ChildList,
            attribute_name: None,
        }
    }

    /// Create a text-content change record
    pub fn character_data(target: NodeId) -> Self {
        Self {
            target,
            kind: ChangeKind::CharacterData,
            attribute_name: None,
        }
    }

    /// Create an attribute change record
    pub fn attributes(target: NodeId, name: &str) -> Self {
        Self {
            target,
            kind: ChangeKind::Attributes,
            attribute_name: Some(name.to_string()),
        }
    }
}
