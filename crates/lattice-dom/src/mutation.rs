//! Mutation records
//!
//! Structural and attribute mutations are journaled by the tree as they
//! happen and delivered in batches when the journal is drained, mirroring
//! how the platform coalesces mutation callbacks into one flush.

use crate::NodeId;

/// Kind of mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    /// Children added or removed
    ChildList,
    /// Attribute set or removed
    Attributes,
}

/// One journaled mutation
#[derive(Debug, Clone)]
pub struct MutationRecord {
    pub kind: MutationKind,
    /// The node the mutation happened on (the parent for child-list changes)
    pub target: NodeId,
    pub added: Vec<NodeId>,
    pub removed: Vec<NodeId>,
    pub attr_name: Option<String>,
    pub old_value: Option<String>,
}

impl MutationRecord {
    /// Record for a child-list change on `target`
    pub fn child_list(target: NodeId, added: Vec<NodeId>, removed: Vec<NodeId>) -> Self {
        Self {
            kind: MutationKind::ChildList,
            target,
            added,
            removed,
            attr_name: None,
            old_value: None,
        }
    }

    /// Record for an attribute change on `target`
    pub fn attribute(target: NodeId, name: &str, old_value: Option<String>) -> Self {
        Self {
            kind: MutationKind::Attributes,
            target,
            added: Vec::new(),
            removed: Vec::new(),
            attr_name: Some(name.to_string()),
            old_value,
        }
    }
}
