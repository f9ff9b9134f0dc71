//! Lattice DOM - host-page platform primitives
//!
//! The light-DOM tree, shadow roots, and mutation journal that the
//! component runtime builds on. Widgets never own light-DOM content;
//! they only hold `NodeId` references into a tree owned by the host page.

mod mutation;
mod names;
mod node;
mod tree;

pub use mutation::{MutationKind, MutationRecord};
pub use names::is_valid_custom_name;
pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::{ChildIds, DomError, DomTree};

/// Node identifier (index into the tree arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check whether this id refers to a node at all
    #[inline]
    pub fn is_valid(self) -> bool {
        self != Self::NONE
    }

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        NodeId(index as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}
