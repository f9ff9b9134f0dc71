//! Slot mutation watching
//!
//! A connected instance watches its host's direct light-DOM children so
//! external content edits re-enter the render path without caller
//! involvement. The watcher is a structural filter over the platform
//! mutation journal: child-list changes on the host and `slot`-attribute
//! changes on direct children match; unrelated attribute churn does not.
//! However many records match within one flush, the instance re-renders
//! once.

use lattice_dom::{DomTree, MutationKind, MutationRecord, NodeId};

/// Watches one host element's slotted content
#[derive(Debug, Clone)]
pub struct SlotObserver {
    host: NodeId,
    connected: bool,
    pending: bool,
}

impl SlotObserver {
    /// Start watching a host element
    pub fn observe(host: NodeId) -> Self {
        Self {
            host,
            connected: true,
            pending: false,
        }
    }

    pub fn host(&self) -> NodeId {
        self.host
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Feed one journaled mutation through the structural filter
    pub fn note(&mut self, tree: &DomTree, record: &MutationRecord) {
        if self.connected && self.matches(tree, record) {
            self.pending = true;
        }
    }

    fn matches(&self, tree: &DomTree, record: &MutationRecord) -> bool {
        match record.kind {
            MutationKind::ChildList => record.target == self.host,
            MutationKind::Attributes => {
                record.attr_name.as_deref() == Some("slot")
                    && tree.parent(record.target) == Some(self.host)
            }
        }
    }

    /// Whether a matching mutation arrived since the last flush. Clears the
    /// flag, collapsing any burst of mutations into one change signal.
    pub fn take_pending(&mut self) -> bool {
        std::mem::take(&mut self.pending)
    }

    /// Stop watching. Safe to call any number of times.
    pub fn disconnect(&mut self) {
        self.connected = false;
        self.pending = false;
    }
}
