//! DOM tree (arena-based allocation)
//!
//! One arena holds the light DOM, every shadow subtree, and any detached
//! fragments (clones, defaults). Structural and attribute mutations are
//! appended to a journal that observers drain in batches.

use std::collections::HashMap;

use crate::{MutationRecord, Node, NodeData, NodeId};

/// Platform-level DOM errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    #[error("node is not an element")]
    NotAnElement,

    #[error("element already has a shadow root")]
    ShadowAlreadyAttached,
}

/// Arena-based DOM tree with a mutation journal
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Node>,
    /// Host element -> shadow-root container
    shadow_roots: HashMap<NodeId, NodeId>,
    journal: Vec<MutationRecord>,
}

impl DomTree {
    /// Create a new tree containing only the document root
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::document()],
            shadow_roots: HashMap::new(),
            journal: Vec::new(),
        }
    }

    /// The document root
    pub fn root(&self) -> NodeId {
        NodeId::new(0)
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(node);
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content))
    }

    /// Create a detached comment node
    pub fn create_comment(&mut self, text: &str) -> NodeId {
        self.alloc(Node::with_data(NodeData::Comment(text.to_string())))
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        if id.is_valid() {
            self.nodes.get(id.index())
        } else {
            None
        }
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        if id.is_valid() {
            self.nodes.get_mut(id.index())
        } else {
            None
        }
    }

    /// Number of nodes in the arena
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Tag name if the node is an element
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.get(id)?.as_element().map(|e| e.tag.as_str())
    }

    /// Attribute value if the node is an element carrying it
    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.get(id)?.as_element()?.get_attr(name)
    }

    /// Iterate direct children of a node
    pub fn children(&self, id: NodeId) -> ChildIds<'_> {
        ChildIds {
            tree: self,
            next: self.get(id).map(|n| n.first_child).unwrap_or(NodeId::NONE),
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.collect_text(id, &mut out);
        out
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        if let Some(node) = self.get(id) {
            if let Some(text) = node.as_text() {
                out.push_str(text);
            }
        }
        let kids: Vec<NodeId> = self.children(id).collect();
        for kid in kids {
            self.collect_text(kid, out);
        }
    }

    // --- Structural mutation (journaled) ---

    /// Append `child` as the last child of `parent`. An already-attached
    /// child is moved, journaling its removal from the old parent first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.can_attach(parent, child) {
            return false;
        }
        self.unlink(child);
        self.attach_end(parent, child);
        self.journal
            .push(MutationRecord::child_list(parent, vec![child], Vec::new()));
        true
    }

    /// Insert `child` as the first child of `parent`
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.can_attach(parent, child) {
            return false;
        }
        self.unlink(child);
        self.attach_front(parent, child);
        self.journal
            .push(MutationRecord::child_list(parent, vec![child], Vec::new()));
        true
    }

    /// Remove `child` from `parent`. The node stays in the arena, detached.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        match self.get(child) {
            Some(node) if node.parent == parent => {
                self.unlink(child);
                true
            }
            _ => false,
        }
    }

    /// Detach a subtree from wherever it is attached, journaling the
    /// removal. Already-detached nodes are left alone.
    pub fn detach_subtree(&mut self, node: NodeId) -> bool {
        match self.get(node) {
            Some(n) if n.parent.is_valid() => {
                self.unlink(node);
                true
            }
            _ => false,
        }
    }

    fn can_attach(&self, parent: NodeId, child: NodeId) -> bool {
        if self.get(parent).is_none() || self.get(child).is_none() || child == self.root() {
            return false;
        }
        // Reject cycles: child must not be an ancestor of parent
        let mut cur = parent;
        while cur.is_valid() {
            if cur == child {
                return false;
            }
            cur = self.nodes[cur.index()].parent;
        }
        true
    }

    fn attach_end(&mut self, parent: NodeId, child: NodeId) {
        let last = self.nodes[parent.index()].last_child;
        if last.is_valid() {
            self.nodes[last.index()].next_sibling = child;
            self.nodes[child.index()].prev_sibling = last;
        } else {
            self.nodes[parent.index()].first_child = child;
        }
        self.nodes[parent.index()].last_child = child;
        self.nodes[child.index()].parent = parent;
    }

    fn attach_front(&mut self, parent: NodeId, child: NodeId) {
        let first = self.nodes[parent.index()].first_child;
        if first.is_valid() {
            self.nodes[first.index()].prev_sibling = child;
            self.nodes[child.index()].next_sibling = first;
        } else {
            self.nodes[parent.index()].last_child = child;
        }
        self.nodes[parent.index()].first_child = child;
        self.nodes[child.index()].parent = parent;
    }

    /// Detach `child` from its parent, journaling the removal
    fn unlink(&mut self, child: NodeId) {
        let parent = self.nodes[child.index()].parent;
        if !parent.is_valid() {
            return;
        }
        let prev = self.nodes[child.index()].prev_sibling;
        let next = self.nodes[child.index()].next_sibling;

        if prev.is_valid() {
            self.nodes[prev.index()].next_sibling = next;
        } else {
            self.nodes[parent.index()].first_child = next;
        }
        if next.is_valid() {
            self.nodes[next.index()].prev_sibling = prev;
        } else {
            self.nodes[parent.index()].last_child = prev;
        }

        let node = &mut self.nodes[child.index()];
        node.parent = NodeId::NONE;
        node.prev_sibling = NodeId::NONE;
        node.next_sibling = NodeId::NONE;

        self.journal
            .push(MutationRecord::child_list(parent, Vec::new(), vec![child]));
    }

    // --- Attribute mutation (journaled) ---

    /// Set an attribute, returning the previous value. Ignored with a debug
    /// log on non-element nodes.
    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> Option<String> {
        let Some(elem) = self.get_mut(id).and_then(|n| n.as_element_mut()) else {
            tracing::debug!(?id, name, "set_attribute on non-element ignored");
            return None;
        };
        let old = elem.set_attr(name, value);
        self.journal
            .push(MutationRecord::attribute(id, name, old.clone()));
        old
    }

    /// Remove an attribute, returning its value if it was present
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Option<String> {
        let old = self
            .get_mut(id)
            .and_then(|n| n.as_element_mut())
            .and_then(|e| e.remove_attr(name))?;
        self.journal
            .push(MutationRecord::attribute(id, name, Some(old.clone())));
        Some(old)
    }

    // --- Structural cloning (not journaled: clones start detached) ---

    /// Deep-copy a subtree. The copy is detached and shares nothing with the
    /// source; the source is left untouched.
    pub fn clone_subtree(&mut self, source: NodeId) -> Option<NodeId> {
        let data = self.get(source)?.data.clone();
        let clone = self.alloc(Node::with_data(data));
        let kids: Vec<NodeId> = self.children(source).collect();
        for kid in kids {
            if let Some(kid_clone) = self.clone_subtree(kid) {
                self.attach_end(clone, kid_clone);
            }
        }
        Some(clone)
    }

    // --- Shadow roots ---

    /// Attach a shadow root to an element. Fails if the node is not an
    /// element or already hosts one.
    pub fn attach_shadow(&mut self, host: NodeId) -> Result<NodeId, DomError> {
        if self.get(host).map(|n| n.is_element()) != Some(true) {
            return Err(DomError::NotAnElement);
        }
        if self.shadow_roots.contains_key(&host) {
            return Err(DomError::ShadowAlreadyAttached);
        }
        let root = self.alloc(Node::shadow_root());
        self.shadow_roots.insert(host, root);
        Ok(root)
    }

    /// The shadow-root container for a host element, if attached
    pub fn shadow_root(&self, host: NodeId) -> Option<NodeId> {
        self.shadow_roots.get(&host).copied()
    }

    // --- Mutation journal ---

    /// Drain all journaled mutations since the last flush
    pub fn take_records(&mut self) -> Vec<MutationRecord> {
        std::mem::take(&mut self.journal)
    }

    /// Whether any mutations are waiting to be flushed
    pub fn has_pending_records(&self) -> bool {
        !self.journal.is_empty()
    }
}

/// Iterator over direct children
pub struct ChildIds<'a> {
    tree: &'a DomTree,
    next: NodeId,
}

impl Iterator for ChildIds<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        if !self.next.is_valid() {
            return None;
        }
        let current = self.next;
        self.next = self
            .tree
            .get(current)
            .map(|n| n.next_sibling)
            .unwrap_or(NodeId::NONE);
        Some(current)
    }
}
