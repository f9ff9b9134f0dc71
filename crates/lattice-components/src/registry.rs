//! Define-once tag registry
//!
//! The process-wide ledger of which tag names have been defined. The
//! platform forbids redefining a tag, and the same widget module is
//! routinely evaluated more than once (bundled into several distribution
//! entry points), so a duplicate registration is an expected no-op, never
//! an error. The ledger is populated as modules register and never cleared.

use std::collections::HashMap;
use std::sync::Arc;

use crate::factory::ComponentDefinition;

/// Ledger of defined tag names
#[derive(Debug, Default)]
pub struct Registry {
    ledger: HashMap<String, Arc<ComponentDefinition>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define a tag. Returns true if newly defined, false if the tag was
    /// already in the ledger (in which case nothing is touched).
    pub fn register(&mut self, definition: Arc<ComponentDefinition>) -> bool {
        let tag = definition.tag_name();
        if self.ledger.contains_key(tag) {
            tracing::debug!(tag, "duplicate registration ignored");
            return false;
        }
        tracing::info!(tag, "custom element defined");
        self.ledger.insert(tag.to_string(), definition);
        true
    }

    pub fn get(&self, tag: &str) -> Option<Arc<ComponentDefinition>> {
        self.ledger.get(tag).cloned()
    }

    pub fn is_defined(&self, tag: &str) -> bool {
        self.ledger.contains_key(tag)
    }

    pub fn len(&self) -> usize {
        self.ledger.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ledger.is_empty()
    }

    /// Iterate defined tag names
    pub fn tags(&self) -> impl Iterator<Item = &str> {
        self.ledger.keys().map(String::as_str)
    }
}
