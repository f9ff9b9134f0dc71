//! Slot contract and extraction
//!
//! A widget declares its named insertion points up front: which child tags
//! are legal in each, any deprecated names the slot used to go by, and
//! optional fallback content. At render time [`extract`] resolves the
//! host's actual light-DOM children against that schema.
//!
//! Extraction never mutates or moves the page's nodes. Admitted content is
//! a deep clone, so the render function is free to restyle or wrap its copy
//! while the host page keeps full ownership of the original.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::Arc;

use lattice_dom::{DomTree, NodeId};

use crate::diagnostics::Diagnostic;
use crate::factory::RenderError;

/// Produces fallback content for a slot; returns a detached node
pub type DefaultContentFn = Arc<dyn Fn(&mut DomTree) -> Option<NodeId>>;

/// Declaration of one named insertion point
#[derive(Clone)]
pub struct SlotDef {
    allowed_tags: HashSet<String>,
    deprecated_aliases: Vec<String>,
    default_content: Option<DefaultContentFn>,
}

impl SlotDef {
    pub fn new(allowed_tags: &[&str]) -> Self {
        Self {
            allowed_tags: allowed_tags.iter().map(|t| t.to_ascii_lowercase()).collect(),
            deprecated_aliases: Vec::new(),
            default_content: None,
        }
    }

    /// Accept content assigned under an old slot name as well
    pub fn with_alias(mut self, alias: &str) -> Self {
        self.deprecated_aliases.push(alias.to_string());
        self
    }

    /// Fallback content when the slot is unfilled or its content rejected
    pub fn with_default(mut self, f: impl Fn(&mut DomTree) -> Option<NodeId> + 'static) -> Self {
        self.default_content = Some(Arc::new(f));
        self
    }

    pub fn allows(&self, tag: &str) -> bool {
        self.allowed_tags.contains(tag)
    }

    pub fn allowed_tags(&self) -> &HashSet<String> {
        &self.allowed_tags
    }

    pub fn aliases(&self) -> &[String] {
        &self.deprecated_aliases
    }

    fn make_default(&self, tree: &mut DomTree) -> Option<NodeId> {
        self.default_content.as_ref().and_then(|f| f(tree))
    }
}

impl fmt::Debug for SlotDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlotDef")
            .field("allowed_tags", &self.allowed_tags)
            .field("deprecated_aliases", &self.deprecated_aliases)
            .field("has_default", &self.default_content.is_some())
            .finish()
    }
}

/// Schema construction errors, raised at definition time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SlotSchemaError {
    #[error("slot '{0}' is declared more than once")]
    DuplicateSlot(String),

    #[error("slot '{0}' declares no allowed tags")]
    EmptyAllowedTags(String),

    #[error("alias '{0}' resolves to more than one slot")]
    AmbiguousAlias(String),

    #[error("alias '{0}' shadows a declared slot name")]
    AliasShadowsSlot(String),
}

/// Ordered mapping from slot name to its declaration
#[derive(Debug, Clone, Default)]
pub struct SlotSchema {
    slots: Vec<(String, SlotDef)>,
}

impl SlotSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a slot. Validation happens once, when the schema becomes
    /// part of a component definition.
    pub fn declare(mut self, name: &str, def: SlotDef) -> Self {
        self.slots.push((name.to_string(), def));
        self
    }

    pub fn get(&self, name: &str) -> Option<&SlotDef> {
        self.slots
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, def)| def)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SlotDef)> {
        self.slots.iter().map(|(n, d)| (n.as_str(), d))
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Check the schema invariants: unique slot names, non-empty allowed
    /// tags, and every alias resolving to exactly one canonical slot.
    pub fn validate(&self) -> Result<(), SlotSchemaError> {
        let mut names: HashSet<&str> = HashSet::new();
        for (name, def) in self.iter() {
            if !names.insert(name) {
                return Err(SlotSchemaError::DuplicateSlot(name.to_string()));
            }
            if def.allowed_tags.is_empty() {
                return Err(SlotSchemaError::EmptyAllowedTags(name.to_string()));
            }
        }

        let mut aliases: HashSet<&str> = HashSet::new();
        for (_, def) in self.iter() {
            for alias in def.aliases() {
                if names.contains(alias.as_str()) {
                    return Err(SlotSchemaError::AliasShadowsSlot(alias.clone()));
                }
                if !aliases.insert(alias) {
                    return Err(SlotSchemaError::AmbiguousAlias(alias.clone()));
                }
            }
        }
        Ok(())
    }
}

/// Resolved slot content for one render pass
#[derive(Debug)]
pub struct SlotContent {
    slots: HashMap<String, Option<NodeId>>,
    pub diagnostics: Vec<Diagnostic>,
}

impl SlotContent {
    /// Resolved content for a slot, if any
    pub fn get(&self, name: &str) -> Option<NodeId> {
        self.slots.get(name).copied().flatten()
    }

    /// Resolved content, or the error a render function returns when a
    /// slot it cannot do without is empty.
    pub fn require(&self, name: &str) -> Result<NodeId, RenderError> {
        self.get(name).ok_or_else(|| RenderError::MissingRequiredSlot {
            slot: name.to_string(),
        })
    }

    pub fn is_filled(&self, name: &str) -> bool {
        self.get(name).is_some()
    }
}

/// Resolve the host's light-DOM children against a slot schema.
///
/// For each declared slot the first child assigned to its canonical name
/// wins; deprecated aliases are consulted only when the canonical name is
/// unfilled, and each alias hit is recorded as a diagnostic. Content whose
/// tag the slot does not allow is rejected (diagnostic) and replaced by the
/// slot's default, if any. Admitted content is deep-cloned; the source node
/// is never touched.
pub fn extract(tree: &mut DomTree, host: NodeId, schema: &SlotSchema) -> SlotContent {
    let children: Vec<NodeId> = tree.children(host).collect();
    let mut slots = HashMap::new();
    let mut diagnostics = Vec::new();

    for (name, def) in schema.iter() {
        let mut assigned = find_assigned(tree, &children, name);
        if assigned.is_none() {
            for alias in def.aliases() {
                if let Some(node) = find_assigned(tree, &children, alias) {
                    diagnostics.push(Diagnostic::DeprecatedSlotUsed {
                        slot: name.to_string(),
                        alias: alias.clone(),
                    });
                    assigned = Some(node);
                    break;
                }
            }
        }

        let resolved = match assigned {
            Some(node) => {
                let tag = tree.tag_name(node).unwrap_or("").to_string();
                if def.allows(&tag) {
                    tree.clone_subtree(node)
                } else {
                    diagnostics.push(Diagnostic::DisallowedSlotContent {
                        slot: name.to_string(),
                        tag,
                    });
                    def.make_default(tree)
                }
            }
            None => def.make_default(tree),
        };
        slots.insert(name.to_string(), resolved);
    }

    SlotContent { slots, diagnostics }
}

fn find_assigned(tree: &DomTree, children: &[NodeId], slot: &str) -> Option<NodeId> {
    children.iter().copied().find(|&child| {
        tree.get(child)
            .and_then(|n| n.as_element())
            .and_then(|e| e.slot_name())
            == Some(slot)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn host_with_child(tag: &str, slot: &str) -> (DomTree, NodeId, NodeId) {
        let mut tree = DomTree::new();
        let host = tree.create_element("x-widget");
        let root = tree.root();
        tree.append_child(root, host);
        let child = tree.create_element(tag);
        tree.set_attribute(child, "slot", slot);
        tree.append_child(host, child);
        (tree, host, child)
    }

    #[test]
    fn test_validate_rejects_empty_allowed_tags() {
        let schema = SlotSchema::new().declare("media", SlotDef::new(&[]));
        assert_eq!(
            schema.validate(),
            Err(SlotSchemaError::EmptyAllowedTags("media".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_ambiguous_alias() {
        let schema = SlotSchema::new()
            .declare("text", SlotDef::new(&["p"]).with_alias("body"))
            .declare("summary", SlotDef::new(&["p"]).with_alias("body"));
        assert_eq!(
            schema.validate(),
            Err(SlotSchemaError::AmbiguousAlias("body".to_string()))
        );
    }

    #[test]
    fn test_validate_rejects_alias_shadowing_slot() {
        let schema = SlotSchema::new()
            .declare("text", SlotDef::new(&["p"]))
            .declare("summary", SlotDef::new(&["p"]).with_alias("text"));
        assert_eq!(
            schema.validate(),
            Err(SlotSchemaError::AliasShadowsSlot("text".to_string()))
        );
    }

    #[test]
    fn test_extract_admits_allowed_content_as_clone() {
        let (mut tree, host, child) = host_with_child("img", "media");
        let schema = SlotSchema::new().declare("media", SlotDef::new(&["img"]));

        let content = extract(&mut tree, host, &schema);
        let resolved = content.get("media").unwrap();

        assert_ne!(resolved, child, "admitted content is a clone, not the source");
        assert_eq!(tree.tag_name(resolved), Some("img"));
        assert!(content.diagnostics.is_empty());

        // Source stays attached to the host, untouched
        assert_eq!(tree.parent(child), Some(host));
    }

    #[test]
    fn test_extract_rejects_disallowed_content() {
        let (mut tree, host, _) = host_with_child("div", "media");
        let schema = SlotSchema::new().declare("media", SlotDef::new(&["img"]));

        let content = extract(&mut tree, host, &schema);
        assert_eq!(content.get("media"), None);
        assert_eq!(
            content.diagnostics,
            vec![Diagnostic::DisallowedSlotContent {
                slot: "media".to_string(),
                tag: "div".to_string(),
            }]
        );
    }

    #[test]
    fn test_extract_substitutes_default_on_rejection() {
        let (mut tree, host, _) = host_with_child("div", "media");
        let schema = SlotSchema::new().declare(
            "media",
            SlotDef::new(&["img"]).with_default(|tree| Some(tree.create_element("picture"))),
        );

        let content = extract(&mut tree, host, &schema);
        let resolved = content.get("media").unwrap();
        assert_eq!(tree.tag_name(resolved), Some("picture"));
        assert_eq!(content.diagnostics.len(), 1);
    }

    #[test]
    fn test_extract_resolves_deprecated_alias() {
        let (mut tree, host, _) = host_with_child("p", "body");
        let schema = SlotSchema::new()
            .declare("text", SlotDef::new(&["p"]).with_alias("body"));

        let content = extract(&mut tree, host, &schema);
        assert!(content.is_filled("text"));
        assert_eq!(
            content.diagnostics,
            vec![Diagnostic::DeprecatedSlotUsed {
                slot: "text".to_string(),
                alias: "body".to_string(),
            }]
        );
    }

    #[test]
    fn test_canonical_name_wins_over_alias() {
        let mut tree = DomTree::new();
        let host = tree.create_element("x-widget");
        let root = tree.root();
        tree.append_child(root, host);

        let canonical = tree.create_element("p");
        tree.set_attribute(canonical, "slot", "text");
        let aliased = tree.create_element("p");
        tree.set_attribute(aliased, "slot", "body");
        // Alias child comes first in document order; canonical still wins
        tree.append_child(host, aliased);
        tree.append_child(host, canonical);

        let schema = SlotSchema::new()
            .declare("text", SlotDef::new(&["p"]).with_alias("body"));
        let content = extract(&mut tree, host, &schema);

        assert!(content.is_filled("text"));
        assert!(content.diagnostics.is_empty(), "no alias diagnostic when canonical is used");
    }

    #[test]
    fn test_unfilled_slot_without_default_is_none() {
        let mut tree = DomTree::new();
        let host = tree.create_element("x-widget");
        let root = tree.root();
        tree.append_child(root, host);

        let schema = SlotSchema::new().declare("title", SlotDef::new(&["h2"]));
        let content = extract(&mut tree, host, &schema);

        assert_eq!(content.get("title"), None);
        assert!(content.require("title").is_err());
        assert!(content.diagnostics.is_empty());
    }
}
