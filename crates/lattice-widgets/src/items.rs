//! Repeated-item slot gathering
//!
//! The extractor resolves one node per declared slot; list-shaped widgets
//! (carousel tracks, nav items, feed entries) instead take every light-DOM
//! child assigned to a repeating slot name. Same rules as the extractor:
//! admitted content is a deep clone, disallowed tags are reported and
//! skipped, the source is never touched.

use lattice_components::Diagnostic;
use lattice_dom::{DomTree, NodeId};

/// Clone every light-DOM child of `host` assigned to `slot` whose tag is in
/// `allowed`, preserving document order.
pub fn collect_items(
    tree: &mut DomTree,
    host: NodeId,
    slot: &str,
    allowed: &[&str],
) -> Vec<NodeId> {
    let children: Vec<NodeId> = tree.children(host).collect();
    let mut items = Vec::new();

    for child in children {
        if tree.attribute(child, "slot") != Some(slot) {
            continue;
        }
        let Some(tag) = tree.tag_name(child).map(str::to_owned) else {
            continue;
        };
        if allowed.contains(&tag.as_str()) {
            if let Some(clone) = tree.clone_subtree(child) {
                items.push(clone);
            }
        } else {
            Diagnostic::DisallowedSlotContent {
                slot: slot.to_string(),
                tag,
            }
            .report();
        }
    }
    items
}
