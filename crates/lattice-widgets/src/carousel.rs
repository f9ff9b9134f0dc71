//! Carousel widget
//!
//! Horizontal track of repeated items with an optional heading. Carries the
//! resize protocol: the host page flips `recalc` to a truthy value after a
//! viewport change and the carousel rebuilds its track.

use lattice_components::{
    ComponentConfig, RenderContext, RenderError, SlotDef, SlotSchema,
};
use lattice_dom::NodeId;

use crate::behaviors;
use crate::items::collect_items;

pub const TAG: &str = "lattice-carousel";

/// Tags legal as repeated `item` content
const ITEM_TAGS: &[&str] = &["img", "picture", "figure", "article"];

const STYLE: &str = "\
:host { display: block; }\n\
.carousel-track { display: flex; gap: 16px; overflow-x: auto; }\n\
.carousel-item { flex: 0 0 auto; }";

pub fn schema() -> SlotSchema {
    SlotSchema::new().declare("heading", SlotDef::new(&["h2", "h3"]))
}

pub fn config() -> ComponentConfig {
    ComponentConfig::new(TAG, render)
        .with_style(STYLE)
        .with_slots(schema())
        .with_observer(behaviors::resize_layout())
}

fn render(cx: &mut RenderContext<'_>) -> Result<NodeId, RenderError> {
    let section = cx.tree.create_element("section");
    cx.tree.set_attribute(section, "class", "carousel");

    if let Some(heading) = cx.slots.get("heading") {
        cx.tree.append_child(section, heading);
    }

    let track = cx.tree.create_element("div");
    cx.tree.set_attribute(track, "class", "carousel-track");
    let items = collect_items(cx.tree, cx.host, "item", ITEM_TAGS);
    for item in items {
        let cell = cx.tree.create_element("div");
        cx.tree.set_attribute(cell, "class", "carousel-item");
        cx.tree.append_child(cell, item);
        cx.tree.append_child(track, cell);
    }
    cx.tree.append_child(section, track);
    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_components::ComponentRuntime;
    use lattice_dom::DomTree;

    fn page(tree: &mut DomTree, item_count: usize) -> NodeId {
        let host = tree.create_element(TAG);
        let root = tree.root();
        tree.append_child(root, host);
        for _ in 0..item_count {
            let img = tree.create_element("img");
            tree.set_attribute(img, "slot", "item");
            tree.append_child(host, img);
        }
        host
    }

    fn track_len(tree: &DomTree, host: NodeId) -> usize {
        let shadow = tree.shadow_root(host).unwrap();
        let section = tree
            .children(shadow)
            .find(|&c| tree.tag_name(c) == Some("section"))
            .unwrap();
        let track = tree
            .children(section)
            .find(|&c| tree.attribute(c, "class") == Some("carousel-track"))
            .unwrap();
        tree.children(track).count()
    }

    #[test]
    fn test_renders_every_item() {
        let mut runtime = ComponentRuntime::new();
        runtime.define(config()).unwrap();

        let mut tree = DomTree::new();
        let host = page(&mut tree, 3);
        runtime.connect(&mut tree, host).unwrap();
        assert_eq!(track_len(&tree, host), 3);
    }

    #[test]
    fn test_recalc_flip_rebuilds_track() {
        let mut runtime = ComponentRuntime::new();
        runtime.define(config()).unwrap();

        let mut tree = DomTree::new();
        let host = page(&mut tree, 2);
        runtime.connect(&mut tree, host).unwrap();
        tree.take_records();

        // New item lands without a flush; the resize protocol picks it up
        let img = tree.create_element("img");
        tree.set_attribute(img, "slot", "item");
        tree.append_child(host, img);
        assert_eq!(track_len(&tree, host), 2);

        runtime.set_attribute(&mut tree, host, "recalc", "true");
        assert_eq!(track_len(&tree, host), 3);
    }

    #[test]
    fn test_falsy_recalc_does_not_rebuild() {
        let mut runtime = ComponentRuntime::new();
        runtime.define(config()).unwrap();

        let mut tree = DomTree::new();
        let host = page(&mut tree, 1);
        runtime.connect(&mut tree, host).unwrap();
        tree.take_records();

        let img = tree.create_element("img");
        tree.set_attribute(img, "slot", "item");
        tree.append_child(host, img);

        runtime.set_attribute(&mut tree, host, "recalc", "false");
        assert_eq!(track_len(&tree, host), 1);
    }
}
