//! Navigation widget
//!
//! Brand mark plus a list of links. The `open` attribute drives the
//! collapsed/expanded state the host page toggles for small viewports.

use lattice_components::{
    ComponentConfig, RenderContext, RenderError, SlotDef, SlotSchema,
};
use lattice_dom::NodeId;

use crate::behaviors;
use crate::items::collect_items;

pub const TAG: &str = "lattice-nav";

const STYLE: &str = "\
:host { display: block; }\n\
.nav { display: flex; align-items: center; gap: 24px; }\n\
.nav-links { display: none; list-style: none; }\n\
.nav.open .nav-links { display: flex; }";

pub fn schema() -> SlotSchema {
    SlotSchema::new().declare("brand", SlotDef::new(&["a", "span", "img"]))
}

pub fn config() -> ComponentConfig {
    ComponentConfig::new(TAG, render)
        .with_style(STYLE)
        .with_slots(schema())
        .with_observer(behaviors::open_state())
}

fn render(cx: &mut RenderContext<'_>) -> Result<NodeId, RenderError> {
    let open = behaviors::is_truthy(cx.tree.attribute(cx.host, "open"));

    let nav = cx.tree.create_element("nav");
    cx.tree
        .set_attribute(nav, "class", if open { "nav open" } else { "nav" });

    if let Some(brand) = cx.slots.get("brand") {
        cx.tree.append_child(nav, brand);
    }

    let list = cx.tree.create_element("ul");
    cx.tree.set_attribute(list, "class", "nav-links");
    let links = collect_items(cx.tree, cx.host, "item", &["a"]);
    for link in links {
        let entry = cx.tree.create_element("li");
        cx.tree.append_child(entry, link);
        cx.tree.append_child(list, entry);
    }
    cx.tree.append_child(nav, list);
    Ok(nav)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_components::ComponentRuntime;
    use lattice_dom::DomTree;

    fn nav_class(tree: &DomTree, host: NodeId) -> String {
        let shadow = tree.shadow_root(host).unwrap();
        let nav = tree
            .children(shadow)
            .find(|&c| tree.tag_name(c) == Some("nav"))
            .unwrap();
        tree.attribute(nav, "class").unwrap().to_string()
    }

    #[test]
    fn test_open_attribute_toggles_state_class() {
        let mut runtime = ComponentRuntime::new();
        runtime.define(config()).unwrap();

        let mut tree = DomTree::new();
        let host = tree.create_element(TAG);
        let root = tree.root();
        tree.append_child(root, host);
        runtime.connect(&mut tree, host).unwrap();
        assert_eq!(nav_class(&tree, host), "nav");

        runtime.set_attribute(&mut tree, host, "open", "true");
        assert_eq!(nav_class(&tree, host), "nav open");

        runtime.set_attribute(&mut tree, host, "open", "false");
        assert_eq!(nav_class(&tree, host), "nav");
    }

    #[test]
    fn test_links_render_as_list_entries() {
        let mut runtime = ComponentRuntime::new();
        runtime.define(config()).unwrap();

        let mut tree = DomTree::new();
        let host = tree.create_element(TAG);
        let root = tree.root();
        tree.append_child(root, host);
        for label in ["Home", "Docs"] {
            let a = tree.create_element("a");
            tree.set_attribute(a, "slot", "item");
            let text = tree.create_text(label);
            tree.append_child(a, text);
            tree.append_child(host, a);
        }
        runtime.connect(&mut tree, host).unwrap();

        let shadow = tree.shadow_root(host).unwrap();
        let nav = tree
            .children(shadow)
            .find(|&c| tree.tag_name(c) == Some("nav"))
            .unwrap();
        let list = tree
            .children(nav)
            .find(|&c| tree.tag_name(c) == Some("ul"))
            .unwrap();
        assert_eq!(tree.children(list).count(), 2);
        assert_eq!(tree.text_content(list), "HomeDocs");
    }
}
