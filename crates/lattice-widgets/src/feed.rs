//! Feed widget
//!
//! Renders a list of externally-fetched entries. The host page resolves the
//! feed (see the `lattice-feed` client crate), writes each entry into the
//! light DOM as an `<article slot="entry">`, and flips the `loading`
//! attribute while a fetch is in flight. An `empty` slot, with a built-in
//! fallback, covers the no-entries case.

use lattice_components::{
    ComponentConfig, RenderContext, RenderError, SlotDef, SlotSchema,
};
use lattice_dom::NodeId;

use crate::behaviors;
use crate::items::collect_items;

pub const TAG: &str = "lattice-feed";

const STYLE: &str = "\
:host { display: block; }\n\
.feed-entries { display: grid; gap: 16px; }\n\
.feed-status { opacity: 0.6; }";

pub fn schema() -> SlotSchema {
    SlotSchema::new()
        .declare("header", SlotDef::new(&["h2", "h3"]))
        .declare(
            "empty",
            SlotDef::new(&["p"]).with_default(|tree| {
                let p = tree.create_element("p");
                let text = tree.create_text("Nothing to show yet.");
                tree.append_child(p, text);
                Some(p)
            }),
        )
}

pub fn config() -> ComponentConfig {
    ComponentConfig::new(TAG, render)
        .with_style(STYLE)
        .with_slots(schema())
        .with_observer(behaviors::loading_state())
}

fn render(cx: &mut RenderContext<'_>) -> Result<NodeId, RenderError> {
    let section = cx.tree.create_element("section");
    cx.tree.set_attribute(section, "class", "feed");

    if let Some(header) = cx.slots.get("header") {
        cx.tree.append_child(section, header);
    }

    if behaviors::is_truthy(cx.tree.attribute(cx.host, "loading")) {
        let status = cx.tree.create_element("p");
        cx.tree.set_attribute(status, "class", "feed-status");
        let text = cx.tree.create_text("Loading\u{2026}");
        cx.tree.append_child(status, text);
        cx.tree.append_child(section, status);
        return Ok(section);
    }

    let entries = collect_items(cx.tree, cx.host, "entry", &["article"]);
    if entries.is_empty() {
        if let Some(empty) = cx.slots.get("empty") {
            cx.tree.append_child(section, empty);
        }
        return Ok(section);
    }

    let list = cx.tree.create_element("div");
    cx.tree.set_attribute(list, "class", "feed-entries");
    for entry in entries {
        cx.tree.append_child(list, entry);
    }
    cx.tree.append_child(section, list);
    Ok(section)
}
