//! Card widget
//!
//! Media-over-text card: optional image on top, required title, optional
//! body text. The body slot used to be called `body`; the old name still
//! resolves, with a deprecation notice.

use lattice_components::{
    ComponentConfig, RenderContext, RenderError, SlotDef, SlotSchema,
};
use lattice_dom::NodeId;

pub const TAG: &str = "lattice-card";

const STYLE: &str = "\
:host { display: block; border-radius: 8px; overflow: hidden; }\n\
.card { margin: 0; }\n\
.card-media { margin: 0; width: 100%; }\n\
.card-body { padding: 12px 16px; }";

pub fn schema() -> SlotSchema {
    SlotSchema::new()
        .declare("media", SlotDef::new(&["img", "picture"]))
        .declare("title", SlotDef::new(&["h2", "h3"]))
        .declare("text", SlotDef::new(&["p"]).with_alias("body"))
}

pub fn config() -> ComponentConfig {
    ComponentConfig::new(TAG, render)
        .with_style(STYLE)
        .with_slots(schema())
}

fn render(cx: &mut RenderContext<'_>) -> Result<NodeId, RenderError> {
    let title = cx.slots.require("title")?;

    let card = cx.tree.create_element("article");
    cx.tree.set_attribute(card, "class", "card");

    if let Some(media) = cx.slots.get("media") {
        let figure = cx.tree.create_element("figure");
        cx.tree.set_attribute(figure, "class", "card-media");
        cx.tree.append_child(figure, media);
        cx.tree.append_child(card, figure);
    }

    let body = cx.tree.create_element("div");
    cx.tree.set_attribute(body, "class", "card-body");
    cx.tree.append_child(body, title);
    if let Some(text) = cx.slots.get("text") {
        cx.tree.append_child(body, text);
    }
    cx.tree.append_child(card, body);
    Ok(card)
}
