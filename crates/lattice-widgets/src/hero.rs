//! Hero widget
//!
//! Full-width banner: optional background image, required headline,
//! optional tagline and call-to-action link.

use lattice_components::{
    ComponentConfig, RenderContext, RenderError, SlotDef, SlotSchema,
};
use lattice_dom::NodeId;

pub const TAG: &str = "lattice-hero";

const STYLE: &str = "\
:host { display: block; position: relative; min-height: 320px; }\n\
.hero-background { position: absolute; inset: 0; object-fit: cover; }\n\
.hero-content { position: relative; padding: 48px 24px; }";

pub fn schema() -> SlotSchema {
    SlotSchema::new()
        .declare("background", SlotDef::new(&["img", "picture"]))
        .declare("headline", SlotDef::new(&["h1", "h2"]))
        .declare("tagline", SlotDef::new(&["p"]))
        .declare("action", SlotDef::new(&["a", "button"]))
}

pub fn config() -> ComponentConfig {
    ComponentConfig::new(TAG, render)
        .with_style(STYLE)
        .with_slots(schema())
}

fn render(cx: &mut RenderContext<'_>) -> Result<NodeId, RenderError> {
    let headline = cx.slots.require("headline")?;

    let section = cx.tree.create_element("section");
    cx.tree.set_attribute(section, "class", "hero");

    if let Some(background) = cx.slots.get("background") {
        cx.tree.set_attribute(background, "class", "hero-background");
        cx.tree.append_child(section, background);
    }

    let content = cx.tree.create_element("div");
    cx.tree.set_attribute(content, "class", "hero-content");
    cx.tree.append_child(content, headline);
    if let Some(tagline) = cx.slots.get("tagline") {
        cx.tree.append_child(content, tagline);
    }
    if let Some(action) = cx.slots.get("action") {
        cx.tree.append_child(content, action);
    }
    cx.tree.append_child(section, content);
    Ok(section)
}
