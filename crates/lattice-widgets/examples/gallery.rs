//! Widget gallery
//!
//! Builds a small page out of every widget, upgrades it, then plays the
//! host-page role: mutates slotted content and flushes the batch. Run with
//! `RUST_LOG=info` (or `debug`) to watch the runtime's diagnostics.

use lattice_dom::{DomTree, NodeId};

fn main() {
    use tracing_subscriber::EnvFilter;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let mut runtime = lattice_components::ComponentRuntime::new();
    let defined = lattice_widgets::define_all(&mut runtime).expect("widget configs are valid");
    println!("defined {defined} widget tags");

    let mut tree = DomTree::new();
    let root = tree.root();

    // <lattice-nav> with a brand and two links
    let nav = tree.create_element(lattice_widgets::nav::TAG);
    tree.append_child(root, nav);
    let brand = element_with_text(&mut tree, "span", "Lattice");
    tree.set_attribute(brand, "slot", "brand");
    tree.append_child(nav, brand);
    for label in ["Home", "Gallery"] {
        let link = element_with_text(&mut tree, "a", label);
        tree.set_attribute(link, "slot", "item");
        tree.append_child(nav, link);
    }

    // <lattice-hero>
    let hero = tree.create_element(lattice_widgets::hero::TAG);
    tree.append_child(root, hero);
    let headline = element_with_text(&mut tree, "h1", "Build pages out of widgets");
    tree.set_attribute(headline, "slot", "headline");
    tree.append_child(hero, headline);

    // <lattice-card>, filling the text slot through its deprecated name
    let card = tree.create_element(lattice_widgets::card::TAG);
    tree.append_child(root, card);
    let title = element_with_text(&mut tree, "h2", "A card");
    tree.set_attribute(title, "slot", "title");
    tree.append_child(card, title);
    let text = element_with_text(&mut tree, "p", "Slotted through the old name.");
    tree.set_attribute(text, "slot", "body");
    tree.append_child(card, text);

    // <lattice-feed>, empty at first
    let feed = tree.create_element(lattice_widgets::feed::TAG);
    tree.append_child(root, feed);

    let upgraded = runtime.upgrade_all(&mut tree);
    println!("upgraded {upgraded} elements");
    tree.take_records();

    // The page later fills the feed; one flush, one re-render
    for entry_title in ["First entry", "Second entry"] {
        let entry = element_with_text(&mut tree, "article", entry_title);
        tree.set_attribute(entry, "slot", "entry");
        tree.append_child(feed, entry);
    }
    let rerendered = runtime.flush(&mut tree);
    println!("flush re-rendered {rerendered} instance(s)");

    for (name, host) in [("nav", nav), ("hero", hero), ("card", card), ("feed", feed)] {
        let shadow = tree.shadow_root(host).expect("widget was upgraded");
        println!("{name}: {}", dump(&tree, shadow));
    }
}

fn element_with_text(tree: &mut DomTree, tag: &str, text: &str) -> NodeId {
    let element = tree.create_element(tag);
    let content = tree.create_text(text);
    tree.append_child(element, content);
    element
}

/// Serialize a subtree as nested tag/text tokens
fn dump(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    if let Some(tag) = tree.tag_name(node) {
        out.push_str(tag);
    } else if let Some(text) = tree.get(node).and_then(|n| n.as_text()) {
        out.push('"');
        out.push_str(text);
        out.push('"');
    }
    let kids: Vec<NodeId> = tree.children(node).collect();
    if !kids.is_empty() {
        out.push('(');
        for (i, kid) in kids.iter().enumerate() {
            if i > 0 {
                out.push(' ');
            }
            out.push_str(&dump(tree, *kid));
        }
        out.push(')');
    }
    out
}
