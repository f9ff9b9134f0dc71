//! End-to-end tests for the component runtime
//!
//! Exercises the full pipeline the way a host page would: define widgets,
//! build light DOM, connect instances, mutate content, flush.

use std::cell::RefCell;
use std::rc::Rc;

use lattice_components::{
    ComponentConfig, ComponentRuntime, ObserverHandler, RenderError, SlotDef, SlotSchema,
};
use lattice_dom::{DomTree, NodeId};

/// Serialize a subtree as nested tag/text tokens, for structural equality
fn dump(tree: &DomTree, node: NodeId) -> String {
    let mut out = String::new();
    if let Some(tag) = tree.tag_name(node) {
        out.push_str(tag);
    } else if let Some(n) = tree.get(node) {
        if let Some(text) = n.as_text() {
            out.push('"');
            out.push_str(text);
            out.push('"');
        }
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

/// A card-like test widget: optional media, required title, counted renders
fn counting_card(renders: Rc<RefCell<usize>>) -> ComponentConfig {
    ComponentConfig::new("test-card", move |cx| {
        *renders.borrow_mut() += 1;
        let title = cx.slots.require("title")?;
        let wrapper = cx.tree.create_element("article");
        cx.tree.set_attribute(wrapper, "class", "card");
        if let Some(media) = cx.slots.get("media") {
            cx.tree.append_child(wrapper, media);
        }
        cx.tree.append_child(wrapper, title);
        Ok(wrapper)
    })
    .with_style(":host { display: block; }")
    .with_slots(
        SlotSchema::new()
            .declare("media", SlotDef::new(&["img"]))
            .declare("title", SlotDef::new(&["h2", "h3"])),
    )
}

fn page_with_card(tree: &mut DomTree) -> NodeId {
    let host = tree.create_element("test-card");
    let root = tree.root();
    tree.append_child(root, host);
    let title = tree.create_element("h2");
    let text = tree.create_text("Hello");
    tree.append_child(title, text);
    tree.set_attribute(title, "slot", "title");
    tree.append_child(host, title);
    host
}

#[test]
fn test_define_twice_is_idempotent() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();

    assert_eq!(runtime.define(counting_card(Rc::clone(&renders))), Ok(true));
    assert_eq!(runtime.define(counting_card(renders)), Ok(false));
    assert_eq!(runtime.registry().len(), 1);
}

#[test]
fn test_connect_renders_cloned_slot_content() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let host = page_with_card(&mut tree);
    assert_eq!(runtime.connect(&mut tree, host), Ok(true));

    let shadow = tree.shadow_root(host).unwrap();
    assert_eq!(
        dump(&tree, shadow),
        "(style(\":host { display: block; }\") article(h2(\"Hello\")))"
    );
    assert_eq!(*renders.borrow(), 1);

    // Light DOM is untouched: the host still owns its original child
    assert_eq!(tree.children(host).count(), 1);
}

#[test]
fn test_rerender_is_idempotent() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let host = page_with_card(&mut tree);
    runtime.connect(&mut tree, host).unwrap();

    let shadow = tree.shadow_root(host).unwrap();
    let first = dump(&tree, shadow);
    assert!(runtime.render(&mut tree, host));
    assert!(runtime.render(&mut tree, host));
    assert_eq!(dump(&tree, shadow), first);
    assert_eq!(*renders.borrow(), 3);
}

#[test]
fn test_missing_required_slot_leaves_shadow_empty() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let host = tree.create_element("test-card");
    let root = tree.root();
    tree.append_child(root, host);

    runtime.connect(&mut tree, host).unwrap();

    // Shadow root is defined, style is in, but nothing rendered
    let shadow = tree.shadow_root(host).unwrap();
    assert_eq!(
        dump(&tree, shadow),
        "(style(\":host { display: block; }\"))"
    );
    assert_eq!(*renders.borrow(), 1);
}

#[test]
fn test_mutation_burst_triggers_single_rerender() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let host = page_with_card(&mut tree);
    runtime.connect(&mut tree, host).unwrap();
    tree.take_records();
    assert_eq!(*renders.borrow(), 1);

    // Append then remove within the same batch window
    let img = tree.create_element("img");
    tree.set_attribute(img, "slot", "media");
    tree.append_child(host, img);
    tree.remove_child(host, img);

    assert_eq!(runtime.flush(&mut tree), 1, "one re-render for the burst");
    assert_eq!(*renders.borrow(), 2);

    // Nothing pending afterwards
    assert_eq!(runtime.flush(&mut tree), 0);
    assert_eq!(*renders.borrow(), 2);
}

#[test]
fn test_flush_ignores_unrelated_mutations() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let host = page_with_card(&mut tree);
    runtime.connect(&mut tree, host).unwrap();
    tree.take_records();

    // Mutations elsewhere in the page
    let aside = tree.create_element("aside");
    let root = tree.root();
    tree.append_child(root, aside);
    tree.set_attribute(aside, "class", "sidebar");

    assert_eq!(runtime.flush(&mut tree), 0);
    assert_eq!(*renders.borrow(), 1);
}

#[test]
fn test_reconnect_installs_watcher_exactly_once() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let host = page_with_card(&mut tree);
    runtime.connect(&mut tree, host).unwrap();

    assert!(runtime.disconnect(&mut tree, host));
    assert!(!runtime.disconnect(&mut tree, host), "second disconnect is a no-op");

    // Mutations while disconnected do not render
    let img = tree.create_element("img");
    tree.set_attribute(img, "slot", "media");
    tree.append_child(host, img);
    assert_eq!(runtime.flush(&mut tree), 0);

    // Reconnect: renders once, then a burst of mutations still yields
    // exactly one re-render (no duplicate watcher)
    runtime.connect(&mut tree, host).unwrap();
    tree.take_records();
    let renders_after_reconnect = *renders.borrow();

    tree.remove_child(host, img);
    let img2 = tree.create_element("img");
    tree.set_attribute(img2, "slot", "media");
    tree.append_child(host, img2);
    assert_eq!(runtime.flush(&mut tree), 1);
    assert_eq!(*renders.borrow(), renders_after_reconnect + 1);
}

#[test]
fn test_style_injected_exactly_once() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let host = page_with_card(&mut tree);
    runtime.connect(&mut tree, host).unwrap();
    runtime.render(&mut tree, host);
    runtime.disconnect(&mut tree, host);
    runtime.connect(&mut tree, host).unwrap();

    let shadow = tree.shadow_root(host).unwrap();
    let styles = tree
        .children(shadow)
        .filter(|&c| tree.tag_name(c) == Some("style"))
        .count();
    assert_eq!(styles, 1);
}

#[test]
fn test_attribute_dispatch_reaches_interested_handler_only() {
    let seen: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    let s1 = Rc::clone(&seen);
    let s2 = Rc::clone(&seen);
    let config = ComponentConfig::new("test-toggle", |cx| Ok(cx.tree.create_element("div")))
        .with_observer(
            ObserverHandler::new("open-state", &["open"]).on_attribute_change(move |cx, change| {
                s1.borrow_mut().push(format!("open-state:{:?}", change.new));
                cx.request_render();
                Ok(())
            }),
        )
        .with_observer(
            ObserverHandler::new("resize", &["recalc"]).on_attribute_change(move |_, _| {
                s2.borrow_mut().push("resize".to_string());
                Ok(())
            }),
        );

    let mut runtime = ComponentRuntime::new();
    runtime.define(config).unwrap();

    let mut tree = DomTree::new();
    let host = tree.create_element("test-toggle");
    let root = tree.root();
    tree.append_child(root, host);
    runtime.connect(&mut tree, host).unwrap();

    runtime.set_attribute(&mut tree, host, "open", "true");
    assert_eq!(*seen.borrow(), vec!["open-state:Some(\"true\")".to_string()]);

    // Unobserved attribute: no dispatch at all
    runtime.set_attribute(&mut tree, host, "class", "wide");
    assert_eq!(seen.borrow().len(), 1);
}

#[test]
fn test_connect_and_disconnect_hooks_run_in_order() {
    let log: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));

    let c1 = Rc::clone(&log);
    let c2 = Rc::clone(&log);
    let d1 = Rc::clone(&log);
    let d2 = Rc::clone(&log);
    let config = ComponentConfig::new("test-hooks", |cx| Ok(cx.tree.create_element("div")))
        .with_observer(
            ObserverHandler::new("first", &[])
                .on_connect(move |_| {
                    c1.borrow_mut().push("first-connect");
                    Ok(())
                })
                .on_disconnect(move |_| {
                    d1.borrow_mut().push("first-disconnect");
                    Ok(())
                }),
        )
        .with_observer(
            ObserverHandler::new("second", &[])
                .on_connect(move |_| {
                    c2.borrow_mut().push("second-connect");
                    Ok(())
                })
                .on_disconnect(move |_| {
                    d2.borrow_mut().push("second-disconnect");
                    Ok(())
                }),
        );

    let mut runtime = ComponentRuntime::new();
    runtime.define(config).unwrap();

    let mut tree = DomTree::new();
    let host = tree.create_element("test-hooks");
    let root = tree.root();
    tree.append_child(root, host);
    runtime.connect(&mut tree, host).unwrap();
    runtime.disconnect(&mut tree, host);

    assert_eq!(
        *log.borrow(),
        vec![
            "first-connect",
            "second-connect",
            "first-disconnect",
            "second-disconnect"
        ]
    );
}

#[test]
fn test_upgrade_all_connects_every_defined_element() {
    let renders = Rc::new(RefCell::new(0));
    let mut runtime = ComponentRuntime::new();
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let first = page_with_card(&mut tree);
    let second = page_with_card(&mut tree);
    let plain = tree.create_element("div");
    let root = tree.root();
    tree.append_child(root, plain);

    assert_eq!(runtime.upgrade_all(&mut tree), 2);
    assert!(runtime.is_connected(first));
    assert!(runtime.is_connected(second));
    assert_eq!(runtime.instance_count(), 2);
}

#[test]
fn test_broken_render_does_not_poison_siblings() {
    let mut runtime = ComponentRuntime::new();
    runtime
        .define(ComponentConfig::new("test-broken", |_| {
            panic!("widget bug")
        }))
        .unwrap();
    let renders = Rc::new(RefCell::new(0));
    runtime.define(counting_card(Rc::clone(&renders))).unwrap();

    let mut tree = DomTree::new();
    let broken = tree.create_element("test-broken");
    let root = tree.root();
    tree.append_child(root, broken);
    let card = page_with_card(&mut tree);

    // Both connect; the broken widget's panic is contained
    assert_eq!(runtime.upgrade_all(&mut tree), 2);
    assert_eq!(*renders.borrow(), 1);

    let broken_shadow = tree.shadow_root(broken).unwrap();
    assert_eq!(tree.children(broken_shadow).count(), 0);
    let card_shadow = tree.shadow_root(card).unwrap();
    assert!(tree.children(card_shadow).count() > 0);
}

#[test]
fn test_required_slot_error_from_render() {
    // The render-side contract: require() on an empty slot yields the error
    let config = ComponentConfig::new("test-strict", |cx| {
        cx.slots.require("title").map(|_| cx.tree.create_element("div"))
    });
    let mut runtime = ComponentRuntime::new();
    runtime.define(config).unwrap();

    let mut tree = DomTree::new();
    let host = tree.create_element("test-strict");
    let root = tree.root();
    tree.append_child(root, host);
    runtime.connect(&mut tree, host).unwrap();

    let shadow = tree.shadow_root(host).unwrap();
    assert_eq!(tree.children(shadow).count(), 0);

    let err = RenderError::MissingRequiredSlot {
        slot: "title".to_string(),
    };
    assert_eq!(err.to_string(), "required slot 'title' has no usable content");
}
