//! Component runtime
//!
//! Drives factory-built definitions against a host-page tree: upgrades
//! elements whose tags are defined, owns per-instance shadow roots and
//! style injection, routes journaled mutations to slot watchers, and
//! dispatches attribute changes to each instance's combined observer
//! contract.
//!
//! Re-rendering is wholesale: the shadow content (minus the style node) is
//! cleared and rebuilt from freshly extracted slot content. Running the
//! pipeline twice on unchanged input produces an equivalent shadow tree.

use std::collections::HashMap;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use lattice_dom::{DomError, DomTree, NodeId};

use crate::diagnostics::Diagnostic;
use crate::factory::{
    ComponentConfig, ComponentDefinition, ConfigError, RenderContext, RenderError,
};
use crate::observers::{panic_message, AttributeChange, ObserverContext};
use crate::registry::Registry;
use crate::slots::extract;
use crate::watcher::SlotObserver;

/// One upgraded element: its definition, exclusively-owned shadow root,
/// slot watcher, and connection state. Holds only the host's `NodeId` into
/// the page-owned light DOM.
#[derive(Debug)]
struct Instance {
    host: NodeId,
    definition: Arc<ComponentDefinition>,
    shadow: NodeId,
    watcher: SlotObserver,
    connected: bool,
}

/// Owns the tag registry and all live component instances
#[derive(Debug, Default)]
pub struct ComponentRuntime {
    registry: Registry,
    instances: HashMap<NodeId, Instance>,
}

impl ComponentRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a config and define its tag. Returns `Ok(false)` when the
    /// tag was already defined (an expected no-op), `Err` only for a
    /// malformed config.
    pub fn define(&mut self, config: ComponentConfig) -> Result<bool, ConfigError> {
        let definition = ComponentDefinition::new(config)?;
        Ok(self.registry.register(Arc::new(definition)))
    }

    /// Register an already-validated definition
    pub fn register(&mut self, definition: Arc<ComponentDefinition>) -> bool {
        self.registry.register(definition)
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn is_connected(&self, host: NodeId) -> bool {
        self.instances
            .get(&host)
            .map(|i| i.connected)
            .unwrap_or(false)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    /// Attach lifecycle for one element. Upgrades it on first sight (shadow
    /// root + style), extracts and renders, installs the slot watcher
    /// exactly once, and runs the combined connect hooks. Returns `Ok(false)`
    /// if the element's tag has no definition.
    pub fn connect(&mut self, tree: &mut DomTree, host: NodeId) -> Result<bool, DomError> {
        if let Some(instance) = self.instances.get(&host) {
            if instance.connected {
                return Ok(true);
            }
        }

        if !self.instances.contains_key(&host) {
            let Some(tag) = tree.tag_name(host).map(str::to_owned) else {
                return Ok(false);
            };
            let Some(definition) = self.registry.get(&tag) else {
                return Ok(false);
            };
            let shadow = match tree.shadow_root(host) {
                Some(root) => root,
                None => tree.attach_shadow(host)?,
            };
            self.instances.insert(
                host,
                Instance {
                    host,
                    definition,
                    shadow,
                    watcher: SlotObserver::observe(host),
                    connected: false,
                },
            );
        }

        let (definition, shadow) = match self.instances.get_mut(&host) {
            Some(instance) => {
                instance.connected = true;
                if !instance.watcher.is_connected() {
                    instance.watcher = SlotObserver::observe(host);
                }
                (instance.definition.clone(), instance.shadow)
            }
            None => return Ok(false),
        };

        tracing::debug!(tag = definition.tag_name(), ?host, "component connected");
        Self::render_into(tree, &definition, host, shadow);

        let mut cx = ObserverContext::new(tree, host);
        definition.observers().notify_connect(&mut cx);
        if cx.render_requested() {
            Self::render_into(tree, &definition, host, shadow);
        }
        Ok(true)
    }

    /// Detach lifecycle: the watcher stops, and every observer's disconnect
    /// hook runs so connect-time installations (window listeners and the
    /// like) are reversed. Instance state survives for re-attachment.
    pub fn disconnect(&mut self, tree: &mut DomTree, host: NodeId) -> bool {
        let Some(instance) = self.instances.get_mut(&host) else {
            return false;
        };
        if !instance.connected {
            return false;
        }
        instance.connected = false;
        instance.watcher.disconnect();
        let definition = instance.definition.clone();

        tracing::debug!(tag = definition.tag_name(), ?host, "component disconnected");
        let mut cx = ObserverContext::new(tree, host);
        definition.observers().notify_disconnect(&mut cx);
        true
    }

    /// Full teardown when the element is destroyed rather than moved
    pub fn remove(&mut self, tree: &mut DomTree, host: NodeId) -> bool {
        self.disconnect(tree, host);
        self.instances.remove(&host).is_some()
    }

    /// Set an attribute through the runtime, dispatching to the combined
    /// observer contract of a connected instance. Handlers uninterested in
    /// the name are never invoked.
    pub fn set_attribute(
        &mut self,
        tree: &mut DomTree,
        host: NodeId,
        name: &str,
        value: &str,
    ) -> Option<String> {
        let old = tree.set_attribute(host, name, value);
        self.dispatch_attribute(tree, host, name, old.clone(), Some(value.to_string()));
        old
    }

    /// Remove an attribute through the runtime. Dispatches only if the
    /// attribute was actually present.
    pub fn remove_attribute(
        &mut self,
        tree: &mut DomTree,
        host: NodeId,
        name: &str,
    ) -> Option<String> {
        let old = tree.remove_attribute(host, name)?;
        self.dispatch_attribute(tree, host, name, Some(old.clone()), None);
        Some(old)
    }

    fn dispatch_attribute(
        &mut self,
        tree: &mut DomTree,
        host: NodeId,
        name: &str,
        old: Option<String>,
        new: Option<String>,
    ) {
        let Some(instance) = self.instances.get(&host) else {
            return;
        };
        if !instance.connected || !instance.definition.observers().is_observed(name) {
            return;
        }
        let definition = instance.definition.clone();
        let shadow = instance.shadow;

        let change = AttributeChange {
            name: name.to_string(),
            old,
            new,
        };
        let mut cx = ObserverContext::new(tree, host);
        definition.observers().notify_attribute_change(&mut cx, &change);
        if cx.render_requested() {
            Self::render_into(tree, &definition, host, shadow);
        }
    }

    /// Drain the platform mutation journal and re-render every connected
    /// instance whose slotted content changed — once each, however many
    /// records its watcher matched. Returns the number of re-renders.
    pub fn flush(&mut self, tree: &mut DomTree) -> usize {
        let records = tree.take_records();
        if records.is_empty() {
            return 0;
        }
        for record in &records {
            for instance in self.instances.values_mut() {
                instance.watcher.note(tree, record);
            }
        }

        let pending: Vec<NodeId> = self
            .instances
            .values_mut()
            .filter_map(|instance| {
                (instance.connected && instance.watcher.take_pending()).then_some(instance.host)
            })
            .collect();

        let count = pending.len();
        for host in pending {
            self.render(tree, host);
        }
        count
    }

    /// Run the render pipeline for one connected instance
    pub fn render(&mut self, tree: &mut DomTree, host: NodeId) -> bool {
        let Some(instance) = self.instances.get(&host) else {
            return false;
        };
        if !instance.connected {
            return false;
        }
        let definition = instance.definition.clone();
        let shadow = instance.shadow;
        Self::render_into(tree, &definition, host, shadow);
        true
    }

    /// Connect every element in the tree whose tag is defined. The parser
    /// path: after a page's content lands in the tree, one sweep upgrades
    /// all widgets. Returns the number of newly-connected instances.
    pub fn upgrade_all(&mut self, tree: &mut DomTree) -> usize {
        let mut hosts = Vec::new();
        Self::collect_defined(tree, &self.registry, tree.root(), &mut hosts);

        let mut connected = 0;
        for host in hosts {
            match self.connect(tree, host) {
                Ok(true) => connected += 1,
                Ok(false) => {}
                Err(err) => {
                    tracing::warn!(?host, error = %err, "upgrade failed");
                }
            }
        }
        connected
    }

    fn collect_defined(tree: &DomTree, registry: &Registry, node: NodeId, out: &mut Vec<NodeId>) {
        let kids: Vec<NodeId> = tree.children(node).collect();
        for kid in kids {
            if let Some(tag) = tree.tag_name(kid) {
                if registry.is_defined(tag) {
                    out.push(kid);
                }
            }
            Self::collect_defined(tree, registry, kid, out);
        }
    }

    // --- Render pipeline ---

    fn render_into(tree: &mut DomTree, definition: &ComponentDefinition, host: NodeId, shadow: NodeId) {
        Self::ensure_style(tree, definition, shadow);

        let content = extract(tree, host, definition.slot_schema());
        for diagnostic in &content.diagnostics {
            diagnostic.report();
        }

        // Wholesale replace: clear first so a failed render leaves the
        // shadow tree defined but empty
        Self::clear_rendered(tree, shadow);

        let mut cx = RenderContext {
            tree,
            host,
            slots: &content,
        };
        match catch_unwind(AssertUnwindSafe(|| definition.render(&mut cx))) {
            Ok(Ok(node)) => {
                tree.append_child(shadow, node);
            }
            Ok(Err(RenderError::MissingRequiredSlot { slot })) => {
                Diagnostic::MissingRequiredSlot { slot }.report();
            }
            Err(panic) => {
                tracing::warn!(
                    tag = definition.tag_name(),
                    panic = %panic_message(&panic),
                    "render function panicked; shadow tree left empty"
                );
            }
        }
    }

    /// Inject the definition's style text under the shadow root, exactly
    /// once per instance. Survives wholesale re-renders.
    fn ensure_style(tree: &mut DomTree, definition: &ComponentDefinition, shadow: NodeId) {
        if definition.style().is_empty() || Self::style_node(tree, shadow).is_some() {
            return;
        }
        let style = tree.create_element("style");
        let text = tree.create_text(definition.style());
        tree.append_child(style, text);
        tree.prepend_child(shadow, style);
    }

    fn style_node(tree: &DomTree, shadow: NodeId) -> Option<NodeId> {
        tree.children(shadow)
            .find(|&child| tree.tag_name(child) == Some("style"))
    }

    fn clear_rendered(tree: &mut DomTree, shadow: NodeId) {
        let stale: Vec<NodeId> = tree
            .children(shadow)
            .filter(|&child| tree.tag_name(child) != Some("style"))
            .collect();
        for child in stale {
            tree.remove_child(shadow, child);
        }
    }
}
