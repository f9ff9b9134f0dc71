//! Component configuration and definitions
//!
//! A widget module supplies one [`ComponentConfig`] — tag name, slot schema,
//! style text, render function, observer list — and gets back a validated
//! [`ComponentDefinition`]. Validation is deliberately eager: a malformed
//! config is a programming error in the widget author's code and fails at
//! definition time, not at first render in front of a user.

use std::fmt;
use std::sync::Arc;

use lattice_dom::{is_valid_custom_name, DomTree, NodeId};

use crate::observers::{CombinedObservers, ObserverHandler};
use crate::slots::{SlotContent, SlotSchema, SlotSchemaError};

/// Errors a render function may surface. Caught at the runtime boundary and
/// turned into diagnostics; never propagated past it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("required slot '{slot}' has no usable content")]
    MissingRequiredSlot { slot: String },
}

/// Definition-time configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid custom element tag name '{0}'")]
    InvalidTagName(String),

    #[error(transparent)]
    Schema(#[from] SlotSchemaError),
}

/// What a render function sees: the tree (for building shadow content), the
/// host element, and the slot content resolved for this pass.
pub struct RenderContext<'a> {
    pub tree: &'a mut DomTree,
    pub host: NodeId,
    pub slots: &'a SlotContent,
}

/// Builds the widget's shadow content and returns its root node, detached.
pub type RenderFn = Arc<dyn Fn(&mut RenderContext<'_>) -> Result<NodeId, RenderError>>;

/// The sole public factory input: everything one widget kind needs.
pub struct ComponentConfig {
    tag_name: String,
    slot_schema: SlotSchema,
    style: String,
    render: RenderFn,
    observers: Vec<ObserverHandler>,
}

impl ComponentConfig {
    pub fn new(
        tag_name: &str,
        render: impl Fn(&mut RenderContext<'_>) -> Result<NodeId, RenderError> + 'static,
    ) -> Self {
        Self {
            tag_name: tag_name.to_string(),
            slot_schema: SlotSchema::new(),
            style: String::new(),
            render: Arc::new(render),
            observers: Vec::new(),
        }
    }

    pub fn with_slots(mut self, schema: SlotSchema) -> Self {
        self.slot_schema = schema;
        self
    }

    /// Opaque style text, injected once per instance
    pub fn with_style(mut self, style: &str) -> Self {
        self.style = style.to_string();
        self
    }

    pub fn with_observer(mut self, handler: ObserverHandler) -> Self {
        self.observers.push(handler);
        self
    }
}

impl fmt::Debug for ComponentConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentConfig")
            .field("tag_name", &self.tag_name)
            .field("slots", &self.slot_schema.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}

/// A validated, immutable component definition — the element class the
/// factory produces for a tag name.
pub struct ComponentDefinition {
    tag_name: String,
    slot_schema: SlotSchema,
    style: String,
    render: RenderFn,
    observers: CombinedObservers,
}

impl ComponentDefinition {
    /// Validate a config into a definition. The single fail-fast point.
    pub fn new(config: ComponentConfig) -> Result<Self, ConfigError> {
        if !is_valid_custom_name(&config.tag_name) {
            return Err(ConfigError::InvalidTagName(config.tag_name));
        }
        config.slot_schema.validate()?;

        Ok(Self {
            tag_name: config.tag_name,
            slot_schema: config.slot_schema,
            style: config.style,
            render: config.render,
            observers: CombinedObservers::combine(config.observers),
        })
    }

    pub fn tag_name(&self) -> &str {
        &self.tag_name
    }

    pub fn slot_schema(&self) -> &SlotSchema {
        &self.slot_schema
    }

    pub fn style(&self) -> &str {
        &self.style
    }

    pub fn observers(&self) -> &CombinedObservers {
        &self.observers
    }

    /// Run the author-supplied render function
    pub fn render(&self, cx: &mut RenderContext<'_>) -> Result<NodeId, RenderError> {
        (self.render)(cx)
    }
}

impl fmt::Debug for ComponentDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentDefinition")
            .field("tag_name", &self.tag_name)
            .field("slots", &self.slot_schema.len())
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
