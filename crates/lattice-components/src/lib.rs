//! Lattice component runtime
//!
//! The shared machinery every widget is built on:
//!
//! - Observer composition: many independent attribute-observation behaviors
//!   merged into the single contract a custom element can expose
//! - Slot contract: declarative schema of named insertion points, validated
//!   against actual light-DOM content at render time
//! - Component factory: shadow root ownership, one-time style injection, and
//!   the wholesale render pipeline
//! - Slot mutation watching: external content edits batched into single
//!   re-renders
//! - Define-once registry of widget tag names
//!
//! Widget faults are contained per instance and reported as diagnostics;
//! only malformed configurations fail hard, at definition time.

mod diagnostics;
mod factory;
mod observers;
mod registry;
mod runtime;
mod slots;
mod watcher;

pub use diagnostics::Diagnostic;
pub use factory::{
    ComponentConfig, ComponentDefinition, ConfigError, RenderContext, RenderError, RenderFn,
};
pub use observers::{
    AttributeChange, AttrHookFn, CombinedObservers, HookError, HookFn, ObserverContext,
    ObserverHandler,
};
pub use registry::Registry;
pub use runtime::ComponentRuntime;
pub use slots::{extract, DefaultContentFn, SlotContent, SlotDef, SlotSchema, SlotSchemaError};
pub use watcher::SlotObserver;
