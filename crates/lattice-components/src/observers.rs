//! Attribute observer composition
//!
//! The platform gives a custom element exactly one `observed_attributes`
//! list and one set of lifecycle callbacks, but real widgets carry several
//! independent behaviors at once (resize-driven layout, open/closed state,
//! accordion state). Each behavior is authored as a plain [`ObserverHandler`]
//! and a pure merge, [`CombinedObservers::combine`], produces the single
//! contract the element exposes. No inheritance chain, no mixins.

use std::any::Any;
use std::collections::HashSet;
use std::fmt;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use lattice_dom::{DomTree, NodeId};

/// Failure reported by an observer hook
#[derive(Debug, Clone, thiserror::Error)]
#[error("{0}")]
pub struct HookError(pub String);

impl From<&str> for HookError {
    fn from(msg: &str) -> Self {
        Self(msg.to_string())
    }
}

impl From<String> for HookError {
    fn from(msg: String) -> Self {
        Self(msg)
    }
}

/// What hooks see: the host element inside the page-owned tree, plus a way
/// to ask the runtime for a re-render after the hook returns.
pub struct ObserverContext<'a> {
    pub tree: &'a mut DomTree,
    pub host: NodeId,
    render_requested: bool,
}

impl<'a> ObserverContext<'a> {
    pub fn new(tree: &'a mut DomTree, host: NodeId) -> Self {
        Self {
            tree,
            host,
            render_requested: false,
        }
    }

    /// Ask the runtime to re-run the render pipeline once the current
    /// notification completes.
    pub fn request_render(&mut self) {
        self.render_requested = true;
    }

    pub(crate) fn render_requested(&self) -> bool {
        self.render_requested
    }
}

/// One observed attribute change
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeChange {
    pub name: String,
    pub old: Option<String>,
    pub new: Option<String>,
}

/// Connect/disconnect hook
pub type HookFn = Arc<dyn Fn(&mut ObserverContext<'_>) -> Result<(), HookError>>;
/// Attribute-change hook
pub type AttrHookFn = Arc<dyn Fn(&mut ObserverContext<'_>, &AttributeChange) -> Result<(), HookError>>;

/// One independently-authored observation behavior: a set of attribute
/// names it cares about plus optional lifecycle hooks. Plain data; combined
/// with others via [`CombinedObservers::combine`].
#[derive(Clone)]
pub struct ObserverHandler {
    label: &'static str,
    observed_attributes: HashSet<String>,
    on_connect: Option<HookFn>,
    on_disconnect: Option<HookFn>,
    on_attribute_change: Option<AttrHookFn>,
}

impl ObserverHandler {
    pub fn new(label: &'static str, observed: &[&str]) -> Self {
        Self {
            label,
            observed_attributes: observed.iter().map(|s| s.to_string()).collect(),
            on_connect: None,
            on_disconnect: None,
            on_attribute_change: None,
        }
    }

    pub fn on_connect(
        mut self,
        hook: impl Fn(&mut ObserverContext<'_>) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.on_connect = Some(Arc::new(hook));
        self
    }

    pub fn on_disconnect(
        mut self,
        hook: impl Fn(&mut ObserverContext<'_>) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.on_disconnect = Some(Arc::new(hook));
        self
    }

    pub fn on_attribute_change(
        mut self,
        hook: impl Fn(&mut ObserverContext<'_>, &AttributeChange) -> Result<(), HookError> + 'static,
    ) -> Self {
        self.on_attribute_change = Some(Arc::new(hook));
        self
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn observed_attributes(&self) -> &HashSet<String> {
        &self.observed_attributes
    }

    pub fn observes(&self, name: &str) -> bool {
        self.observed_attributes.contains(name)
    }
}

impl fmt::Debug for ObserverHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObserverHandler")
            .field("label", &self.label)
            .field("observed_attributes", &self.observed_attributes)
            .finish_non_exhaustive()
    }
}

/// The merged observation contract a composed element exposes: the union of
/// all constituent attribute interests, dispatching each notification to the
/// handlers that declared it, in the order they were supplied.
pub struct CombinedObservers {
    handlers: Vec<ObserverHandler>,
    observed: HashSet<String>,
}

impl CombinedObservers {
    /// Pure merge of independently-authored handlers.
    pub fn combine(handlers: Vec<ObserverHandler>) -> Self {
        let observed = handlers
            .iter()
            .flat_map(|h| h.observed_attributes.iter().cloned())
            .collect();
        Self { handlers, observed }
    }

    /// De-duplicated union of every handler's observed attributes
    pub fn observed_attributes(&self) -> &HashSet<String> {
        &self.observed
    }

    pub fn is_observed(&self, name: &str) -> bool {
        self.observed.contains(name)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }

    /// Run every handler's connect hook, in supplied order
    pub fn notify_connect(&self, cx: &mut ObserverContext<'_>) {
        for handler in &self.handlers {
            if let Some(hook) = &handler.on_connect {
                run_hook(handler.label, "connect", || hook(cx));
            }
        }
    }

    /// Run every handler's disconnect hook, in supplied order
    pub fn notify_disconnect(&self, cx: &mut ObserverContext<'_>) {
        for handler in &self.handlers {
            if let Some(hook) = &handler.on_disconnect {
                run_hook(handler.label, "disconnect", || hook(cx));
            }
        }
    }

    /// Dispatch an attribute change to the handlers that observe it, each
    /// exactly once, in supplied order. Uninterested handlers never run.
    pub fn notify_attribute_change(&self, cx: &mut ObserverContext<'_>, change: &AttributeChange) {
        for handler in &self.handlers {
            if !handler.observes(&change.name) {
                continue;
            }
            if let Some(hook) = &handler.on_attribute_change {
                run_hook(handler.label, "attribute-change", || hook(cx, change));
            }
        }
    }
}

impl fmt::Debug for CombinedObservers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedObservers")
            .field("handlers", &self.handlers)
            .field("observed", &self.observed)
            .finish()
    }
}

/// Run one hook, containing both `Err` returns and panics so one misbehaving
/// behavior cannot stop its siblings or the element's core lifecycle.
fn run_hook(label: &'static str, stage: &str, hook: impl FnOnce() -> Result<(), HookError>) {
    match catch_unwind(AssertUnwindSafe(hook)) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => {
            tracing::warn!(observer = label, stage, error = %err, "observer hook failed");
        }
        Err(panic) => {
            tracing::warn!(
                observer = label,
                stage,
                panic = %panic_message(&panic),
                "observer hook panicked"
            );
        }
    }
}

pub(crate) fn panic_message(panic: &Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
