//! Shared observation behaviors
//!
//! Each behavior is one plain [`ObserverHandler`] that a widget config
//! composes alongside its own. Behaviors never assume they are the only one
//! on the element.

use lattice_components::ObserverHandler;

/// Values the attribute protocols treat as "on"
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(value, Some(v) if !v.is_empty() && v != "false" && v != "0")
}

/// Attribute-driven resize protocol: a truthy flip of `recalc` asks the
/// widget to recalculate its layout by re-entering the render path.
pub fn resize_layout() -> ObserverHandler {
    ObserverHandler::new("resize-layout", &["recalc"]).on_attribute_change(|cx, change| {
        if is_truthy(change.new.as_deref()) {
            cx.request_render();
        }
        Ok(())
    })
}

/// Visual open/closed state: any change to `open` re-renders so the widget
/// reflects the state in its shadow markup.
pub fn open_state() -> ObserverHandler {
    ObserverHandler::new("open-state", &["open"]).on_attribute_change(|cx, _| {
        cx.request_render();
        Ok(())
    })
}

/// Loading indicator state for data-backed widgets
pub fn loading_state() -> ObserverHandler {
    ObserverHandler::new("loading-state", &["loading"]).on_attribute_change(|cx, _| {
        cx.request_render();
        Ok(())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy(Some("true")));
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("yes")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(Some("false")));
        assert!(!is_truthy(Some("0")));
        assert!(!is_truthy(None));
    }

    #[test]
    fn test_resize_observes_only_recalc() {
        let handler = resize_layout();
        assert!(handler.observes("recalc"));
        assert!(!handler.observes("open"));
    }
}
