//! Slot and render diagnostics
//!
//! Non-fatal findings from slot extraction and rendering. A diagnostic is
//! reported through the logging layer and rendering continues; a broken
//! widget never takes sibling widgets or the hosting page down with it.

use std::fmt;

/// A non-fatal finding from slot extraction or rendering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Diagnostic {
    /// A render function needed a slot that resolved to nothing
    MissingRequiredSlot { slot: String },
    /// Assigned content's tag is not legal for the slot
    DisallowedSlotContent { slot: String, tag: String },
    /// Content was assigned through a deprecated slot name
    DeprecatedSlotUsed { slot: String, alias: String },
}

impl Diagnostic {
    /// Stable kind label for log filtering
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingRequiredSlot { .. } => "missing-required-slot",
            Self::DisallowedSlotContent { .. } => "disallowed-slot-content",
            Self::DeprecatedSlotUsed { .. } => "deprecated-slot-used",
        }
    }

    /// Report through the logging layer. Deprecation is informational;
    /// the other kinds are warnings.
    pub fn report(&self) {
        match self {
            Self::DeprecatedSlotUsed { .. } => tracing::info!(kind = self.kind(), "{}", self),
            _ => tracing::warn!(kind = self.kind(), "{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingRequiredSlot { slot } => {
                write!(f, "required slot '{slot}' has no usable content")
            }
            Self::DisallowedSlotContent { slot, tag } => {
                write!(f, "slot '{slot}' does not allow <{tag}> content")
            }
            Self::DeprecatedSlotUsed { slot, alias } => {
                write!(f, "slot '{slot}' was filled through deprecated name '{alias}'")
            }
        }
    }
}
