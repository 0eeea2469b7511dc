//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the mind map rules.
/// These are independent of infrastructure concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Diagram composition was started from something other than the tree root.
    #[error("diagram composition requires the root node, got: {id}")]
    NotRoot { id: String },

    /// A color string is not in `#RRGGBB` form.
    #[error("invalid color {color:?}: {reason}, needs to be in #AAAAAA format")]
    InvalidColor { color: String, reason: String },
}

impl DomainError {
    pub fn invalid_color(color: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidColor {
            color: color.into(),
            reason: reason.into(),
        }
    }
}
