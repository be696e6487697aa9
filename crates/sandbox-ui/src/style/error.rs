//! Palette error types.

use thiserror::Error;

/// Errors raised while loading or validating a palette.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PaletteError {
    /// The stylesheet is not valid YAML or has an unexpected shape.
    #[error("failed to parse palette{}: {message}", .name.as_ref().map(|n| format!(" '{}'", n)).unwrap_or_default())]
    Parse {
        name: Option<String>,
        message: String,
    },

    /// A color value could not be understood.
    #[error("invalid color '{value}' for style '{style}': {reason}")]
    InvalidColor {
        style: String,
        value: String,
        reason: String,
    },

    /// A style definition has a key that isn't a known attribute.
    #[error("unknown attribute '{attribute}' in style '{style}'")]
    UnknownAttribute { style: String, attribute: String },

    /// An alias references a style that doesn't exist.
    #[error("style '{from}' aliases non-existent style '{to}'")]
    UnresolvedAlias { from: String, to: String },

    /// A cycle was detected in alias resolution.
    #[error("cycle detected in style aliases: {}", .path.join(" -> "))]
    CycleDetected { path: Vec<String> },
}
