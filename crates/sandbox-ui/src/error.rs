//! Error types for the sandbox dashboard.
//!
//! Everything that touches the surface itself degrades silently, so the only
//! fallible operations are the ones doing I/O or parsing: preferences,
//! configuration, surface descriptions, palettes and the dashboard template.

use std::path::PathBuf;

use thiserror::Error;

use crate::style::PaletteError;

/// Errors returned by fallible sandbox operations.
#[derive(Debug, Error)]
pub enum SandboxError {
    /// A file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The preference file is not a JSON object of strings, or the store
    /// could not be encoded.
    #[error("invalid preferences file {}: {source}", .path.display())]
    Preferences {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration file could not be parsed.
    #[error("invalid config: {0}")]
    Config(#[from] serde_yaml::Error),

    /// The configuration parsed but holds an unusable value.
    #[error("invalid config value for '{field}': {message}")]
    ConfigValue {
        field: &'static str,
        message: String,
    },

    /// A surface description could not be parsed.
    #[error("invalid surface description: {0}")]
    Surface(String),

    /// A stat payload could not be parsed.
    #[error("invalid stat payload: {0}")]
    Stats(#[from] serde_json::Error),

    /// A theme name outside the closed set.
    #[error("unknown theme '{0}' (expected one of: default, cyber, minimal)")]
    UnknownTheme(String),

    /// A palette stylesheet failed to parse or validate.
    #[error(transparent)]
    Palette(#[from] PaletteError),

    /// The dashboard template failed to compile or render.
    #[error("render error: {0}")]
    Render(#[from] minijinja::Error),
}

/// Result type for sandbox operations.
pub type Result<T> = std::result::Result<T, SandboxError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_theme_display() {
        let err = SandboxError::UnknownTheme("neon".to_string());
        let msg = err.to_string();
        assert!(msg.contains("neon"));
        assert!(msg.contains("cyber"));
    }

    #[test]
    fn test_read_error_keeps_source() {
        use std::error::Error as _;

        let err = SandboxError::Read {
            path: PathBuf::from("/tmp/prefs.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(err.to_string().contains("/tmp/prefs.json"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: SandboxError = json_err.into();
        assert!(matches!(err, SandboxError::Stats(_)));
    }
}
