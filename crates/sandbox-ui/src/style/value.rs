//! Style value types for concrete styles and aliases.

use super::attributes::StyleAttributes;

/// A palette entry: concrete attributes or an alias to another entry.
///
/// Aliases let semantic roles point at presentation roles:
///
/// ```rust
/// use sandbox_ui::{Palette, StyleAttributes, ColorDef};
///
/// let palette = Palette::new()
///     .add("accent", StyleAttributes::new().fg(ColorDef::parse("cyan").unwrap()).bold())
///     .add("counter", "accent")
///     .add("title", "counter");
/// assert!(palette.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StyleValue {
    /// Concrete attributes.
    Concrete(StyleAttributes),
    /// An alias referencing another entry by name.
    Alias(String),
}

impl From<StyleAttributes> for StyleValue {
    fn from(attributes: StyleAttributes) -> Self {
        StyleValue::Concrete(attributes)
    }
}

impl From<&str> for StyleValue {
    fn from(name: &str) -> Self {
        StyleValue::Alias(name.to_string())
    }
}

impl From<String> for StyleValue {
    fn from(name: String) -> Self {
        StyleValue::Alias(name)
    }
}
