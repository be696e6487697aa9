//! Style primitives for dashboard palettes.
//!
//! A palette entry is either a set of [`StyleAttributes`] (colors plus text
//! attributes) or an alias naming another entry. Attributes are partial so
//! that light/dark overrides can be merged over a base definition.
//!
//! - [`ColorDef`]: named, bright, 256-palette and hex colors
//! - [`StyleAttributes`]: mergeable attribute set, converted to `console::Style`
//! - [`StyleValue`]: concrete attributes or an alias
//! - [`PaletteError`]: parse and alias-validation failures

mod attributes;
mod color;
mod error;
mod value;

pub use attributes::StyleAttributes;
pub use color::{rgb_to_ansi256, ColorDef};
pub use error::PaletteError;
pub use value::StyleValue;
