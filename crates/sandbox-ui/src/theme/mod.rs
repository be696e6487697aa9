//! Themes: the persisted preference and the palettes behind it.
//!
//! The visible theme is one of a closed set ([`ThemePreference`]), cycled
//! forward on user action and stored under a single preference key. Each
//! theme maps to a [`Palette`]: a YAML stylesheet of named roles
//! (`counter`, `bar.budget`, `toast.info`, ...) that adapts to the
//! terminal's light/dark mode.
//!
//! ## Palette format
//!
//! ```yaml
//! # Shared across modes
//! title:
//!   fg: cyan
//!   bold: true
//!
//! # Mode-specific overrides merge over the base
//! counter:
//!   fg: yellow
//!   light:
//!     fg: blue
//!
//! # Aliases
//! choice: label
//! ```
//!
//! Override color mode detection in tests with [`set_color_mode_detector`].

mod adaptive;
mod palette;
mod preference;

pub use adaptive::{detect_color_mode, set_color_mode_detector, ColorMode};
pub use palette::Palette;
pub use preference::{ThemePreference, THEME_KEY};
