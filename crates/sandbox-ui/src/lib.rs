//! Dashboard state for the startup sandbox game.
//!
//! `sandbox-ui` drives the small amount of presentation logic around the
//! game page: animated stat counters, progress bars filled from raw stats,
//! a persisted three-way theme, a transient toast, and hover previews of
//! what each choice would do to the stats.
//!
//! # Quick Start
//!
//! ```rust
//! use sandbox_ui::{
//!     Clock, ManualClock, MemoryPreferences, SandboxConfig, SandboxUi, StatSnapshot, Surface,
//! };
//!
//! let clock = ManualClock::new();
//! let mut ui = SandboxUi::new(Surface::game_page(), MemoryPreferences::new(), &SandboxConfig::default());
//!
//! // Page load: stored theme, counter text, bar widths
//! ui.boot(StatSnapshot::new(1000.0, 80.0, 40.0));
//! assert_eq!(ui.surface().bar(&"budget-bar".into()).unwrap().width, Some(50.0));
//!
//! // Theme toggle: persisted and announced
//! ui.cycle_theme(clock.now()).unwrap();
//! assert!(ui.toast().unwrap().is_visible());
//! ```
//!
//! # Architecture
//!
//! ```text
//! SandboxUi ─┬─ Surface        elements: counters, bars, choices, toast, theme button
//!            ├─ Animator       per-counter ease-out animations
//!            ├─ Normalizer     raw stats → bar fill percentages
//!            ├─ Toast          message + cancellable hide deadline
//!            └─ PreferenceStore  persisted theme
//!
//! DashboardRenderer ── Palette (per theme, light/dark) ── MiniJinja template
//! ```
//!
//! Time is never read implicitly: every time-dependent call takes an
//! `Instant`, and tests drive a [`ManualClock`].
//!
//! # Modules
//!
//! - [`animate`]: easing and counter animation
//! - [`stats`]: snapshots, updates and normalization
//! - [`theme`]: theme preference and palettes
//! - [`style`]: palette style primitives

pub mod animate;
mod config;
mod env;
mod error;
mod prefs;
mod preview;
mod render;
pub mod stats;
pub mod style;
mod surface;
pub mod theme;
mod toast;
mod ui;

pub use animate::{ease_out_cubic, Animator, CounterAnimation, Frame, Frames};
pub use config::{SandboxConfig, CONFIG_ENV};
pub use env::{Clock, EnvReader, ManualClock, MockEnv, RealEnv, SystemClock};
pub use error::{Result, SandboxError};
pub use prefs::{
    default_preferences_path, FilePreferences, MemoryPreferences, PreferenceStore, PREFS_ENV,
};
pub use preview::{format_delta, preview_text, ChoiceDeltas};
pub use render::DashboardRenderer;
pub use stats::{normalize, BarKind, FillMap, Normalizer, StatName, StatSnapshot, StatUpdate};
pub use style::{rgb_to_ansi256, ColorDef, PaletteError, StyleAttributes};
pub use surface::{Bar, Choice, Counter, ElementId, Surface};
pub use theme::{
    detect_color_mode, set_color_mode_detector, ColorMode, Palette, ThemePreference, THEME_KEY,
};
pub use toast::{Toast, ToastLevel, DEFAULT_TOAST_DURATION};
pub use ui::{SandboxUi, TickReport, UpdateCallback};
