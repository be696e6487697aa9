//! Color mode detection for adaptive palettes.
//!
//! ```rust
//! use sandbox_ui::{set_color_mode_detector, detect_color_mode, ColorMode};
//!
//! set_color_mode_detector(|| ColorMode::Dark);
//! assert_eq!(detect_color_mode(), ColorMode::Dark);
//! ```

use std::sync::Mutex;

use once_cell::sync::Lazy;

/// The user's preferred color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Light mode (light background, dark text).
    Light,
    /// Dark mode (dark background, light text).
    Dark,
}

type ColorModeDetector = fn() -> ColorMode;

static DETECTOR: Lazy<Mutex<ColorModeDetector>> = Lazy::new(|| Mutex::new(os_color_mode));

/// Overrides the detector used to pick light or dark palette variants.
pub fn set_color_mode_detector(detector: ColorModeDetector) {
    let mut guard = DETECTOR.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = detector;
}

/// Detects the preferred color mode, via the OS unless overridden.
///
/// Anything other than an explicit dark preference reads as light.
pub fn detect_color_mode() -> ColorMode {
    let detector = DETECTOR.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    (*detector)()
}

fn os_color_mode() -> ColorMode {
    match dark_light::detect() {
        Ok(dark_light::Mode::Dark) => ColorMode::Dark,
        _ => ColorMode::Light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_detect_color_mode_uses_override() {
        set_color_mode_detector(|| ColorMode::Dark);
        assert_eq!(detect_color_mode(), ColorMode::Dark);

        set_color_mode_detector(|| ColorMode::Light);
        assert_eq!(detect_color_mode(), ColorMode::Light);
    }
}
