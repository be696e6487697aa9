//! Color value parsing for palettes.
//!
//! Supports:
//!
//! - Named colors: `red`, `green`, `blue`, etc. (8 ANSI colors)
//! - Bright variants: `bright_red`, `bright_green`, etc.
//! - `gray` / `grey` (palette index 8)
//! - 256-color palette: `0` through `255`
//! - RGB hex: `"#ff6b35"` or `"#fff"` (mapped to the nearest 256-color index)

use console::{Color, Style};

/// Parsed color definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDef {
    /// Named ANSI color.
    Named(Color),
    /// Bright variant of a named ANSI color.
    Bright(Color),
    /// 256-color palette index.
    Indexed(u8),
}

impl ColorDef {
    /// Parses a color from its string form.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();

        if let Some(hex) = s.strip_prefix('#') {
            return Self::parse_hex(hex);
        }

        if let Ok(index) = s.parse::<u16>() {
            return u8::try_from(index)
                .map(ColorDef::Indexed)
                .map_err(|_| format!("Color palette index {} out of range (0-255)", index));
        }

        let lower = s.to_ascii_lowercase();
        if let Some(base) = lower.strip_prefix("bright_") {
            return named(base)
                .map(ColorDef::Bright)
                .ok_or_else(|| format!("Unknown color name: {}", s));
        }

        match lower.as_str() {
            "gray" | "grey" => Ok(ColorDef::Indexed(8)),
            other => named(other)
                .map(ColorDef::Named)
                .ok_or_else(|| format!("Unknown color name: {}", s)),
        }
    }

    fn parse_hex(hex: &str) -> Result<Self, String> {
        let digits: Vec<u8> = match hex.len() {
            3 => hex
                .chars()
                .map(|c| c.to_digit(16).map(|d| (d * 17) as u8))
                .collect::<Option<Vec<u8>>>(),
            6 => (0..3)
                .map(|i| {
                    hex.get(i * 2..i * 2 + 2)
                        .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                })
                .collect::<Option<Vec<u8>>>(),
            _ => None,
        }
        .ok_or_else(|| format!("Invalid hex color: #{}", hex))?;

        Ok(ColorDef::Indexed(rgb_to_ansi256((
            digits[0], digits[1], digits[2],
        ))))
    }

    /// Applies this color as the foreground of `style`.
    pub fn apply_fg(self, style: Style) -> Style {
        match self {
            ColorDef::Named(color) => style.fg(color),
            ColorDef::Bright(color) => style.fg(color).bright(),
            ColorDef::Indexed(index) => style.fg(Color::Color256(index)),
        }
    }

    /// Applies this color as the background of `style`.
    pub fn apply_bg(self, style: Style) -> Style {
        match self {
            ColorDef::Named(color) => style.bg(color),
            ColorDef::Bright(color) => style.bg(color).on_bright(),
            ColorDef::Indexed(index) => style.bg(Color::Color256(index)),
        }
    }
}

fn named(name: &str) -> Option<Color> {
    match name {
        "black" => Some(Color::Black),
        "red" => Some(Color::Red),
        "green" => Some(Color::Green),
        "yellow" => Some(Color::Yellow),
        "blue" => Some(Color::Blue),
        "magenta" => Some(Color::Magenta),
        "cyan" => Some(Color::Cyan),
        "white" => Some(Color::White),
        _ => None,
    }
}

/// Converts an RGB triplet to the nearest ANSI 256-color palette index.
///
/// ```rust
/// use sandbox_ui::rgb_to_ansi256;
///
/// assert_eq!(rgb_to_ansi256((255, 0, 0)), 196);
/// assert_eq!(rgb_to_ansi256((0, 255, 0)), 46);
/// ```
pub fn rgb_to_ansi256((r, g, b): (u8, u8, u8)) -> u8 {
    if r == g && g == b {
        if r < 8 {
            16
        } else if r > 248 {
            231
        } else {
            232 + ((r as u16 - 8) * 24 / 247) as u8
        }
    } else {
        let red = (r as u16 * 5 / 255) as u8;
        let green = (g as u16 * 5 / 255) as u8;
        let blue = (b as u16 * 5 / 255) as u8;
        16 + 36 * red + 6 * green + blue
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_named() {
        assert_eq!(ColorDef::parse("cyan"), Ok(ColorDef::Named(Color::Cyan)));
        assert_eq!(ColorDef::parse(" Red "), Ok(ColorDef::Named(Color::Red)));
    }

    #[test]
    fn test_parse_bright() {
        assert_eq!(
            ColorDef::parse("bright_green"),
            Ok(ColorDef::Bright(Color::Green))
        );
        assert!(ColorDef::parse("bright_pink").is_err());
    }

    #[test]
    fn test_parse_gray() {
        assert_eq!(ColorDef::parse("gray"), Ok(ColorDef::Indexed(8)));
        assert_eq!(ColorDef::parse("grey"), Ok(ColorDef::Indexed(8)));
    }

    #[test]
    fn test_parse_index() {
        assert_eq!(ColorDef::parse("208"), Ok(ColorDef::Indexed(208)));
        assert!(ColorDef::parse("256").is_err());
    }

    #[test]
    fn test_parse_hex() {
        assert_eq!(ColorDef::parse("#ff0000"), Ok(ColorDef::Indexed(196)));
        assert_eq!(ColorDef::parse("#0f0"), Ok(ColorDef::Indexed(46)));
        assert!(ColorDef::parse("#12345").is_err());
        assert!(ColorDef::parse("#zzzzzz").is_err());
    }

    #[test]
    fn test_parse_unknown() {
        let err = ColorDef::parse("chartreuse").unwrap_err();
        assert!(err.contains("chartreuse"));
    }

    #[test]
    fn test_grayscale_ramp() {
        assert_eq!(rgb_to_ansi256((0, 0, 0)), 16);
        assert_eq!(rgb_to_ansi256((255, 255, 255)), 231);
        assert_eq!(rgb_to_ansi256((128, 128, 128)), 243);
    }
}
