use console::Style;

use super::color::ColorDef;

/// A partial set of style attributes.
///
/// `None` means "not specified", which matters when merging: an override
/// only replaces the attributes it sets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StyleAttributes {
    pub fg: Option<ColorDef>,
    pub bg: Option<ColorDef>,
    pub bold: Option<bool>,
    pub dim: Option<bool>,
    pub italic: Option<bool>,
    pub underline: Option<bool>,
}

impl StyleAttributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fg(mut self, color: ColorDef) -> Self {
        self.fg = Some(color);
        self
    }

    pub fn bg(mut self, color: ColorDef) -> Self {
        self.bg = Some(color);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = Some(true);
        self
    }

    pub fn dim(mut self) -> Self {
        self.dim = Some(true);
        self
    }

    pub fn italic(mut self) -> Self {
        self.italic = Some(true);
        self
    }

    pub fn underline(mut self) -> Self {
        self.underline = Some(true);
        self
    }

    /// True if no attribute is set.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Returns `self` with every attribute set in `other` replaced.
    pub fn merge(&self, other: &StyleAttributes) -> StyleAttributes {
        StyleAttributes {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: other.bold.or(self.bold),
            dim: other.dim.or(self.dim),
            italic: other.italic.or(self.italic),
            underline: other.underline.or(self.underline),
        }
    }

    /// Builds the terminal style.
    pub fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(fg) = self.fg {
            style = fg.apply_fg(style);
        }
        if let Some(bg) = self.bg {
            style = bg.apply_bg(style);
        }
        if self.bold == Some(true) {
            style = style.bold();
        }
        if self.dim == Some(true) {
            style = style.dim();
        }
        if self.italic == Some(true) {
            style = style.italic();
        }
        if self.underline == Some(true) {
            style = style.underlined();
        }
        style
    }
}
