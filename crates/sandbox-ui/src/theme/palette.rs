//! Palette struct: the named styles behind a theme.
//!
//! A palette holds base attributes per role, optional light and dark
//! overrides, and aliases. Resolution follows aliases, then merges the
//! mode override over the base:
//!
//! ```rust
//! use sandbox_ui::{ColorMode, Palette};
//!
//! let palette = Palette::from_yaml(r#"
//! counter:
//!   fg: yellow
//!   bold: true
//!   light:
//!     fg: blue
//! title: counter
//! "#).unwrap();
//!
//! let light = palette.attributes("title", Some(ColorMode::Light)).unwrap();
//! assert_eq!(light.bold, Some(true));
//! ```

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use console::Style;
use serde::Deserialize;

use super::adaptive::ColorMode;
use super::preference::ThemePreference;
use crate::style::{ColorDef, PaletteError, StyleAttributes, StyleValue};

const DEFAULT_PALETTE: &str = include_str!("../themes/default.yaml");
const CYBER_PALETTE: &str = include_str!("../themes/cyber.yaml");
const MINIMAL_PALETTE: &str = include_str!("../themes/minimal.yaml");

/// A named collection of adaptive styles.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    name: Option<String>,
    base: HashMap<String, StyleAttributes>,
    light: HashMap<String, StyleAttributes>,
    dark: HashMap<String, StyleAttributes>,
    aliases: HashMap<String, String>,
}

impl Palette {
    /// Creates an empty, unnamed palette.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty palette with the given name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// The built-in palette for a theme.
    pub fn for_theme(theme: ThemePreference) -> Result<Self, PaletteError> {
        let source = match theme {
            ThemePreference::Default => DEFAULT_PALETTE,
            ThemePreference::Cyber => CYBER_PALETTE,
            ThemePreference::Minimal => MINIMAL_PALETTE,
        };
        let palette = Self::parse(source, Some(theme.as_str()))?.with_name(theme.as_str());
        palette.validate()?;
        Ok(palette)
    }

    /// Loads a palette from a YAML file, named after the file stem.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, PaletteError> {
        let path = path.as_ref();
        let name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .map(|s| s.to_string());
        let content = std::fs::read_to_string(path).map_err(|e| PaletteError::Parse {
            name: name.clone(),
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut palette = Self::parse(&content, name.as_deref())?;
        palette.name = name;
        Ok(palette)
    }

    /// Parses a palette from YAML.
    pub fn from_yaml(yaml: &str) -> Result<Self, PaletteError> {
        Self::parse(yaml, None)
    }

    fn parse(yaml: &str, name: Option<&str>) -> Result<Self, PaletteError> {
        let entries: BTreeMap<String, RawEntry> =
            serde_yaml::from_str(yaml).map_err(|e| PaletteError::Parse {
                name: name.map(str::to_string),
                message: e.to_string(),
            })?;

        let mut palette = Palette::new();
        for (role, entry) in entries {
            match entry {
                RawEntry::Alias(target) => {
                    palette.aliases.insert(role, target);
                }
                RawEntry::Definition(def) => {
                    let base = def.base.to_attributes(&role)?;
                    if let Some(light) = def.light {
                        palette.light.insert(role.clone(), light.to_attributes(&role)?);
                    }
                    if let Some(dark) = def.dark {
                        palette.dark.insert(role.clone(), dark.to_attributes(&role)?);
                    }
                    palette.base.insert(role, base);
                }
            }
        }
        Ok(palette)
    }

    /// Sets the name, returning `self` for chaining.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// The palette name, if set.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Adds a role with concrete attributes or an alias.
    pub fn add<V: Into<StyleValue>>(mut self, role: &str, value: V) -> Self {
        match value.into() {
            StyleValue::Concrete(attributes) => {
                self.base.insert(role.to_string(), attributes);
            }
            StyleValue::Alias(target) => {
                self.aliases.insert(role.to_string(), target);
            }
        }
        self
    }

    /// Adds a role with light and dark overrides.
    pub fn add_adaptive(
        mut self,
        role: &str,
        base: StyleAttributes,
        light: Option<StyleAttributes>,
        dark: Option<StyleAttributes>,
    ) -> Self {
        self.base.insert(role.to_string(), base);
        if let Some(light) = light {
            self.light.insert(role.to_string(), light);
        }
        if let Some(dark) = dark {
            self.dark.insert(role.to_string(), dark);
        }
        self
    }

    /// Layers `other` over this palette; its roles win.
    pub fn merge(mut self, other: Palette) -> Self {
        self.base.extend(other.base);
        self.light.extend(other.light);
        self.dark.extend(other.dark);
        self.aliases.extend(other.aliases);
        self
    }

    /// Number of roles (concrete plus aliases).
    pub fn len(&self) -> usize {
        self.base.len() + self.aliases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.base.is_empty() && self.aliases.is_empty()
    }

    /// Every role name, sorted.
    pub fn roles(&self) -> Vec<&str> {
        let mut roles: Vec<&str> = self
            .base
            .keys()
            .chain(self.aliases.keys())
            .map(String::as_str)
            .collect();
        roles.sort_unstable();
        roles
    }

    /// Checks that every alias resolves to a concrete role without cycles.
    pub fn validate(&self) -> Result<(), PaletteError> {
        let mut names: Vec<&String> = self.aliases.keys().collect();
        names.sort();
        for name in names {
            self.resolve_name(name)?;
        }
        Ok(())
    }

    fn resolve_name<'a>(&'a self, role: &'a str) -> Result<&'a str, PaletteError> {
        let mut current = role;
        let mut path = vec![role.to_string()];
        let mut seen = HashSet::from([role]);

        while let Some(target) = self.aliases.get(current) {
            path.push(target.clone());
            if !seen.insert(target.as_str()) {
                return Err(PaletteError::CycleDetected { path });
            }
            if !self.base.contains_key(target) && !self.aliases.contains_key(target) {
                return Err(PaletteError::UnresolvedAlias {
                    from: current.to_string(),
                    to: target.clone(),
                });
            }
            current = target.as_str();
        }
        Ok(current)
    }

    /// Resolved attributes for `role` in `mode`, following aliases.
    ///
    /// Returns `None` for unknown roles and broken aliases.
    pub fn attributes(&self, role: &str, mode: Option<ColorMode>) -> Option<StyleAttributes> {
        let concrete = self.resolve_name(role).ok()?;
        let base = self.base.get(concrete)?;
        let overrides = match mode {
            Some(ColorMode::Light) => self.light.get(concrete),
            Some(ColorMode::Dark) => self.dark.get(concrete),
            None => None,
        };
        Some(match overrides {
            Some(o) => base.merge(o),
            None => *base,
        })
    }

    /// The terminal style for `role`, if defined.
    pub fn style(&self, role: &str, mode: Option<ColorMode>) -> Option<Style> {
        self.attributes(role, mode).map(|a| a.to_style())
    }

    /// Every role resolved to a terminal style. Broken aliases are skipped.
    pub fn resolve_all(&self, mode: Option<ColorMode>) -> HashMap<String, Style> {
        self.roles()
            .into_iter()
            .filter_map(|role| self.style(role, mode).map(|s| (role.to_string(), s)))
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawEntry {
    Alias(String),
    Definition(RawDefinition),
}

#[derive(Debug, Deserialize)]
struct RawDefinition {
    #[serde(flatten)]
    base: RawAttributes,
    #[serde(default)]
    light: Option<RawAttributes>,
    #[serde(default)]
    dark: Option<RawAttributes>,
}

#[derive(Debug, Default, Deserialize)]
struct RawAttributes {
    #[serde(default)]
    fg: Option<RawColor>,
    #[serde(default)]
    bg: Option<RawColor>,
    #[serde(default)]
    bold: Option<bool>,
    #[serde(default)]
    dim: Option<bool>,
    #[serde(default)]
    italic: Option<bool>,
    #[serde(default)]
    underline: Option<bool>,
    #[serde(flatten)]
    unknown: BTreeMap<String, serde_yaml::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawColor {
    Index(u64),
    Name(String),
}

impl RawColor {
    fn to_color(&self, role: &str) -> Result<ColorDef, PaletteError> {
        let text = match self {
            RawColor::Index(i) => i.to_string(),
            RawColor::Name(name) => name.clone(),
        };
        ColorDef::parse(&text).map_err(|reason| PaletteError::InvalidColor {
            style: role.to_string(),
            value: text,
            reason,
        })
    }
}

impl RawAttributes {
    fn to_attributes(&self, role: &str) -> Result<StyleAttributes, PaletteError> {
        if let Some(attribute) = self.unknown.keys().next() {
            return Err(PaletteError::UnknownAttribute {
                style: role.to_string(),
                attribute: attribute.clone(),
            });
        }
        Ok(StyleAttributes {
            fg: self.fg.as_ref().map(|c| c.to_color(role)).transpose()?,
            bg: self.bg.as_ref().map(|c| c.to_color(role)).transpose()?,
            bold: self.bold,
            dim: self.dim,
            italic: self.italic,
            underline: self.underline,
        })
    }
}
