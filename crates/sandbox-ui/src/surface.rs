//! The host surface: the elements the dashboard reads and writes.
//!
//! A surface is a declarative description of the page: which elements show
//! animated numbers, which are bars (and what they are filled by), which
//! choices carry delta previews, and whether a toast slot and theme button
//! exist. Everything is keyed by [`ElementId`]. Lookups of missing elements
//! return `None` and writes to them are ignored.
//!
//! Surfaces load from YAML or JSON:
//!
//! ```rust
//! use sandbox_ui::Surface;
//!
//! let surface = Surface::from_yaml(r#"
//! counters:
//!   - { id: budget, label: Budget, text: "1000" }
//! bars:
//!   - { id: budget-bar, fill-by: budget }
//! choices:
//!   - { id: hire, text: Hire a CTO, delta-budget: "-300", delta-morale: "10" }
//! toast: true
//! theme-button: true
//! "#).unwrap();
//!
//! assert_eq!(surface.counter(&"budget".into()).unwrap().displayed(), 1000);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animate::parse_displayed;
use crate::error::{Result, SandboxError};
use crate::preview::ChoiceDeltas;
use crate::stats::{BarKind, FillMap};
use crate::theme::ThemePreference;

/// Identity of one element on the surface.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ElementId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An element whose text is an animated number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counter {
    pub id: ElementId,
    #[serde(default)]
    pub label: Option<String>,
    /// The rendered text.
    #[serde(default)]
    pub text: String,
}

impl Counter {
    pub fn new(id: impl Into<ElementId>, label: impl Into<String>, value: i64) -> Self {
        Self {
            id: id.into(),
            label: Some(label.into()),
            text: value.to_string(),
        }
    }

    /// The currently displayed number; non-numeric text reads as 0.
    pub fn displayed(&self) -> i64 {
        parse_displayed(&self.text)
    }
}

/// A progress bar filled by one stat.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub id: ElementId,
    /// Raw `fill-by` attribute.
    #[serde(rename = "fill-by")]
    pub fill_by: String,
    #[serde(default)]
    pub label: Option<String>,
    /// Applied fill percentage; unset until stats are normalized.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl Bar {
    pub fn new(id: impl Into<ElementId>, fill_by: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fill_by: fill_by.into(),
            label: None,
            width: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn kind(&self) -> BarKind {
        BarKind::parse(&self.fill_by)
    }
}

/// A choice button with delta previews.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: ElementId,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub deltas: ChoiceDeltas,
}

/// Everything the dashboard can touch.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Surface {
    #[serde(default)]
    pub counters: Vec<Counter>,
    #[serde(default)]
    pub bars: Vec<Bar>,
    #[serde(default)]
    pub choices: Vec<Choice>,
    /// Whether a toast slot exists.
    #[serde(default)]
    pub toast: bool,
    /// Whether a theme toggle exists.
    #[serde(default)]
    pub theme_button: bool,
    /// The theme attribute on the root element.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePreference>,
}

impl Surface {
    /// An empty surface with no elements.
    pub fn new() -> Self {
        Self::default()
    }

    /// The standard game page: budget, reputation, morale and score
    /// counters, the three stat bars, a toast slot and a theme button.
    pub fn game_page() -> Self {
        Self {
            counters: vec![
                Counter::new("budget", "Budget", 0),
                Counter::new("reputation", "Reputation", 0),
                Counter::new("morale", "Morale", 0),
                Counter::new("score", "Score", 0),
            ],
            bars: vec![
                Bar::new("budget-bar", "budget").with_label("Budget"),
                Bar::new("rep-bar", "rep").with_label("Reputation"),
                Bar::new("morale-bar", "morale").with_label("Morale"),
            ],
            choices: Vec::new(),
            toast: true,
            theme_button: true,
            theme: None,
        }
    }

    pub fn from_yaml(yaml: &str) -> Result<Self> {
        serde_yaml::from_str(yaml).map_err(|e| SandboxError::Surface(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| SandboxError::Surface(e.to_string()))
    }

    /// Loads a surface file; `.json` files parse as JSON, anything else as YAML.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SandboxError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json(&content),
            _ => Self::from_yaml(&content),
        }
    }

    pub fn counter(&self, id: &ElementId) -> Option<&Counter> {
        self.counters.iter().find(|c| &c.id == id)
    }

    /// Writes a number into a counter's text. Missing counters are ignored.
    pub fn set_counter_value(&mut self, id: &ElementId, value: i64) -> bool {
        match self.counters.iter_mut().find(|c| &c.id == id) {
            Some(counter) => {
                counter.text = value.to_string();
                true
            }
            None => false,
        }
    }

    pub fn bar(&self, id: &ElementId) -> Option<&Bar> {
        self.bars.iter().find(|b| &b.id == id)
    }

    pub fn choice(&self, id: &ElementId) -> Option<&Choice> {
        self.choices.iter().find(|c| &c.id == id)
    }

    /// Sets every bar's width from `fills`.
    pub fn apply_fills(&mut self, fills: &FillMap) {
        for bar in &mut self.bars {
            bar.width = Some(fills.fill_for(&bar.kind()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_page_layout() {
        let page = Surface::game_page();
        assert_eq!(page.counters.len(), 4);
        assert_eq!(page.bars.len(), 3);
        assert!(page.toast);
        assert!(page.theme_button);
        assert_eq!(page.bar(&"rep-bar".into()).unwrap().kind(), BarKind::Reputation);
    }

    #[test]
    fn test_set_counter_value_ignores_missing() {
        let mut page = Surface::game_page();
        assert!(page.set_counter_value(&"budget".into(), 1500));
        assert_eq!(page.counter(&"budget".into()).unwrap().text, "1500");
        assert!(!page.set_counter_value(&"cash".into(), 1));
    }

    #[test]
    fn test_counter_junk_text_reads_zero() {
        let counter = Counter {
            id: "x".into(),
            label: None,
            text: "—".to_string(),
        };
        assert_eq!(counter.displayed(), 0);
    }

    #[test]
    fn test_apply_fills_uses_neutral_for_unknown() {
        let mut surface = Surface {
            bars: vec![Bar::new("a", "budget"), Bar::new("b", "runway")],
            ..Surface::default()
        };
        let fills = FillMap {
            budget: 75.0,
            reputation: 0.0,
            morale: 0.0,
            neutral: 50.0,
        };
        surface.apply_fills(&fills);
        assert_eq!(surface.bar(&"a".into()).unwrap().width, Some(75.0));
        assert_eq!(surface.bar(&"b".into()).unwrap().width, Some(50.0));
    }

    #[test]
    fn test_from_yaml_defaults() {
        let surface = Surface::from_yaml("counters: []\n").unwrap();
        assert!(surface.bars.is_empty());
        assert!(!surface.toast);
        assert!(!surface.theme_button);
    }

    #[test]
    fn test_from_json_choices() {
        let surface = Surface::from_json(
            r#"{"choices": [{"id": "pivot", "text": "Pivot", "delta-rep": "-5"}]}"#,
        )
        .unwrap();
        let choice = surface.choice(&"pivot".into()).unwrap();
        assert_eq!(choice.deltas.rep.as_deref(), Some("-5"));
    }

    #[test]
    fn test_invalid_surface() {
        assert!(matches!(
            Surface::from_yaml("counters: 3"),
            Err(SandboxError::Surface(_))
        ));
    }
}
