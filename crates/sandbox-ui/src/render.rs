//! Terminal rendering of a dashboard.
//!
//! The dashboard is drawn through a MiniJinja template. Palette roles are
//! applied with the `style` filter:
//!
//! ```text
//! {{ c.value | style("counter") }}
//! ```
//!
//! Roles resolve against the palette of the active theme in the detected
//! color mode. Unknown roles and empty strings pass through unstyled.
//!
//! ```rust
//! use sandbox_ui::{DashboardRenderer, MemoryPreferences, SandboxConfig, SandboxUi, StatSnapshot, Surface};
//!
//! let mut ui = SandboxUi::new(Surface::game_page(), MemoryPreferences::new(), &SandboxConfig::default());
//! ui.boot(StatSnapshot::new(1000.0, 80.0, 40.0));
//!
//! let out = DashboardRenderer::new().with_colors(false).with_bar_width(10).render(&ui).unwrap();
//! assert!(out.contains("█████░░░░░  50%"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use console::{pad_str, Alignment, Style};
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use crate::error::Result;
use crate::prefs::PreferenceStore;
use crate::preview::preview_text;
use crate::surface::Surface;
use crate::theme::{detect_color_mode, ColorMode, Palette, ThemePreference};
use crate::toast::Toast;
use crate::ui::SandboxUi;

const DASHBOARD_TEMPLATE: &str = include_str!("templates/dashboard.txt");
const TEMPLATE_NAME: &str = "dashboard";

const FILLED: &str = "█";
const EMPTY: &str = "░";

/// Renders dashboards to styled terminal text.
#[derive(Debug, Clone)]
pub struct DashboardRenderer {
    template: String,
    palette: Option<Palette>,
    mode: Option<ColorMode>,
    colored: bool,
    bar_width: usize,
}

impl DashboardRenderer {
    /// Renderer with the built-in template, the active theme's palette and
    /// color mode auto-detection.
    pub fn new() -> Self {
        Self {
            template: DASHBOARD_TEMPLATE.to_string(),
            palette: None,
            mode: None,
            colored: true,
            bar_width: 24,
        }
    }

    /// Replaces the dashboard template.
    pub fn with_template(mut self, source: impl Into<String>) -> Self {
        self.template = source.into();
        self
    }

    /// Uses `palette` regardless of the active theme.
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = Some(palette);
        self
    }

    /// Pins the color mode instead of detecting it.
    pub fn with_mode(mut self, mode: ColorMode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_colors(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn with_bar_width(mut self, width: usize) -> Self {
        self.bar_width = width.max(1);
        self
    }

    pub fn bar_width(&self) -> usize {
        self.bar_width
    }

    /// Renders the controller's current state.
    pub fn render<P: PreferenceStore>(&self, ui: &SandboxUi<P>) -> Result<String> {
        let toast = ui.toast().filter(|t| t.is_visible());
        self.render_surface(ui.surface(), ui.theme(), toast)
    }

    /// Renders a surface directly.
    pub fn render_surface(
        &self,
        surface: &Surface,
        theme: ThemePreference,
        toast: Option<&Toast>,
    ) -> Result<String> {
        let styles = if self.colored {
            let palette = match &self.palette {
                Some(p) => p.clone(),
                None => Palette::for_theme(theme)?,
            };
            let mode = self.mode.unwrap_or_else(detect_color_mode);
            palette
                .resolve_all(Some(mode))
                .into_iter()
                .map(|(role, style)| (role, style.force_styling(true)))
                .collect()
        } else {
            HashMap::new()
        };

        let mut env = Environment::new();
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);
        register_style_filter(&mut env, Arc::new(styles));
        env.add_template(TEMPLATE_NAME, &self.template)?;

        let view = DashboardView::build(surface, theme, toast, self.bar_width);
        let output = env.get_template(TEMPLATE_NAME)?.render(&view)?;
        tracing::trace!(%theme, bytes = output.len(), "dashboard rendered");
        Ok(output)
    }
}

impl Default for DashboardRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn register_style_filter(env: &mut Environment<'_>, styles: Arc<HashMap<String, Style>>) {
    env.add_filter("style", move |value: Value, role: String| -> String {
        let text = value.to_string();
        if text.is_empty() {
            return text;
        }
        match styles.get(&role) {
            Some(style) => style.apply_to(text).to_string(),
            None => text,
        }
    });
}

#[derive(Debug, Serialize)]
struct DashboardView {
    theme: &'static str,
    counters: Vec<CounterRow>,
    bars: Vec<BarRow>,
    choices: Vec<ChoiceRow>,
    toast: Option<ToastRow>,
}

#[derive(Debug, Serialize)]
struct CounterRow {
    label: String,
    value: String,
}

#[derive(Debug, Serialize)]
struct BarRow {
    label: String,
    role: String,
    filled: String,
    empty: String,
    percent: String,
}

#[derive(Debug, Serialize)]
struct ChoiceRow {
    key: String,
    text: String,
    preview: String,
}

#[derive(Debug, Serialize)]
struct ToastRow {
    message: String,
    role: &'static str,
}

impl DashboardView {
    fn build(
        surface: &Surface,
        theme: ThemePreference,
        toast: Option<&Toast>,
        bar_width: usize,
    ) -> Self {
        let counter_labels: Vec<String> = surface
            .counters
            .iter()
            .map(|c| c.label.clone().unwrap_or_else(|| c.id.to_string()))
            .collect();
        let bar_labels: Vec<String> = surface
            .bars
            .iter()
            .map(|b| b.label.clone().unwrap_or_else(|| b.fill_by.clone()))
            .collect();
        let column = counter_labels
            .iter()
            .chain(&bar_labels)
            .map(|l| l.width())
            .max()
            .unwrap_or(0);

        let counters = surface
            .counters
            .iter()
            .zip(counter_labels)
            .map(|(c, label)| CounterRow {
                label: pad(&label, column),
                value: c.text.clone(),
            })
            .collect();

        let bars = surface
            .bars
            .iter()
            .zip(bar_labels)
            .map(|(b, label)| {
                let (filled, empty) = bar_cells(b.width, bar_width);
                BarRow {
                    label: pad(&label, column),
                    role: format!("bar.{}", b.kind().role()),
                    filled: FILLED.repeat(filled),
                    empty: EMPTY.repeat(empty),
                    percent: match b.width {
                        Some(w) => format!("{:>3}%", w.round() as i64),
                        None => "  --".to_string(),
                    },
                }
            })
            .collect();

        let choices = surface
            .choices
            .iter()
            .map(|c| ChoiceRow {
                key: format!("[{}]", c.id),
                text: c.text.clone(),
                preview: preview_text(&c.deltas)
                    .map(|p| format!("  {}", p))
                    .unwrap_or_default(),
            })
            .collect();

        let toast = toast.and_then(|t| {
            t.message().map(|m| ToastRow {
                message: m.to_string(),
                role: t.level().role(),
            })
        });

        Self {
            theme: theme.as_str(),
            counters,
            bars,
            choices,
            toast,
        }
    }
}

fn pad(text: &str, width: usize) -> String {
    pad_str(text, width, Alignment::Left, None).into_owned()
}

/// Splits `width` cells into filled and empty for a fill percentage.
fn bar_cells(fill: Option<f64>, width: usize) -> (usize, usize) {
    let pct = fill.unwrap_or(0.0).clamp(0.0, 100.0);
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    (filled, width - filled)
}
