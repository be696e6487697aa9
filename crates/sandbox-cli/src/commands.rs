use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Context as _;
use console::Term;
use sandbox_ui::{
    preview_text, ChoiceDeltas, Clock, CounterAnimation, DashboardRenderer, EnvReader,
    FilePreferences, PreferenceStore, SandboxConfig, SandboxUi, StatName, StatSnapshot,
    StatUpdate, Surface, SystemClock, ThemePreference, THEME_KEY,
};

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Everything a command needs: resolved config, the surface and a
/// preference store.
pub struct Context {
    config: SandboxConfig,
    surface: Surface,
    prefs: FilePreferences,
    colored: bool,
}

impl Context {
    pub fn load(
        config: Option<&Path>,
        surface: Option<&Path>,
        colored: bool,
        env: &dyn EnvReader,
    ) -> anyhow::Result<Self> {
        let config = SandboxConfig::load(config, env).context("failed to load config")?;
        let surface = match surface {
            Some(path) => Surface::from_file(path)
                .with_context(|| format!("failed to load surface {}", path.display()))?,
            None => Surface::game_page(),
        };
        let prefs_path = config.preferences_path(env);
        tracing::debug!(path = %prefs_path.display(), "opening preferences");
        let prefs = FilePreferences::open_or_empty(prefs_path);
        Ok(Self {
            config,
            surface,
            prefs,
            colored,
        })
    }

    fn ui(&self, state: Option<&str>) -> anyhow::Result<SandboxUi<FilePreferences>> {
        let initial: StatSnapshot = match state {
            Some(json) => serde_json::from_str(json).context("invalid --state JSON")?,
            None => StatSnapshot::default(),
        };

        let mut ui = SandboxUi::new(self.surface.clone(), self.prefs.clone(), &self.config);
        for stat in StatName::ALL {
            if ui.surface().counter(&stat.as_str().into()).is_some() {
                ui.bind_counter(stat, stat.as_str());
            }
        }
        ui.boot(initial);
        Ok(ui)
    }

    fn renderer(&self) -> DashboardRenderer {
        let width = match terminal_size::terminal_size() {
            // label column, padding and percentage take about 20 cells
            Some((terminal_size::Width(cols), _)) => {
                self.config.bar_width.min((cols as usize).saturating_sub(20).max(1))
            }
            None => self.config.bar_width,
        };
        DashboardRenderer::new()
            .with_colors(self.colored)
            .with_bar_width(width)
    }

    /// Drives pending counter animations to completion.
    fn settle<P: PreferenceStore>(&self, ui: &mut SandboxUi<P>) {
        let end = SystemClock.now() + self.config.animation_duration();
        ui.tick(end);
    }

    pub fn show(&self, state: Option<&str>) -> anyhow::Result<String> {
        let mut ui = self.ui(None)?;
        if let Some(json) = state {
            let update = StatUpdate::from_json(json).context("invalid --state JSON")?;
            ui.update_stats(&update, SystemClock.now());
            self.settle(&mut ui);
        }
        Ok(self.renderer().render(&ui)?)
    }

    pub fn theme_show(&self) -> anyhow::Result<String> {
        Ok(ThemePreference::from_stored(self.prefs.get(THEME_KEY).as_deref()).to_string())
    }

    pub fn theme_next(&self) -> anyhow::Result<String> {
        let mut ui = self.ui(None)?;
        ui.cycle_theme(SystemClock.now())
            .context("failed to save theme")?;
        Ok(self.toast_line(&ui))
    }

    pub fn theme_set(&self, name: &str) -> anyhow::Result<String> {
        let theme: ThemePreference = name.parse()?;
        let mut ui = self.ui(None)?;
        ui.set_theme(theme, SystemClock.now())
            .context("failed to save theme")?;
        Ok(self.toast_line(&ui))
    }

    fn toast_line<P: PreferenceStore>(&self, ui: &SandboxUi<P>) -> String {
        let message = ui
            .toast()
            .and_then(|t| t.message())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Theme enabled: {}", ui.theme()));
        if self.colored {
            console::style(message).green().force_styling(true).to_string()
        } else {
            message
        }
    }

    /// Prints frames in place on a terminal; elsewhere only the final value.
    pub fn animate(&self, from: i64, to: i64, duration: Option<u64>) -> anyhow::Result<()> {
        let duration = duration
            .map(Duration::from_millis)
            .unwrap_or_else(|| self.config.animation_duration());
        let term = Term::stdout();
        let live = term.is_term();

        let animation = CounterAnimation::new(from, to, duration, SystemClock.now());
        for frame in animation.frames(&SystemClock) {
            if live {
                term.clear_line()?;
                term.write_str(&frame.value.to_string())?;
            }
            if frame.done {
                if live {
                    term.write_line("")?;
                } else {
                    term.write_line(&frame.value.to_string())?;
                }
            } else {
                thread::sleep(FRAME_INTERVAL);
            }
        }
        Ok(())
    }

    pub fn update(&self, json: &str, state: Option<&str>) -> anyhow::Result<String> {
        let update = StatUpdate::from_json(json).context("invalid update JSON")?;
        let mut ui = self.ui(state)?;
        if let Some(json) = state {
            // counters show the prior state before animating to the update
            let prior = StatUpdate::from_json(json).context("invalid --state JSON")?;
            ui.update_stats(&prior, SystemClock.now());
            self.settle(&mut ui);
        }
        ui.update_stats(&update, SystemClock.now());
        self.settle(&mut ui);
        Ok(self.renderer().render(&ui)?)
    }
}

pub fn preview(budget: Option<String>, rep: Option<String>, morale: Option<String>) -> String {
    let deltas = ChoiceDeltas {
        budget,
        rep,
        morale,
    };
    preview_text(&deltas).unwrap_or_else(|| "no stat changes".to_string())
}
