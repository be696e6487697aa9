//! Dashboard configuration.
//!
//! All settings have defaults matching the stock page, so a config file is
//! optional. Lookup order: an explicit path, then the `SANDBOX_CONFIG`
//! environment variable, then the defaults.
//!
//! ```yaml
//! animation-ms: 420
//! toast-ms: 1400
//! budget-ceiling: 2000
//! neutral-fill: 50
//! bar-width: 24
//! preferences: ~/.config/sandbox-ui/preferences.json
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::env::EnvReader;
use crate::error::{Result, SandboxError};
use crate::prefs::default_preferences_path;
use crate::stats::{Normalizer, BUDGET_CEILING, NEUTRAL_FILL};

/// Environment variable naming a config file.
pub const CONFIG_ENV: &str = "SANDBOX_CONFIG";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case", deny_unknown_fields)]
pub struct SandboxConfig {
    /// Counter animation window in milliseconds.
    pub animation_ms: u64,
    /// Toast visibility in milliseconds.
    pub toast_ms: u64,
    /// Budget mapped to a full bar.
    pub budget_ceiling: f64,
    /// Fill for bars of unknown kind.
    pub neutral_fill: f64,
    /// Bar width in terminal cells.
    pub bar_width: usize,
    /// Preference file; derived from the environment when unset.
    #[serde(rename = "preferences", skip_serializing_if = "Option::is_none")]
    pub preferences_path: Option<PathBuf>,
}

impl Default for SandboxConfig {
    fn default() -> Self {
        Self {
            animation_ms: 420,
            toast_ms: 1400,
            budget_ceiling: BUDGET_CEILING,
            neutral_fill: NEUTRAL_FILL,
            bar_width: 24,
            preferences_path: None,
        }
    }
}

impl SandboxConfig {
    /// Parses and validates a YAML config.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a YAML config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| SandboxError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Resolves the config from an explicit path, the environment, or defaults.
    pub fn load(explicit: Option<&Path>, env: &dyn EnvReader) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config");
            return Self::from_file(path);
        }
        match env.var(CONFIG_ENV).filter(|p| !p.is_empty()) {
            Some(path) => {
                tracing::debug!(%path, "loading config from {}", CONFIG_ENV);
                Self::from_file(path)
            }
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.animation_ms == 0 {
            return Err(SandboxError::ConfigValue {
                field: "animation-ms",
                message: "must be greater than 0".to_string(),
            });
        }
        if !(self.budget_ceiling.is_finite() && self.budget_ceiling > 0.0) {
            return Err(SandboxError::ConfigValue {
                field: "budget-ceiling",
                message: format!("must be a positive number, got {}", self.budget_ceiling),
            });
        }
        if !(0.0..=100.0).contains(&self.neutral_fill) {
            return Err(SandboxError::ConfigValue {
                field: "neutral-fill",
                message: format!("must be within 0..=100, got {}", self.neutral_fill),
            });
        }
        if self.bar_width == 0 {
            return Err(SandboxError::ConfigValue {
                field: "bar-width",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }

    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }

    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.budget_ceiling, self.neutral_fill)
    }

    /// The configured preference file, or the environment-derived default.
    pub fn preferences_path(&self, env: &dyn EnvReader) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(|| default_preferences_path(env))
    }
}
