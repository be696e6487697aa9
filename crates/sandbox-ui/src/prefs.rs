//! Key-value preference storage.
//!
//! The dashboard persists exactly one thing, the selected theme, under
//! [`THEME_KEY`](crate::THEME_KEY). Storage sits behind [`PreferenceStore`]
//! so the UI can run against a JSON file on disk or an in-memory map.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::env::EnvReader;
use crate::error::{Result, SandboxError};

/// Environment variable overriding the preference file location.
pub const PREFS_ENV: &str = "SANDBOX_PREFS";

const APP_DIR: &str = "sandbox-ui";
const PREFS_FILE: &str = "preferences.json";

/// String key-value storage.
pub trait PreferenceStore {
    /// Reads a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Writes a value, persisting it if the store is durable.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory store, for tests and hosts without a writable disk.
#[derive(Debug, Clone, Default)]
pub struct MemoryPreferences {
    values: BTreeMap<String, String>,
}

impl MemoryPreferences {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a value.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a flat JSON object in a file.
///
/// The file is read once on open and rewritten on every `set`. A missing
/// file is an empty store.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl FilePreferences {
    /// Opens the store at `path`.
    ///
    /// # Errors
    ///
    /// Fails if the file exists but cannot be read or is not a JSON object
    /// of strings.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let values = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => serde_json::from_str(&content).map_err(|source| {
                SandboxError::Preferences {
                    path: path.clone(),
                    source,
                }
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(source) => return Err(SandboxError::Read { path, source }),
        };
        Ok(Self { path, values })
    }

    /// Opens the store at `path`, starting empty if it cannot be loaded.
    ///
    /// An unreadable or malformed file is logged and left alone until the
    /// next `set` overwrites it.
    pub fn open_or_empty(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        match Self::open(&path) {
            Ok(prefs) => prefs,
            Err(err) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %err,
                    "ignoring unusable preferences"
                );
                Self {
                    path,
                    values: BTreeMap::new(),
                }
            }
        }
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SandboxError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let body = serde_json::to_string_pretty(&self.values).map_err(|source| {
            SandboxError::Preferences {
                path: self.path.clone(),
                source,
            }
        })?;
        std::fs::write(&self.path, body).map_err(|source| SandboxError::Write {
            path: self.path.clone(),
            source,
        })
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        self.flush()?;
        tracing::debug!(path = %self.path.display(), key, value, "preference saved");
        Ok(())
    }
}

/// Default preference file location.
///
/// `SANDBOX_PREFS` wins; otherwise `$XDG_CONFIG_HOME/sandbox-ui/`, then
/// `$HOME/.config/sandbox-ui/`, then a `.sandbox-ui/` directory relative to
/// the working directory.
pub fn default_preferences_path(env: &dyn EnvReader) -> PathBuf {
    if let Some(path) = env.var(PREFS_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    let config_home = env
        .var("XDG_CONFIG_HOME")
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .or_else(|| {
            env.var("HOME")
                .filter(|p| !p.is_empty())
                .map(|home| PathBuf::from(home).join(".config"))
        });
    match config_home {
        Some(dir) => dir.join(APP_DIR).join(PREFS_FILE),
        None => PathBuf::from(format!(".{}", APP_DIR)).join(PREFS_FILE),
    }
}
