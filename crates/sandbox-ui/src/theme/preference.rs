use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::SandboxError;

/// Preference key the selected theme is stored under.
pub const THEME_KEY: &str = "sandbox_theme";

/// The closed set of visual themes, in cycle order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    #[default]
    Default,
    Cyber,
    Minimal,
}

impl ThemePreference {
    /// Every theme, in cycle order.
    pub const ALL: [ThemePreference; 3] = [
        ThemePreference::Default,
        ThemePreference::Cyber,
        ThemePreference::Minimal,
    ];

    /// The stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            ThemePreference::Default => "default",
            ThemePreference::Cyber => "cyber",
            ThemePreference::Minimal => "minimal",
        }
    }

    /// The next theme, wrapping from the last back to the first.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|t| *t == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Reads a stored value. Absent or unrecognized values read as the default.
    pub fn from_stored(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = SandboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s.trim())
            .ok_or_else(|| SandboxError::UnknownTheme(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_order() {
        assert_eq!(ThemePreference::Default.next(), ThemePreference::Cyber);
        assert_eq!(ThemePreference::Cyber.next(), ThemePreference::Minimal);
        assert_eq!(ThemePreference::Minimal.next(), ThemePreference::Default);
    }

    #[test]
    fn test_three_steps_return_to_start() {
        for start in ThemePreference::ALL {
            assert_eq!(start.next().next().next(), start);
        }
    }

    #[test]
    fn test_from_stored_defaults() {
        assert_eq!(ThemePreference::from_stored(None), ThemePreference::Default);
        assert_eq!(
            ThemePreference::from_stored(Some("neon")),
            ThemePreference::Default
        );
        assert_eq!(
            ThemePreference::from_stored(Some("minimal")),
            ThemePreference::Minimal
        );
    }

    #[test]
    fn test_parse_rejects_unknown() {
        assert_eq!("cyber".parse::<ThemePreference>().ok(), Some(ThemePreference::Cyber));
        assert!(matches!(
            "Cyber".parse::<ThemePreference>(),
            Err(SandboxError::UnknownTheme(_))
        ));
    }

    #[test]
    fn test_serde_lowercase() {
        assert_eq!(
            serde_json::to_string(&ThemePreference::Minimal).unwrap(),
            "\"minimal\""
        );
    }
}
