//! Stat snapshots and bar-fill normalization.
//!
//! The game exposes three stats. Reputation and morale already live on a
//! 0–100 scale; budget is open-ended and gets squeezed onto the bar by
//! clamping to `[0, budget_ceiling]` (2000 by default) and scaling to a
//! percentage. Nothing here fails: junk input is coerced, out-of-range input
//! is clamped.
//!
//! ```rust
//! use sandbox_ui::{normalize, BarKind, StatSnapshot};
//!
//! let snapshot: StatSnapshot =
//!     serde_json::from_str(r#"{"budget": 1000, "rep": 80, "morale": 40}"#).unwrap();
//! let fills = normalize(&snapshot);
//!
//! assert_eq!(fills.fill_for(&BarKind::Budget), 50.0);
//! assert_eq!(fills.fill_for(&BarKind::Reputation), 80.0);
//! assert_eq!(fills.fill_for(&BarKind::Other("cash".into())), 50.0);
//! ```

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Upper bound of the budget bar.
pub const BUDGET_CEILING: f64 = 2000.0;

/// Upper bound of the reputation and morale bars.
pub const PERCENT_MAX: f64 = 100.0;

/// Fill applied to bars whose kind is not recognized.
pub const NEUTRAL_FILL: f64 = 50.0;

/// Clamps `x` into `[lo, hi]`; non-finite input is treated as 0 first.
pub fn clamp(x: f64, lo: f64, hi: f64) -> f64 {
    let x = if x.is_finite() { x } else { 0.0 };
    x.max(lo).min(hi)
}

/// Raw stats as supplied by the host.
///
/// Deserializes from the host's initial-state object. `rep` and
/// `reputation` are both accepted, `rep` winning when both are present;
/// absent or non-numeric fields read as 0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "StatUpdate")]
pub struct StatSnapshot {
    pub budget: f64,
    #[serde(rename = "rep")]
    pub reputation: f64,
    pub morale: f64,
}

impl From<StatUpdate> for StatSnapshot {
    fn from(update: StatUpdate) -> Self {
        let mut snapshot = Self::default();
        snapshot.apply(&update);
        snapshot
    }
}

impl StatSnapshot {
    pub fn new(budget: f64, reputation: f64, morale: f64) -> Self {
        Self {
            budget,
            reputation,
            morale,
        }
    }

    /// Overlays the fields present in `update`.
    pub fn apply(&mut self, update: &StatUpdate) {
        if let Some(budget) = update.budget {
            self.budget = budget;
        }
        if let Some(reputation) = update.reputation() {
            self.reputation = reputation;
        }
        if let Some(morale) = update.morale {
            self.morale = morale;
        }
    }

    /// The raw value of one stat. Score is not part of the snapshot.
    pub fn value(&self, stat: StatName) -> Option<f64> {
        match stat {
            StatName::Budget => Some(self.budget),
            StatName::Reputation => Some(self.reputation),
            StatName::Morale => Some(self.morale),
            StatName::Score => None,
        }
    }
}

/// A partial stat change pushed in after load.
///
/// `rep` wins over `reputation` when both are present.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StatUpdate {
    #[serde(default, deserialize_with = "lenient_optional")]
    pub budget: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional")]
    pub rep: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional")]
    pub reputation: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional")]
    pub morale: Option<f64>,
    #[serde(default, deserialize_with = "lenient_optional")]
    pub score: Option<f64>,
}

impl StatUpdate {
    /// Parses an update from its JSON form.
    pub fn from_json(json: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reputation from either spelling.
    pub fn reputation(&self) -> Option<f64> {
        self.rep.or(self.reputation)
    }

    /// The updated value of one stat, if this update carries it.
    pub fn value(&self, stat: StatName) -> Option<f64> {
        match stat {
            StatName::Budget => self.budget,
            StatName::Reputation => self.reputation(),
            StatName::Morale => self.morale,
            StatName::Score => self.score,
        }
    }
}

/// Semantic stat names that counters can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatName {
    Budget,
    Reputation,
    Morale,
    Score,
}

impl StatName {
    pub const ALL: [StatName; 4] = [
        StatName::Budget,
        StatName::Reputation,
        StatName::Morale,
        StatName::Score,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StatName::Budget => "budget",
            StatName::Reputation => "reputation",
            StatName::Morale => "morale",
            StatName::Score => "score",
        }
    }
}

impl fmt::Display for StatName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stat a bar visualizes, parsed from its `fill-by` attribute.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BarKind {
    Budget,
    Reputation,
    Morale,
    /// Anything else. Rendered at the neutral fill.
    Other(String),
}

impl BarKind {
    /// Parses a `fill-by` attribute value. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "budget" => BarKind::Budget,
            "rep" => BarKind::Reputation,
            "morale" => BarKind::Morale,
            other => BarKind::Other(other.to_string()),
        }
    }

    /// Palette role suffix for this bar.
    pub fn role(&self) -> &'static str {
        match self {
            BarKind::Budget => "budget",
            BarKind::Reputation => "reputation",
            BarKind::Morale => "morale",
            BarKind::Other(_) => "other",
        }
    }
}

/// Fill percentages per bar kind.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FillMap {
    pub budget: f64,
    pub reputation: f64,
    pub morale: f64,
    pub neutral: f64,
}

impl FillMap {
    /// Fill for one bar, always within `[0, 100]`.
    pub fn fill_for(&self, kind: &BarKind) -> f64 {
        let width = match kind {
            BarKind::Budget => self.budget,
            BarKind::Reputation => self.reputation,
            BarKind::Morale => self.morale,
            BarKind::Other(_) => self.neutral,
        };
        clamp(width, 0.0, PERCENT_MAX)
    }
}

impl Default for FillMap {
    fn default() -> Self {
        Normalizer::default().normalize(&StatSnapshot::default())
    }
}

/// Maps raw stats onto bar fills.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalizer {
    budget_ceiling: f64,
    neutral_fill: f64,
}

impl Normalizer {
    /// A normalizer with a custom budget ceiling and neutral fill.
    ///
    /// A non-positive or non-finite ceiling falls back to the default.
    pub fn new(budget_ceiling: f64, neutral_fill: f64) -> Self {
        let budget_ceiling = if budget_ceiling.is_finite() && budget_ceiling > 0.0 {
            budget_ceiling
        } else {
            BUDGET_CEILING
        };
        Self {
            budget_ceiling,
            neutral_fill: clamp(neutral_fill, 0.0, PERCENT_MAX),
        }
    }

    pub fn budget_ceiling(&self) -> f64 {
        self.budget_ceiling
    }

    pub fn neutral_fill(&self) -> f64 {
        self.neutral_fill
    }

    pub fn normalize(&self, snapshot: &StatSnapshot) -> FillMap {
        FillMap {
            budget: clamp(snapshot.budget, 0.0, self.budget_ceiling) / self.budget_ceiling
                * PERCENT_MAX,
            reputation: clamp(snapshot.reputation, 0.0, PERCENT_MAX),
            morale: clamp(snapshot.morale, 0.0, PERCENT_MAX),
            neutral: self.neutral_fill,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self {
            budget_ceiling: BUDGET_CEILING,
            neutral_fill: NEUTRAL_FILL,
        }
    }
}

/// Normalizes with the default ceiling and neutral fill.
pub fn normalize(snapshot: &StatSnapshot) -> FillMap {
    Normalizer::default().normalize(snapshot)
}

/// Coerces a host-supplied value to a number: numbers pass, numeric strings
/// parse, booleans count as 0/1, everything else is 0.
fn coerce_number(value: &serde_json::Value) -> f64 {
    use serde_json::Value;

    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        _ => 0.0,
    };
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

fn lenient_optional<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().map(coerce_number))
}
