//! Choice hover previews.
//!
//! Choice buttons carry the raw stat deltas they would apply. Hovering one
//! shows a toast summarizing them:
//!
//! ```rust
//! use sandbox_ui::{preview_text, ChoiceDeltas};
//!
//! let deltas = ChoiceDeltas {
//!     budget: Some("-200".into()),
//!     rep: Some("15".into()),
//!     morale: None,
//! };
//! assert_eq!(
//!     preview_text(&deltas).as_deref(),
//!     Some("Budget: -200  •  Reputation: +15")
//! );
//! ```

use serde::{Deserialize, Serialize};

/// Joins the parts of a preview.
pub const SEPARATOR: &str = "  •  ";

/// Raw delta attributes of a choice, exactly as the host supplied them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceDeltas {
    #[serde(default, rename = "delta-budget", alias = "budget")]
    pub budget: Option<String>,
    #[serde(default, rename = "delta-rep", alias = "rep")]
    pub rep: Option<String>,
    #[serde(default, rename = "delta-morale", alias = "morale")]
    pub morale: Option<String>,
}

impl ChoiceDeltas {
    /// Deltas from numeric values.
    pub fn from_numbers(budget: Option<i64>, rep: Option<i64>, morale: Option<i64>) -> Self {
        Self {
            budget: budget.map(|n| n.to_string()),
            rep: rep.map(|n| n.to_string()),
            morale: morale.map(|n| n.to_string()),
        }
    }

    /// True if no delta would show up in a preview.
    pub fn is_empty(&self) -> bool {
        [&self.budget, &self.rep, &self.morale]
            .iter()
            .all(|d| d.as_deref().map_or(true, str::is_empty))
    }
}

/// Formats a raw delta with an explicit sign.
///
/// The text is read the way a browser's `Number()` reads an attribute:
/// blank text is 0, `Infinity` and `0x`/`0o`/`0b` literals are numbers.
/// Non-negative numbers get a `+`; text that is not a number is returned
/// unchanged.
pub fn format_delta(raw: &str) -> String {
    let Some(n) = parse_number(raw) else {
        return raw.to_string();
    };
    let sign = if n >= 0.0 { "+" } else { "" };
    format!("{}{}", sign, number_to_string(n))
}

fn parse_number(raw: &str) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return Some(0.0);
    }
    match text {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }

    let radix = match text.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        let digits = &text[2..];
        if digits.is_empty() {
            return None;
        }
        return digits.chars().try_fold(0.0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        });
    }

    // Rust also accepts "inf", "nan" and "infinity" in any case.
    if text.bytes().any(|b| b.is_ascii_alphabetic() && !matches!(b, b'e' | b'E')) {
        return None;
    }
    text.parse::<f64>().ok()
}

fn number_to_string(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    // -0 prints as 0
    let n = if n == 0.0 { 0.0 } else { n };
    let magnitude = n.abs();
    if magnitude >= 1e21 || (magnitude > 0.0 && magnitude < 1e-6) {
        let exp = format!("{:e}", n);
        match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        }
    } else {
        n.to_string()
    }
}

/// Builds the preview text, or `None` when there is nothing to show.
pub fn preview_text(deltas: &ChoiceDeltas) -> Option<String> {
    let parts: Vec<String> = [
        ("Budget", &deltas.budget),
        ("Reputation", &deltas.rep),
        ("Morale", &deltas.morale),
    ]
    .into_iter()
    .filter_map(|(label, raw)| {
        raw.as_deref()
            .filter(|r| !r.is_empty())
            .map(|r| format!("{}: {}", label, format_delta(r)))
    })
    .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(SEPARATOR))
    }
}
