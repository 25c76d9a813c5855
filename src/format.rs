//! Number formatting for axis ticks and bar annotations.
//!
//! One fixed convention is used everywhere: `,` groups thousands and `.` marks decimals.
//! Revenue-like values are abbreviated by magnitude tier (`k`, `tr`, `tỷ`); count-like
//! values are printed as grouped integers.

use num_format::{Locale, ToFormattedString};
use serde::{Deserialize, Serialize};
use std::fmt;

const THOUSAND: f64 = 1.0e3;
const MILLION: f64 = 1.0e6;
const BILLION: f64 = 1.0e9;

pub const THOUSAND_SUFFIX: &str = " k";
pub const MILLION_SUFFIX: &str = " tr";
pub const BILLION_SUFFIX: &str = " tỷ";

/// How magnitudes are rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NumberStyle {
    /// Tiered abbreviation (`1.50 tỷ`, `2.35 tr`, `4.5 k`, `999`).
    #[default]
    AbbreviatedCurrency,
    /// Integer with grouping separators (`12,345`).
    PlainGrouped,
}

/// Magnitude bracket that decides divisor, suffix and precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Tier {
    Units,
    Thousands,
    Millions,
    Billions,
}

impl Tier {
    /// Tier for a value, chosen on its absolute magnitude.
    pub fn of(value: f64) -> Self {
        let a = value.abs();
        if a >= BILLION {
            Tier::Billions
        } else if a >= MILLION {
            Tier::Millions
        } else if a >= THOUSAND {
            Tier::Thousands
        } else {
            Tier::Units
        }
    }
}

/// Format `value` in the given style.
pub fn format(value: f64, style: NumberStyle) -> String {
    match style {
        NumberStyle::AbbreviatedCurrency => format_abbreviated(value),
        NumberStyle::PlainGrouped => format_grouped(value),
    }
}

/// Tiered abbreviation. Million and billion tiers use 2 decimals, thousands use 1.
pub fn format_abbreviated(value: f64) -> String {
    match Tier::of(value) {
        Tier::Billions => format!("{:.2}{BILLION_SUFFIX}", value / BILLION),
        Tier::Millions => format!("{:.2}{MILLION_SUFFIX}", value / MILLION),
        Tier::Thousands => format!("{:.1}{THOUSAND_SUFFIX}", value / THOUSAND),
        Tier::Units => group_integer(value.round_ties_even()),
    }
}

/// Truncate toward zero and insert grouping separators.
pub fn format_grouped(value: f64) -> String {
    group_integer(value.trunc())
}

fn group_integer(value: f64) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    // `as` saturates, which is fine for display purposes.
    let n = value as i64;
    n.to_formatted_string(&Locale::en)
}

/// Share percentage exactly as supplied, without a trailing `.0` (`12.0` -> `12`).
pub fn format_share(share: f64) -> String {
    if share == 0.0 {
        return "0".to_string();
    }
    share.to_string()
}

/// Text placed next to a bar: the formatted value and an optional share line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedLabel {
    pub value: String,
    pub share: Option<String>,
}

impl FormattedLabel {
    /// Lines in reading order (value first).
    pub fn lines(&self) -> Vec<&str> {
        let mut out = vec![self.value.as_str()];
        if let Some(share) = self.share.as_deref() {
            out.push(share);
        }
        out
    }
}

impl fmt::Display for FormattedLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.share {
            Some(share) => write!(f, "{}\n{}", self.value, share),
            None => f.write_str(&self.value),
        }
    }
}

/// Build the annotation for one bar.
pub fn annotation_text(value: f64, share: Option<f64>, style: NumberStyle) -> FormattedLabel {
    FormattedLabel {
        value: format(value, style),
        share: share.map(|s| format!("({}%)", format_share(s))),
    }
}
