//! Dosage-point parser.
//!
//! Pulls a dose expression, route, frequency and duration out of a single
//! free-text instruction with fixed patterns. Each field is matched
//! independently; the leftmost match wins.

use std::sync::LazyLock;

use regex::{Captures, Regex};
use tracing::trace;

use super::collapse_whitespace;
use crate::models::{DoseBasis, MassUnit, ParsedDosagePoint};

static ROUTE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(IV|IM|SC|SQ|PO|PR|IO|Topical|Transdermal)\b").expect("valid route regex")
});

static FREQUENCY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:(SID|BID|TID|QID)|q\s?(\d+)\s?h(?:rs?|ours?)?|every\s+(\d+)\s*(?:hours?|hrs?))\b",
    )
    .expect("valid frequency regex")
});

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bfor\s+(\d+)\s*(days?|d|weeks?)\b").expect("valid duration regex")
});

// Numbers may use thousands separators ("1,000") but must not start in the
// middle of another number.
static DOSE_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\d.,])(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d*\.?\d+)\s*(?:-|–|—|\bto\b)\s*(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d*\.?\d+)\s*(mg|mcg|ug|µg)\s*/\s*(kg|m2)\b",
    )
    .expect("valid dose range regex")
});

static DOSE_SINGLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:^|[^\d.,])(\d{1,3}(?:,\d{3})+(?:\.\d+)?|\d*\.?\d+)\s*(mg|mcg|ug|µg)\s*/\s*(kg|m2)\b(?:\s+bw\b)?",
    )
    .expect("valid dose regex")
});

/// Dose expression located in text, numbers kept as written.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct DoseMatch<'t> {
    pub min: &'t str,
    /// Upper bound for ranges
    pub max: Option<&'t str>,
    pub unit: MassUnit,
    pub basis: DoseBasis,
}

impl DoseMatch<'_> {
    /// Canonical text: "5 mg/kg" or "2–4 mg/kg".
    pub fn normalized(&self) -> String {
        match self.max {
            Some(max) => format!("{}–{} {}/{}", self.min, max, self.unit, self.basis),
            None => format!("{} {}/{}", self.min, self.unit, self.basis),
        }
    }
}

/// Find a dose expression, preferring a range over a single value.
pub(crate) fn match_dose(text: &str) -> Option<DoseMatch<'_>> {
    if let Some(caps) = DOSE_RANGE.captures(text) {
        return dose_from_captures(&caps, Some(2), 3, 4);
    }
    let caps = DOSE_SINGLE.captures(text)?;
    dose_from_captures(&caps, None, 2, 3)
}

fn dose_from_captures<'t>(
    caps: &Captures<'t>,
    max_group: Option<usize>,
    unit_group: usize,
    basis_group: usize,
) -> Option<DoseMatch<'t>> {
    Some(DoseMatch {
        min: caps.get(1)?.as_str(),
        max: match max_group {
            Some(group) => Some(caps.get(group)?.as_str()),
            None => None,
        },
        unit: caps.get(unit_group)?.as_str().parse().ok()?,
        basis: caps.get(basis_group)?.as_str().parse().ok()?,
    })
}

/// Parse one dosage instruction.
///
/// Returns `None` when no dose, route, frequency or duration is recognized.
pub fn parse_point(text: &str) -> Option<ParsedDosagePoint> {
    let text = collapse_whitespace(text);

    let point = ParsedDosagePoint {
        dose: match_dose(&text).map(|d| d.normalized()),
        route: parse_route(&text),
        frequency: parse_frequency(&text),
        duration: parse_duration(&text),
    };

    if point.is_empty() {
        trace!(text = %text, "no dosage tokens recognized");
        return None;
    }
    Some(point)
}

/// Route code, uppercased.
pub fn parse_route(text: &str) -> Option<String> {
    ROUTE.find(text).map(|m| m.as_str().to_uppercase())
}

/// Frequency code: SID/BID/TID/QID uppercased, intervals as "q<N>h".
pub fn parse_frequency(text: &str) -> Option<String> {
    let caps = FREQUENCY.captures(text)?;
    if let Some(code) = caps.get(1) {
        return Some(code.as_str().to_uppercase());
    }
    caps.get(2)
        .or_else(|| caps.get(3))
        .map(|hours| format!("q{}h", hours.as_str()))
}

/// Treatment duration as "<N> days" or "<N> weeks".
pub fn parse_duration(text: &str) -> Option<String> {
    let caps = DURATION.captures(text)?;
    let count = caps.get(1)?.as_str();
    let unit = if caps.get(2)?.as_str().to_lowercase().starts_with('w') {
        "weeks"
    } else {
        "days"
    };
    Some(format!("{count} {unit}"))
}
