//! Dosage text models produced by the grouper and parser.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DosageError;

/// Species label used when no species marker is found.
pub const GENERAL_SPECIES: &str = "General";

/// A run of dosage points associated with one species or species class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SpeciesGroup {
    /// Species label (e.g., "Dogs", "Horses", "General")
    pub species: String,
    /// Raw point texts in source order
    pub points: Vec<String>,
}

impl SpeciesGroup {
    /// Create a group holding its first point.
    pub fn new(species: impl Into<String>, point: String) -> Self {
        Self {
            species: species.into(),
            points: vec![point],
        }
    }
}

/// Structured annotation of one dosage instruction.
///
/// The parser never returns a value with every field empty; it returns
/// `None` instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ParsedDosagePoint {
    /// Normalized dose expression (e.g., "5 mg/kg", "2–4 mcg/kg")
    pub dose: Option<String>,
    /// Route code (e.g., "IV", "PO", "TOPICAL")
    pub route: Option<String>,
    /// Frequency code (e.g., "BID", "q12h")
    pub frequency: Option<String>,
    /// Treatment duration (e.g., "7 days", "2 weeks")
    pub duration: Option<String>,
}

impl ParsedDosagePoint {
    /// Check if nothing was extracted.
    pub fn is_empty(&self) -> bool {
        self.dose.is_none()
            && self.route.is_none()
            && self.frequency.is_none()
            && self.duration.is_none()
    }

    /// Whether the calculator can be offered for this point.
    pub fn has_dose(&self) -> bool {
        self.dose.is_some()
    }
}

/// Mass unit of a dose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    Mg,
    Mcg,
}

impl MassUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            MassUnit::Mg => "mg",
            MassUnit::Mcg => "mcg",
        }
    }

    /// Convert an amount in this unit to milligrams.
    pub fn to_mg(&self, amount: f64) -> f64 {
        match self {
            MassUnit::Mg => amount,
            MassUnit::Mcg => amount / 1000.0,
        }
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MassUnit {
    type Err = DosageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mg" => Ok(MassUnit::Mg),
            "mcg" | "ug" | "µg" => Ok(MassUnit::Mcg),
            other => Err(DosageError::InvalidInput(format!("unknown mass unit: {other}"))),
        }
    }
}

/// Normalization denominator of a dose.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum DoseBasis {
    /// Per kilogram body weight
    Kg,
    /// Per square meter body-surface-area
    M2,
}

impl DoseBasis {
    pub fn as_str(&self) -> &'static str {
        match self {
            DoseBasis::Kg => "kg",
            DoseBasis::M2 => "m2",
        }
    }
}

impl fmt::Display for DoseBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DoseBasis {
    type Err = DosageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" => Ok(DoseBasis::Kg),
            "m2" => Ok(DoseBasis::M2),
            other => Err(DosageError::InvalidInput(format!("unknown dose basis: {other}"))),
        }
    }
}

/// Numeric bounds of a dose expression. Single values have `min == max`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct DoseRange {
    pub min: f64,
    pub max: f64,
    pub unit: MassUnit,
    pub basis: DoseBasis,
}

impl DoseRange {
    pub fn is_single(&self) -> bool {
        self.min == self.max
    }

    /// Weight-based doses are the only ones the calculator can total.
    pub fn is_weight_based(&self) -> bool {
        self.basis == DoseBasis::Kg
    }
}
