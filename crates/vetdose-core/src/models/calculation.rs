//! Calculator input and output models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::MassUnit;
use crate::DosageError;

/// Pounds per kilogram.
pub const LB_PER_KG: f64 = 2.20462;

/// Unit of the entered patient weight.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lb,
}

impl WeightUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lb => "lb",
        }
    }

    /// Convert a weight in this unit to kilograms.
    pub fn to_kg(&self, weight: f64) -> f64 {
        match self {
            WeightUnit::Kg => weight,
            WeightUnit::Lb => weight / LB_PER_KG,
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = DosageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kg),
            "lb" | "lbs" => Ok(WeightUnit::Lb),
            other => Err(DosageError::InvalidInput(format!("unknown weight unit: {other}"))),
        }
    }
}

/// Unit of the entered drug concentration.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum ConcentrationUnit {
    #[default]
    #[serde(rename = "mg/mL")]
    MgPerMl,
    #[serde(rename = "mcg/mL")]
    McgPerMl,
}

impl ConcentrationUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConcentrationUnit::MgPerMl => "mg/mL",
            ConcentrationUnit::McgPerMl => "mcg/mL",
        }
    }

    /// Convert a concentration in this unit to mg/mL.
    pub fn to_mg_per_ml(&self, concentration: f64) -> f64 {
        match self {
            ConcentrationUnit::MgPerMl => concentration,
            ConcentrationUnit::McgPerMl => concentration / 1000.0,
        }
    }
}

impl fmt::Display for ConcentrationUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConcentrationUnit {
    type Err = DosageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mg/ml" => Ok(ConcentrationUnit::MgPerMl),
            "mcg/ml" | "ug/ml" => Ok(ConcentrationUnit::McgPerMl),
            other => Err(DosageError::InvalidInput(format!(
                "unknown concentration unit: {other}"
            ))),
        }
    }
}

/// Output of the mini calculator. Values are unrounded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CalculationResult {
    /// Patient weight in kilograms
    pub weight_kg: f64,
    /// Lower total dose; None for body-surface-area dosing
    pub min_total: Option<f64>,
    /// Upper total dose; None for body-surface-area dosing
    pub max_total: Option<f64>,
    /// Lower administration volume in mL; None without a concentration
    pub min_vol: Option<f64>,
    /// Upper administration volume in mL; None without a concentration
    pub max_vol: Option<f64>,
    /// Unit of the totals (the dose's own unit)
    pub unit: MassUnit,
}

impl CalculationResult {
    /// Check if totals were computed.
    pub fn has_totals(&self) -> bool {
        self.min_total.is_some() && self.max_total.is_some()
    }

    /// Check if volumes were computed.
    pub fn has_volumes(&self) -> bool {
        self.min_vol.is_some() && self.max_vol.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_conversion() {
        assert_eq!(WeightUnit::Kg.to_kg(10.0), 10.0);
        assert!((WeightUnit::Lb.to_kg(22.0462) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_unit_strings() {
        assert_eq!("lb".parse::<WeightUnit>().unwrap(), WeightUnit::Lb);
        assert_eq!(" KG ".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert!("stone".parse::<WeightUnit>().is_err());

        assert_eq!(
            "mcg/mL".parse::<ConcentrationUnit>().unwrap(),
            ConcentrationUnit::McgPerMl
        );
        assert_eq!(ConcentrationUnit::MgPerMl.to_string(), "mg/mL");
        assert!("mg/L".parse::<ConcentrationUnit>().is_err());
    }

    #[test]
    fn test_concentration_conversion() {
        assert_eq!(ConcentrationUnit::MgPerMl.to_mg_per_ml(50.0), 50.0);
        assert_eq!(ConcentrationUnit::McgPerMl.to_mg_per_ml(500.0), 0.5);
    }

    #[test]
    fn test_concentration_unit_serde() {
        let json = serde_json::to_string(&ConcentrationUnit::McgPerMl).unwrap();
        assert_eq!(json, "\"mcg/mL\"");
    }
}
