//! Unit-aware dose calculator.
//!
//! Turns a weight-based dose expression into a total dose for one patient
//! and, given a drug concentration, an administration volume.
//! Body-surface-area (m2) doses are recognized but not computed.

use tracing::debug;

use crate::annotator::match_dose;
use crate::models::{CalculationResult, ConcentrationUnit, DoseRange, WeightUnit};
use crate::DosageError;

/// Extract numeric bounds, unit and basis from a dose expression.
///
/// Accepts ranges ("2–4 mg/kg", "2 to 4 mg/kg") and single values
/// ("5 mg/kg") anywhere in the string.
pub fn extract_dose_numbers(dose: &str) -> Option<DoseRange> {
    let found = match_dose(dose)?;
    let min = parse_dose_number(found.min)?;
    let max = match found.max {
        Some(max) => parse_dose_number(max)?,
        None => min,
    };

    Some(DoseRange {
        min,
        max,
        unit: found.unit,
        basis: found.basis,
    })
}

/// Compute total dose and volume for a patient.
///
/// Returns `None` when the dose is not recognized or the weight is not a
/// positive number. A missing or non-positive concentration leaves the
/// volumes empty.
pub fn compute_mini_calc(
    dose: &str,
    weight: f64,
    weight_unit: WeightUnit,
    concentration: Option<f64>,
    concentration_unit: ConcentrationUnit,
) -> Option<CalculationResult> {
    let Some(range) = extract_dose_numbers(dose) else {
        debug!(dose, "dose expression not recognized");
        return None;
    };
    if !weight.is_finite() || weight <= 0.0 {
        debug!(weight, "rejected non-positive weight");
        return None;
    }

    let weight_kg = weight_unit.to_kg(weight);

    if !range.is_weight_based() {
        debug!(basis = %range.basis, "body-surface-area dose is not computed");
        return Some(CalculationResult {
            weight_kg,
            min_total: None,
            max_total: None,
            min_vol: None,
            max_vol: None,
            unit: range.unit,
        });
    }

    let min_total = weight_kg * range.min;
    let max_total = weight_kg * range.max;

    let (min_vol, max_vol) = match concentration.filter(|c| c.is_finite() && *c > 0.0) {
        Some(c) => {
            let mg_per_ml = concentration_unit.to_mg_per_ml(c);
            (
                Some(range.unit.to_mg(min_total) / mg_per_ml),
                Some(range.unit.to_mg(max_total) / mg_per_ml),
            )
        }
        None => (None, None),
    };

    Some(CalculationResult {
        weight_kg,
        min_total: Some(min_total),
        max_total: Some(max_total),
        min_vol,
        max_vol,
        unit: range.unit,
    })
}

/// Calculator inputs as collected from the form.
#[derive(Debug, Clone, PartialEq)]
pub struct MiniCalcRequest {
    pub weight: f64,
    pub weight_unit: WeightUnit,
    pub concentration: Option<f64>,
    pub concentration_unit: ConcentrationUnit,
}

impl MiniCalcRequest {
    /// Parse raw form strings.
    ///
    /// Weight must be a positive number. A blank, unparseable or
    /// non-positive concentration counts as not given. Unit strings must be
    /// known.
    pub fn from_form(
        weight: &str,
        weight_unit: &str,
        concentration: &str,
        concentration_unit: &str,
    ) -> Result<Self, DosageError> {
        let weight_value = parse_number(weight)
            .filter(|w| *w > 0.0)
            .ok_or_else(|| {
                DosageError::InvalidInput(format!("invalid weight: {:?}", weight.trim()))
            })?;

        Ok(Self {
            weight: weight_value,
            weight_unit: weight_unit.parse()?,
            concentration: parse_number(concentration).filter(|c| *c > 0.0),
            concentration_unit: concentration_unit.parse()?,
        })
    }

    /// Run the calculator for a dose expression.
    pub fn compute(&self, dose: &str) -> Option<CalculationResult> {
        compute_mini_calc(
            dose,
            self.weight,
            self.weight_unit,
            self.concentration,
            self.concentration_unit,
        )
    }
}

/// Dose numbers may carry thousands separators.
fn parse_dose_number(text: &str) -> Option<f64> {
    text.replace(',', "").parse().ok()
}

fn parse_number(input: &str) -> Option<f64> {
    input.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}
