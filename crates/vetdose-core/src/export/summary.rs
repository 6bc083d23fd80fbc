//! Display strings and the copy-to-clipboard dose summary.

use serde::{Deserialize, Serialize};

use crate::calculator::MiniCalcRequest;
use crate::models::{AnnotatedPoint, CalculationResult};

/// Shown in place of totals for body-surface-area doses.
pub const BSA_NOT_COMPUTED: &str = "not computed (body-surface-area dosing)";

/// Format a number with two decimals.
pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Format a value or a range as "x" or "x–y" with two decimals.
pub fn format_span(min: f64, max: f64) -> String {
    let (min, max) = (format_amount(min), format_amount(max));
    if min == max {
        min
    } else {
        format!("{min}–{max}")
    }
}

/// Display strings for a calculation result.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CalculationDisplay {
    /// e.g. "9.07 kg"
    pub weight: String,
    /// e.g. "20.00–40.00 mg", or the BSA notice
    pub total: String,
    /// e.g. "0.40–0.80 mL"
    pub volume: Option<String>,
}

/// Format a result for display.
pub fn format_calculation(result: &CalculationResult) -> CalculationDisplay {
    let total = match (result.min_total, result.max_total) {
        (Some(min), Some(max)) => format!("{} {}", format_span(min, max), result.unit),
        _ => BSA_NOT_COMPUTED.to_string(),
    };
    let volume = match (result.min_vol, result.max_vol) {
        (Some(min), Some(max)) => Some(format!("{} mL", format_span(min, max))),
        _ => None,
    };

    CalculationDisplay {
        weight: format!("{} kg", format_amount(result.weight_kg)),
        total,
        volume,
    }
}

/// Summary of one calculation, copied to the clipboard as plain text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoseSummary {
    /// Drug name
    pub drug: String,
    /// Species group the instruction came from
    pub species: String,
    /// Instruction text as written in the source
    pub instruction: String,
    /// Extracted dose expression
    pub dose: Option<String>,
    /// Formatted values
    pub display: CalculationDisplay,
    /// Concentration used for the volume, e.g. "50.00 mg/mL"
    pub concentration: Option<String>,
}

impl DoseSummary {
    /// Build a summary from a calculated point.
    pub fn new(
        drug: &str,
        species: &str,
        point: &AnnotatedPoint,
        request: &MiniCalcRequest,
        result: &CalculationResult,
    ) -> Self {
        let display = format_calculation(result);
        let concentration = match (request.concentration, &display.volume) {
            (Some(c), Some(_)) => Some(format!(
                "{} {}",
                format_amount(c),
                request.concentration_unit
            )),
            _ => None,
        };

        Self {
            drug: drug.to_string(),
            species: species.to_string(),
            instruction: point.raw.clone(),
            dose: point.dose().map(String::from),
            display,
            concentration,
        }
    }

    /// Plain-text block for the clipboard.
    pub fn to_text(&self) -> String {
        let mut lines = vec![
            format!("{} ({})", self.drug, self.species),
            format!("Instruction: {}", self.instruction),
        ];
        if let Some(dose) = &self.dose {
            lines.push(format!("Dose: {dose}"));
        }
        lines.push(format!("Weight: {}", self.display.weight));
        lines.push(format!("Total dose: {}", self.display.total));
        if let Some(volume) = &self.display.volume {
            match &self.concentration {
                Some(c) => lines.push(format!("Volume: {volume} (at {c})")),
                None => lines.push(format!("Volume: {volume}")),
            }
        }
        lines.join("\n")
    }

    /// Serialize to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Clipboard text for a calculated point.
pub fn clipboard_summary(
    drug: &str,
    species: &str,
    point: &AnnotatedPoint,
    request: &MiniCalcRequest,
    result: &CalculationResult,
) -> String {
    DoseSummary::new(drug, species, point, request, result).to_text()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotator::parse_point;
    use crate::models::{ConcentrationUnit, MassUnit, WeightUnit};

    fn result(
        min_total: Option<f64>,
        max_total: Option<f64>,
        vol: Option<(f64, f64)>,
    ) -> CalculationResult {
        CalculationResult {
            weight_kg: 10.0,
            min_total,
            max_total,
            min_vol: vol.map(|v| v.0),
            max_vol: vol.map(|v| v.1),
            unit: MassUnit::Mg,
        }
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0.4), "0.40");
        assert_eq!(format_amount(90.718581), "90.72");
        assert_eq!(format_amount(20.0), "20.00");
    }

    #[test]
    fn test_format_span() {
        assert_eq!(format_span(20.0, 40.0), "20.00–40.00");
        assert_eq!(format_span(5.0, 5.0), "5.00");
        // Equal after rounding prints once
        assert_eq!(format_span(1.001, 1.002), "1.00");
    }

    #[test]
    fn test_format_calculation() {
        let display = format_calculation(&result(Some(20.0), Some(40.0), Some((0.4, 0.8))));
        assert_eq!(display.weight, "10.00 kg");
        assert_eq!(display.total, "20.00–40.00 mg");
        assert_eq!(display.volume.as_deref(), Some("0.40–0.80 mL"));

        let display = format_calculation(&result(None, None, None));
        assert_eq!(display.total, BSA_NOT_COMPUTED);
        assert_eq!(display.volume, None);
    }

    #[test]
    fn test_clipboard_summary() {
        let point = AnnotatedPoint {
            raw: "2-4 mg/kg IV q12h".into(),
            parsed: parse_point("2-4 mg/kg IV q12h"),
        };
        let request = MiniCalcRequest {
            weight: 10.0,
            weight_unit: WeightUnit::Kg,
            concentration: Some(50.0),
            concentration_unit: ConcentrationUnit::MgPerMl,
        };
        let calc = request.compute(point.dose().unwrap()).unwrap();

        let text = clipboard_summary("Carprofen", "Dogs", &point, &request, &calc);
        assert_eq!(
            text,
            "Carprofen (Dogs)\n\
             Instruction: 2-4 mg/kg IV q12h\n\
             Dose: 2–4 mg/kg\n\
             Weight: 10.00 kg\n\
             Total dose: 20.00–40.00 mg\n\
             Volume: 0.40–0.80 mL (at 50.00 mg/mL)"
        );
    }

    #[test]
    fn test_summary_without_volume() {
        let point = AnnotatedPoint {
            raw: "10 mg/kg PO".into(),
            parsed: parse_point("10 mg/kg PO"),
        };
        let request = MiniCalcRequest {
            weight: 20.0,
            weight_unit: WeightUnit::Lb,
            concentration: None,
            concentration_unit: ConcentrationUnit::MgPerMl,
        };
        let calc = request.compute("10 mg/kg").unwrap();
        let summary = DoseSummary::new("Cefalexin", "General", &point, &request, &calc);

        assert_eq!(summary.concentration, None);
        let text = summary.to_text();
        assert!(text.contains("Weight: 9.07 kg"));
        assert!(text.contains("Total dose: 90.72 mg"));
        assert!(!text.contains("Volume"));

        let json = summary.to_json().unwrap();
        assert!(json.contains("\"drug\": \"Cefalexin\""));
    }
}
