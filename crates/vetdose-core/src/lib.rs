//! Vetdose Core Library
//!
//! Annotation of free-text veterinary dosage instructions and a unit-aware
//! dose calculator for the drug index.
//!
//! # Architecture
//!
//! ```text
//! Drug record dosage field
//!          │
//!          ▼
//!   Species grouping ── "Dogs • 5 mg/kg PO q12h Cats • 2 mg/kg PO"
//!          │
//!          ▼
//!   Point parsing ───── dose / route / frequency / duration
//!          │
//!          ▼
//!   Annotation ──────── raw text kept beside every parse
//!          │
//!          ▼  (user enters weight, optional concentration)
//!   Mini calculator ─── total dose, administration volume
//!          │
//!          ▼
//!   Display / clipboard summary
//! ```
//!
//! # Core Principle
//!
//! **Annotation is additive.** Text that cannot be decomposed is always
//! returned verbatim; nothing in this crate panics or errors on odd input.
//!
//! # Modules
//!
//! - [`models`]: Domain types (SpeciesGroup, ParsedDosagePoint, DoseRange, etc.)
//! - [`annotator`]: Species grouper, point parser, and the annotation pipeline
//! - [`calculator`]: Dose extraction and total/volume computation
//! - [`export`]: Display formatting and clipboard summary

pub mod annotator;
pub mod calculator;
pub mod export;
pub mod models;

// Re-export commonly used types
pub use annotator::{group_by_species, parse_point, Annotator, SpeciesVocabulary};
pub use calculator::{compute_mini_calc, extract_dose_numbers, MiniCalcRequest};
pub use export::{clipboard_summary, format_calculation, DoseSummary};
pub use models::{
    AnnotatedGroup, AnnotatedPoint, CalculationResult, ConcentrationUnit, DosageAnnotation,
    DoseBasis, DoseRange, MassUnit, ParsedDosagePoint, SpeciesGroup, WeightUnit,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::sync::{Arc, RwLock};

// =========================================================================
// Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
#[uniffi(flat_error)]
pub enum DosageError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl<T> From<std::sync::PoisonError<T>> for DosageError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        DosageError::Internal(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Free Functions (exported to FFI)
// =========================================================================

/// Group a dosage block by species with the default vocabulary.
#[uniffi::export]
pub fn group_dosage(text: String) -> Vec<FfiSpeciesGroup> {
    group_by_species(&text).into_iter().map(Into::into).collect()
}

/// Parse a single dosage instruction.
#[uniffi::export]
pub fn parse_dosage_point(text: String) -> Option<FfiParsedPoint> {
    parse_point(&text).map(Into::into)
}

/// Annotate a whole dosage field with the default vocabulary.
#[uniffi::export]
pub fn annotate_dosage(text: String) -> FfiDosageAnnotation {
    Annotator::new().annotate(&text).into()
}

/// Run the calculator from raw form values.
#[uniffi::export]
pub fn compute_dose(
    dose: String,
    weight: String,
    weight_unit: String,
    concentration: String,
    concentration_unit: String,
) -> Result<Option<FfiCalculationResult>, DosageError> {
    let request =
        MiniCalcRequest::from_form(&weight, &weight_unit, &concentration, &concentration_unit)?;
    Ok(request.compute(&dose).map(Into::into))
}

/// Build the clipboard summary for one instruction.
///
/// Returns `None` when the instruction has no usable dose.
#[uniffi::export]
pub fn dose_summary(
    drug: String,
    species: String,
    instruction: String,
    weight: String,
    weight_unit: String,
    concentration: String,
    concentration_unit: String,
) -> Result<Option<String>, DosageError> {
    let request =
        MiniCalcRequest::from_form(&weight, &weight_unit, &concentration, &concentration_unit)?;
    let point = AnnotatedPoint {
        parsed: parse_point(&instruction),
        raw: instruction,
    };
    let Some(result) = point.dose().and_then(|dose| request.compute(dose)) else {
        return Ok(None);
    };
    Ok(Some(clipboard_summary(&drug, &species, &point, &request, &result)))
}

/// Create an annotator with the default species vocabulary.
#[uniffi::export]
pub fn new_annotator() -> Arc<DosageAnnotator> {
    Arc::new(DosageAnnotator {
        annotator: RwLock::new(Annotator::new()),
    })
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe annotator wrapper for FFI.
#[derive(uniffi::Object)]
pub struct DosageAnnotator {
    annotator: RwLock<Annotator>,
}

#[uniffi::export]
impl DosageAnnotator {
    /// Recognize an extra species name when grouping.
    pub fn add_species(&self, name: String) -> Result<(), DosageError> {
        let mut annotator = self.annotator.write()?;
        annotator.vocabulary_mut().add_species(&name);
        Ok(())
    }

    /// Known species names in match order.
    pub fn species(&self) -> Result<Vec<String>, DosageError> {
        let annotator = self.annotator.read()?;
        Ok(annotator.vocabulary().names().to_vec())
    }

    /// Group a dosage block by species.
    pub fn group(&self, text: String) -> Result<Vec<FfiSpeciesGroup>, DosageError> {
        let annotator = self.annotator.read()?;
        let groups = crate::annotator::group_by_species_with(&text, annotator.vocabulary());
        Ok(groups.into_iter().map(Into::into).collect())
    }

    /// Annotate a whole dosage field.
    pub fn annotate(&self, text: String) -> Result<FfiDosageAnnotation, DosageError> {
        let annotator = self.annotator.read()?;
        Ok(annotator.annotate(&text).into())
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe species group.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiSpeciesGroup {
    pub species: String,
    pub points: Vec<String>,
}

impl From<SpeciesGroup> for FfiSpeciesGroup {
    fn from(group: SpeciesGroup) -> Self {
        Self {
            species: group.species,
            points: group.points,
        }
    }
}

/// FFI-safe parsed dosage point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiParsedPoint {
    pub dose: Option<String>,
    pub route: Option<String>,
    pub frequency: Option<String>,
    pub duration: Option<String>,
}

impl From<ParsedDosagePoint> for FfiParsedPoint {
    fn from(point: ParsedDosagePoint) -> Self {
        Self {
            dose: point.dose,
            route: point.route,
            frequency: point.frequency,
            duration: point.duration,
        }
    }
}

/// FFI-safe annotated point.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnnotatedPoint {
    pub raw: String,
    pub parsed: Option<FfiParsedPoint>,
    pub calculable: bool,
}

impl From<AnnotatedPoint> for FfiAnnotatedPoint {
    fn from(point: AnnotatedPoint) -> Self {
        Self {
            calculable: point.is_calculable(),
            raw: point.raw,
            parsed: point.parsed.map(Into::into),
        }
    }
}

/// FFI-safe annotated group.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiAnnotatedGroup {
    pub species: String,
    pub points: Vec<FfiAnnotatedPoint>,
}

/// FFI-safe dosage annotation.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDosageAnnotation {
    pub unspecified: bool,
    pub groups: Vec<FfiAnnotatedGroup>,
}

impl From<DosageAnnotation> for FfiDosageAnnotation {
    fn from(annotation: DosageAnnotation) -> Self {
        match annotation {
            DosageAnnotation::Unspecified => Self {
                unspecified: true,
                groups: Vec::new(),
            },
            DosageAnnotation::Groups(groups) => Self {
                unspecified: false,
                groups: groups
                    .into_iter()
                    .map(|g| FfiAnnotatedGroup {
                        species: g.species,
                        points: g.points.into_iter().map(Into::into).collect(),
                    })
                    .collect(),
            },
        }
    }
}

/// FFI-safe calculation result.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiCalculationResult {
    pub weight_kg: f64,
    pub min_total: Option<f64>,
    pub max_total: Option<f64>,
    pub min_vol: Option<f64>,
    pub max_vol: Option<f64>,
    pub unit: String,
}

impl From<CalculationResult> for FfiCalculationResult {
    fn from(result: CalculationResult) -> Self {
        Self {
            weight_kg: result.weight_kg,
            min_total: result.min_total,
            max_total: result.max_total,
            min_vol: result.min_vol,
            max_vol: result.max_vol,
            unit: result.unit.to_string(),
        }
    }
}
