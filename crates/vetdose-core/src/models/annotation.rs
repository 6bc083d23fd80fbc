//! Annotated dosage blocks ready for rendering.

use serde::{Deserialize, Serialize};

use super::ParsedDosagePoint;

/// One dosage point with its raw text and optional parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotatedPoint {
    /// Source text, always kept so it can be shown verbatim
    pub raw: String,
    /// Structured annotation, None when nothing was recognized
    pub parsed: Option<ParsedDosagePoint>,
}

impl AnnotatedPoint {
    /// Whether the calculator affordance applies to this point.
    pub fn is_calculable(&self) -> bool {
        self.parsed.as_ref().is_some_and(ParsedDosagePoint::has_dose)
    }

    /// The extracted dose expression, if any.
    pub fn dose(&self) -> Option<&str> {
        self.parsed.as_ref().and_then(|p| p.dose.as_deref())
    }
}

/// Annotated points for one species.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnnotatedGroup {
    pub species: String,
    pub points: Vec<AnnotatedPoint>,
}

/// Annotation of a whole dosage field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "groups", rename_all = "snake_case")]
pub enum DosageAnnotation {
    /// Empty text or the "not specified" sentinel
    Unspecified,
    /// Grouped and parsed points
    Groups(Vec<AnnotatedGroup>),
}

impl DosageAnnotation {
    /// Groups, empty for unspecified dosage.
    pub fn groups(&self) -> &[AnnotatedGroup] {
        match self {
            DosageAnnotation::Unspecified => &[],
            DosageAnnotation::Groups(groups) => groups,
        }
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, DosageAnnotation::Unspecified)
    }

    /// Iterate all points across groups in order.
    pub fn points(&self) -> impl Iterator<Item = &AnnotatedPoint> {
        self.groups().iter().flat_map(|g| g.points.iter())
    }

    /// Number of points that can feed the calculator.
    pub fn calculable_count(&self) -> usize {
        self.points().filter(|p| p.is_calculable()).count()
    }
}
