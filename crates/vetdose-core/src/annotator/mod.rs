//! Dosage text annotator.
//!
//! Pipeline: Raw dosage block → Species grouping → Point parsing → Annotation

mod grouper;
mod parser;
mod vocabulary;

pub use grouper::*;
pub use parser::*;
pub use vocabulary::*;

pub(crate) use parser::match_dose;

use tracing::debug;

use crate::models::{AnnotatedGroup, AnnotatedPoint, DosageAnnotation};

/// Dosage text used by the content files when a drug has no dosage data.
pub const UNSPECIFIED_SENTINEL: &str = "Not specified in source";

/// Check if a dosage field carries no usable text.
pub fn is_unspecified(text: &str) -> bool {
    let text = text.trim();
    let text = text.strip_suffix('.').unwrap_or(text);
    text.is_empty() || text.eq_ignore_ascii_case(UNSPECIFIED_SENTINEL)
}

/// Collapse runs of whitespace (including tabs and newlines) to single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Main annotator that coordinates grouping and parsing.
#[derive(Debug, Clone, Default)]
pub struct Annotator {
    vocabulary: SpeciesVocabulary,
}

impl Annotator {
    /// Create an annotator with the default species vocabulary.
    pub fn new() -> Self {
        Self {
            vocabulary: SpeciesVocabulary::new(),
        }
    }

    /// Create an annotator with a custom species vocabulary.
    pub fn with_vocabulary(vocabulary: SpeciesVocabulary) -> Self {
        Self { vocabulary }
    }

    /// Annotate a whole dosage field.
    ///
    /// Raw text is kept for every point, parsed or not.
    pub fn annotate(&self, text: &str) -> DosageAnnotation {
        if is_unspecified(text) {
            return DosageAnnotation::Unspecified;
        }

        let groups: Vec<AnnotatedGroup> = group_by_species_with(text, &self.vocabulary)
            .into_iter()
            .map(|group| AnnotatedGroup {
                species: group.species,
                points: group
                    .points
                    .into_iter()
                    .map(|raw| {
                        let parsed = parse_point(&raw);
                        AnnotatedPoint { raw, parsed }
                    })
                    .collect(),
            })
            .collect();

        if groups.is_empty() {
            return DosageAnnotation::Unspecified;
        }

        let annotation = DosageAnnotation::Groups(groups);
        debug!(
            groups = annotation.groups().len(),
            points = annotation.points().count(),
            calculable = annotation.calculable_count(),
            "annotated dosage text"
        );
        annotation
    }

    /// Annotate several dosage fields.
    pub fn annotate_all(&self, texts: &[&str]) -> Vec<DosageAnnotation> {
        texts.iter().map(|t| self.annotate(t)).collect()
    }

    /// Get the vocabulary for direct access.
    pub fn vocabulary(&self) -> &SpeciesVocabulary {
        &self.vocabulary
    }

    /// Get the vocabulary for adding species.
    pub fn vocabulary_mut(&mut self) -> &mut SpeciesVocabulary {
        &mut self.vocabulary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unspecified_detection() {
        assert!(is_unspecified(""));
        assert!(is_unspecified("  \n"));
        assert!(is_unspecified("Not specified in source"));
        assert!(is_unspecified("not specified in source."));
        assert!(!is_unspecified("5 mg/kg PO"));
    }

    #[test]
    fn test_annotate_unspecified() {
        let annotator = Annotator::new();

        assert!(annotator.annotate("Not specified in source").is_unspecified());
        assert!(annotator.annotate("Dosage:").is_unspecified());
    }

    #[test]
    fn test_annotate_groups() {
        let annotator = Annotator::new();
        let annotation =
            annotator.annotate("Dogs • 4.4 mg/kg PO SID • Cats • Use with caution, not approved");

        let groups = annotation.groups();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].species, "Dogs");
        assert_eq!(groups[0].points[0].raw, "4.4 mg/kg PO SID");
        assert!(groups[0].points[0].is_calculable());

        // Unparsed points keep their text
        assert_eq!(groups[1].points[0].raw, "Use with caution, not approved");
        assert_eq!(groups[1].points[0].parsed, None);
        assert_eq!(annotation.calculable_count(), 1);
    }

    #[test]
    fn test_annotate_with_custom_vocabulary() {
        let mut annotator = Annotator::new();
        annotator.vocabulary_mut().add_species("Alpacas");

        let annotation = annotator.annotate("Alpacas • 1 mg/kg IM");
        assert_eq!(annotation.groups()[0].species, "Alpacas");
    }

    #[test]
    fn test_annotate_all() {
        let annotator = Annotator::new();
        let annotations = annotator.annotate_all(&["5 mg/kg PO", "Not specified in source"]);

        assert_eq!(annotations.len(), 2);
        assert!(!annotations[0].is_unspecified());
        assert!(annotations[1].is_unspecified());
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("  a\t\tb \n c "), "a b c");
        assert_eq!(collapse_whitespace("   "), "");
    }
}
