//! Golden tests for the dosage annotator.
//!
//! These tests verify parsing and grouping against known dosage strings
//! taken from the drug index.

use vetdose_core::annotator::{group_by_species, parse_point};
use vetdose_core::{Annotator, DosageAnnotation};

/// Test case from golden file.
struct GoldenCase {
    id: &'static str,
    input: &'static str,
    expected_dose: Option<&'static str>,
    expected_route: Option<&'static str>,
    expected_frequency: Option<&'static str>,
    expected_duration: Option<&'static str>,
}

fn get_golden_cases() -> Vec<GoldenCase> {
    vec![
        GoldenCase {
            id: "full-instruction",
            input: "5 mg/kg IV q12h for 7 days",
            expected_dose: Some("5 mg/kg"),
            expected_route: Some("IV"),
            expected_frequency: Some("q12h"),
            expected_duration: Some("7 days"),
        },
        GoldenCase {
            id: "carprofen-dogs",
            input: "4.4 mg/kg PO once daily or 2.2 mg/kg PO BID",
            expected_dose: Some("4.4 mg/kg"),
            expected_route: Some("PO"),
            expected_frequency: Some("BID"),
            expected_duration: None,
        },
        GoldenCase {
            id: "meloxicam-range",
            input: "0.1-0.2 mg/kg SC or PO SID",
            expected_dose: Some("0.1–0.2 mg/kg"),
            expected_route: Some("SC"),
            expected_frequency: Some("SID"),
            expected_duration: None,
        },
        GoldenCase {
            id: "dexmedetomidine-mcg",
            input: "Sedation: 5 to 10 mcg/kg IM",
            expected_dose: Some("5–10 mcg/kg"),
            expected_route: Some("IM"),
            expected_frequency: None,
            expected_duration: None,
        },
        GoldenCase {
            id: "ug-normalized",
            input: "2 ug/kg IV every 4 hours",
            expected_dose: Some("2 mcg/kg"),
            expected_route: Some("IV"),
            expected_frequency: Some("q4h"),
            expected_duration: None,
        },
        GoldenCase {
            id: "body-weight-suffix",
            input: "Enrofloxacin 5 mg/kg bw PO q24h for 2 weeks",
            expected_dose: Some("5 mg/kg"),
            expected_route: Some("PO"),
            expected_frequency: Some("q24h"),
            expected_duration: Some("2 weeks"),
        },
        GoldenCase {
            id: "chemotherapy-bsa",
            input: "Doxorubicin 30 mg/m2 IV every 21 days",
            expected_dose: Some("30 mg/m2"),
            expected_route: Some("IV"),
            expected_frequency: None,
            expected_duration: None,
        },
        GoldenCase {
            id: "topical-only",
            input: "Apply topical to affected area TID for 10 d",
            expected_dose: None,
            expected_route: Some("TOPICAL"),
            expected_frequency: Some("TID"),
            expected_duration: Some("10 days"),
        },
        GoldenCase {
            id: "transdermal-interval",
            input: "Transdermal patch q72h",
            expected_dose: None,
            expected_route: Some("TRANSDERMAL"),
            expected_frequency: Some("q72h"),
            expected_duration: None,
        },
        GoldenCase {
            id: "duration-only",
            input: "Continue for 3 weeks after resolution",
            expected_dose: None,
            expected_route: None,
            expected_frequency: None,
            expected_duration: Some("3 weeks"),
        },
    ]
}

#[test]
fn test_golden_cases() {
    for case in get_golden_cases() {
        let parsed = parse_point(case.input)
            .unwrap_or_else(|| panic!("Case {}: expected a parse", case.id));

        assert_eq!(parsed.dose.as_deref(), case.expected_dose, "Case {}: dose mismatch", case.id);
        assert_eq!(
            parsed.route.as_deref(),
            case.expected_route,
            "Case {}: route mismatch",
            case.id
        );
        assert_eq!(
            parsed.frequency.as_deref(),
            case.expected_frequency,
            "Case {}: frequency mismatch",
            case.id
        );
        assert_eq!(
            parsed.duration.as_deref(),
            case.expected_duration,
            "Case {}: duration mismatch",
            case.id
        );
    }
}

#[test]
fn test_unparseable_instructions() {
    let unparsed = vec![
        "Administer as directed.",
        "Consult a veterinarian before use",
        "Not approved for use in food-producing animals",
        "",
    ];

    for text in unparsed {
        assert_eq!(parse_point(text), None, "Expected no parse for {:?}", text);
    }
}

#[test]
fn test_drug_index_blocks() {
    let blocks = vec![
        (
            "Dosage: Dogs • 2.2 mg/kg PO q12h Cats • 0.1 mg/kg PO once",
            vec![("Dogs", 1), ("Cats", 1)],
        ),
        (
            "• 1-2 mg/kg IV Dogs and Cats • 0.5 mg/kg IM • Horses • 0.02 mg/kg IV",
            vec![("General", 1), ("Dogs and Cats", 1), ("Horses", 1)],
        ),
        (
            "Dogs: 10 mg/kg PO q8h. Cats: 5 mg/kg PO q12h.",
            vec![("General", 1)],
        ),
    ];

    for (text, expected) in blocks {
        let groups = group_by_species(text);
        let actual: Vec<(&str, usize)> = groups
            .iter()
            .map(|g| (g.species.as_str(), g.points.len()))
            .collect();
        assert_eq!(actual, expected, "Grouping mismatch for {:?}", text);
    }
}

#[test]
fn test_full_annotation() {
    let annotator = Annotator::new();
    let annotation = annotator.annotate(
        "Dosage • Dogs • 2-4 mg/kg IV q8h • Use lower dose in geriatric patients Cats • 1 mg/kg IV q12h",
    );

    let DosageAnnotation::Groups(groups) = &annotation else {
        panic!("expected groups");
    };
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].species, "Dogs");
    assert_eq!(groups[0].points.len(), 2);
    assert_eq!(groups[0].points[0].dose(), Some("2–4 mg/kg"));
    assert!(!groups[0].points[1].is_calculable());
    assert_eq!(groups[0].points[1].raw, "Use lower dose in geriatric patients");
    assert_eq!(groups[1].species, "Cats");
    assert_eq!(annotation.calculable_count(), 2);
}

#[test]
fn test_sentinel_annotation() {
    let annotator = Annotator::new();

    assert!(annotator.annotate("Not specified in source").is_unspecified());
    assert!(annotator.annotate("").is_unspecified());
}
