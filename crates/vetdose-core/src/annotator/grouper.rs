//! Species-segmented grouping of bullet-delimited dosage blocks.
//!
//! Drug records list dosages as bullets, with the species either on its own
//! bullet ("Dogs • 5 mg/kg PO") or glued onto the end of the previous bullet
//! ("5 mg/kg PO q12h Cats • 2 mg/kg PO"). A trailing species name belongs to
//! the bullet that follows it.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, trace};

use super::{collapse_whitespace, SpeciesVocabulary};
use crate::models::{SpeciesGroup, GENERAL_SPECIES};

/// Bullet delimiter used by the drug content files.
pub const BULLET: char = '•';

static DOSAGE_HEADER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*dosage\b").expect("valid dosage header regex"));

static DEFAULT_VOCABULARY: LazyLock<SpeciesVocabulary> = LazyLock::new(SpeciesVocabulary::new);

/// Group a dosage block by species using the default vocabulary.
pub fn group_by_species(text: &str) -> Vec<SpeciesGroup> {
    group_by_species_with(text, &DEFAULT_VOCABULARY)
}

/// Group a dosage block by species.
///
/// Never fails: text without bullets comes back as a single "General"
/// point, and empty text gives no groups.
pub fn group_by_species_with(text: &str, vocab: &SpeciesVocabulary) -> Vec<SpeciesGroup> {
    let text = strip_header(text);
    if text.is_empty() {
        return Vec::new();
    }

    if !text.contains(BULLET) {
        return vec![SpeciesGroup::new(GENERAL_SPECIES, text.to_string())];
    }

    let parts: Vec<&str> = text
        .split(BULLET)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();

    match parts.as_slice() {
        [] => Vec::new(),
        [only] => group_single(only, vocab),
        _ => group_parts(&parts, vocab),
    }
}

/// Remove a leading "Dosage" header and surrounding whitespace.
///
/// The word only counts as a header when a colon, bullet, line break or
/// the end of the text follows it.
fn strip_header(text: &str) -> &str {
    let Some(m) = DOSAGE_HEADER.find(text) else {
        return text.trim();
    };
    let rest = text[m.end()..].trim_start_matches([' ', '\t']);
    match rest.chars().next() {
        None | Some('\n' | '\r' | BULLET) => rest.trim(),
        Some(':') => rest[1..].trim(),
        Some(_) => text.trim(),
    }
}

/// A lone bullet only recognizes a species written in front of it.
fn group_single(part: &str, vocab: &SpeciesVocabulary) -> Vec<SpeciesGroup> {
    let (species, rest) = match vocab.match_prefix(part) {
        Some((species, rest)) if !rest.is_empty() => (species, rest),
        _ => (GENERAL_SPECIES, part),
    };
    vec![SpeciesGroup::new(species, collapse_whitespace(rest))]
}

/// Single pass over the bullets carrying the current species.
fn group_parts(parts: &[&str], vocab: &SpeciesVocabulary) -> Vec<SpeciesGroup> {
    let last = parts.len() - 1;

    let state = parts
        .iter()
        .enumerate()
        .fold(GroupingState::new(), |mut state, (i, part)| {
            let (text, next_species) = match vocab.match_suffix(part) {
                Some((species, head)) if i < last => (head, Some(species)),
                _ => (*part, None),
            };

            if let Some(header) = vocab.match_header(text) {
                trace!(species = header, "species header bullet");
                state.switch_to(header);
            } else {
                let cleaned = collapse_whitespace(text);
                if !cleaned.is_empty() {
                    state.push(cleaned);
                }
            }

            if let Some(species) = next_species {
                state.switch_to(species);
            }
            state
        });

    state.groups
}

struct GroupingState {
    current: String,
    groups: Vec<SpeciesGroup>,
}

impl GroupingState {
    fn new() -> Self {
        Self {
            current: GENERAL_SPECIES.to_string(),
            groups: Vec::new(),
        }
    }

    fn switch_to(&mut self, species: &str) {
        if self.current != species {
            debug!(from = %self.current, to = species, "dosage species changed");
            self.current = species.to_string();
        }
    }

    /// Append to the current species' group, creating it on first use.
    fn push(&mut self, point: String) {
        match self.groups.iter_mut().find(|g| g.species == self.current) {
            Some(group) => group.points.push(point),
            None => self
                .groups
                .push(SpeciesGroup::new(self.current.clone(), point)),
        }
    }
}
