//! Drug lookup by exact or fuzzy name.

use strsim::{jaro_winkler, normalized_levenshtein};
use tracing::{debug, info};

use vetdose_core::{Annotator, DosageAnnotation};

use crate::records::{parse_drug_records, DrugRecord, IndexError, IndexResult};

/// Minimum score for a record to appear in search results.
const MIN_SCORE: f64 = 0.70;

/// A ranked search result.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub record: &'a DrugRecord,
    /// Best score over the generic and brand names (0.0 - 1.0)
    pub score: f64,
}

/// In-memory drug index.
#[derive(Debug, Default)]
pub struct DrugIndex {
    records: Vec<DrugRecord>,
    annotator: Annotator,
}

impl DrugIndex {
    /// Build an index over already parsed records.
    pub fn new(records: Vec<DrugRecord>) -> Self {
        Self {
            records,
            annotator: Annotator::new(),
        }
    }

    /// Load an index from a drug JSON file's contents.
    pub fn from_json(json: &str) -> IndexResult<Self> {
        let records = parse_drug_records(json)?;
        info!(count = records.len(), "drug index loaded");
        Ok(Self::new(records))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a drug by generic or brand name, ignoring case.
    pub fn get(&self, name: &str) -> Option<&DrugRecord> {
        self.records.iter().find(|r| r.is_named(name))
    }

    /// Rank records against a free-text query, best first.
    pub fn search(&self, query: &str, limit: usize) -> Vec<SearchHit<'_>> {
        let query = query.trim().to_lowercase();
        if query.is_empty() || limit == 0 {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit<'_>> = self
            .records
            .iter()
            .map(|record| SearchHit {
                record,
                score: score_record(record, &query),
            })
            .filter(|hit| hit.score >= MIN_SCORE)
            .collect();

        // Stable sort keeps file order for ties
        hits.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits.truncate(limit);

        debug!(query = %query, hits = hits.len(), "drug search");
        hits
    }

    /// Annotate the dosage field of a drug found by name.
    pub fn annotate(&self, name: &str) -> IndexResult<DosageAnnotation> {
        let record = self
            .get(name)
            .ok_or_else(|| IndexError::NotFound(name.trim().to_string()))?;
        Ok(self.annotator.annotate(&record.dosage))
    }
}

/// Score a record by its best matching name. `query` must be lowercase.
fn score_record(record: &DrugRecord, query: &str) -> f64 {
    record
        .names()
        .map(|name| score_name(&name.to_lowercase(), query))
        .fold(0.0, f64::max)
}

fn score_name(name: &str, query: &str) -> f64 {
    if name == query || name.contains(query) {
        return 1.0;
    }
    fuzzy_match(name, query)
}

/// Fuzzy string match score (0.0 - 1.0).
fn fuzzy_match(a: &str, b: &str) -> f64 {
    let jw = jaro_winkler(a, b);
    let lev = normalized_levenshtein(a, b);

    jw * 0.6 + lev * 0.4
}
