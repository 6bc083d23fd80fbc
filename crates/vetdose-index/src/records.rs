//! Drug records as shipped in the content JSON.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Index errors.
#[derive(Error, Debug)]
pub enum IndexError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid drug file: {0}")]
    InvalidFormat(String),

    #[error("Drug not found: {0}")]
    NotFound(String),
}

pub type IndexResult<T> = Result<T, IndexError>;

/// One drug entry with its free-text dosage field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugRecord {
    pub name: String,
    #[serde(default)]
    pub brand_names: Vec<String>,
    #[serde(default)]
    pub drug_class: Option<String>,
    /// Dosage block exactly as written, bullets and all.
    #[serde(default)]
    pub dosage: String,
}

impl DrugRecord {
    pub fn new(name: impl Into<String>, dosage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            brand_names: Vec::new(),
            drug_class: None,
            dosage: dosage.into(),
        }
    }

    /// Check the generic name and brand names, ignoring case.
    pub fn is_named(&self, query: &str) -> bool {
        let query = query.trim();
        self.name.eq_ignore_ascii_case(query)
            || self.brand_names.iter().any(|b| b.eq_ignore_ascii_case(query))
    }

    /// Generic name followed by brand names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.brand_names.iter().map(String::as_str))
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum DrugFile {
    List(Vec<DrugRecord>),
    Wrapped { drugs: Vec<DrugRecord> },
}

/// Parse a drug file: either a bare array or `{"drugs": [...]}`.
pub fn parse_drug_records(json: &str) -> IndexResult<Vec<DrugRecord>> {
    let trimmed = json.trim_start();
    if !trimmed.starts_with(['[', '{']) {
        return Err(IndexError::InvalidFormat(
            "Expected a JSON array or object".into(),
        ));
    }

    let records = match serde_json::from_str::<DrugFile>(trimmed)? {
        DrugFile::List(records) | DrugFile::Wrapped { drugs: records } => records,
    };

    if let Some(pos) = records.iter().position(|r| r.name.trim().is_empty()) {
        return Err(IndexError::InvalidFormat(format!(
            "Record {} has an empty name",
            pos
        )));
    }

    Ok(records)
}
