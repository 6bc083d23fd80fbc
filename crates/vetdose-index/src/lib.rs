//! Drug index for the dosage annotator.
//!
//! Loads drug records from JSON and looks them up by name, brand name, or a
//! fuzzy query, handing each record's dosage field to the core annotator.

pub mod records;
pub mod search;

pub use records::*;
pub use search::*;
