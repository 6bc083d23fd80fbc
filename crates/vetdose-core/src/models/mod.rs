//! Domain models for the vetdose system.

mod annotation;
mod calculation;
mod dosage;

pub use annotation::*;
pub use calculation::*;
pub use dosage::*;
