//! Display formatting and clipboard export.

mod summary;

pub use summary::*;
