//! Data model types for PAFX to MSI conversion.

mod manifest;
mod pattern;

pub use manifest::Manifest;
pub use pattern::{Orientation, PatternRecord};
