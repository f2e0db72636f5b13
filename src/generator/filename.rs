//! Output file naming for MSI patterns.

use crate::config::{ENCODED_BACKSLASH, MSI_EXTENSION, PATTERN_EXTENSION};
use crate::model::PatternRecord;

/// Tilt suffix, e.g. `_02` for 2 degrees (the `T` is appended separately).
pub fn tilt_suffix(tilt: i32) -> String {
    format!("_{:02}", tilt)
}

/// Frequency suffix, e.g. `_1900`.
pub fn frequency_suffix(frequency: i32) -> String {
    format!("_{:04}", frequency)
}

/// Derive the MSI file stem from a pattern entry name.
///
/// Drops the `.pap` extension and the `<antenna>%092` prefix, then appends
/// `_NNT` and `_NNNN` unless the name already carries them. A name that
/// ends with the bare `_NN` only gains the `T`.
pub fn derive_stem(file: &str, antenna: &str, tilt: i32, frequency: i32) -> String {
    let mut stem = file
        .replace(PATTERN_EXTENSION, "")
        .replace(&format!("{}{}", antenna, ENCODED_BACKSLASH), "");

    let tilt_suffix = tilt_suffix(tilt);
    if !stem.contains(&format!("{}T", tilt_suffix)) {
        if !stem.ends_with(&tilt_suffix) {
            stem.push_str(&tilt_suffix);
        }
        stem.push('T');
    }

    let frequency_suffix = frequency_suffix(frequency);
    if !stem.contains(&frequency_suffix) {
        stem.push_str(&frequency_suffix);
    }

    stem
}

/// MSI file name for a record of `antenna`.
pub fn msi_file_name(record: &PatternRecord, antenna: &str) -> String {
    format!(
        "{}{}",
        derive_stem(&record.file, antenna, record.tilt, record.frequency),
        MSI_EXTENSION
    )
}
