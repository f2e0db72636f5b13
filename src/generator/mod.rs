//! MSI file generator module.

mod filename;
mod msi;

pub use filename::{derive_stem, frequency_suffix, msi_file_name, tilt_suffix};
pub use msi::{generate_msi, write_header, MsiWriter};

use crate::error::Result;
use crate::model::PatternRecord;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Write one MSI file per record into `folder`, creating it if needed.
///
/// The folder's last component is taken as the antenna name for file naming.
/// Returns the written paths in record order.
pub fn write_msi(folder: &Path, patterns: &[PatternRecord]) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(folder)?;

    let antenna = folder
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();

    let mut written = Vec::with_capacity(patterns.len());
    for record in patterns {
        let path = folder.join(msi_file_name(record, antenna));
        info!("Writing MSI {}", path.display());
        fs::write(&path, generate_msi(record))?;
        written.push(path);
    }

    Ok(written)
}
