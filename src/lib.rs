//! pafx2msi - Convert PAFX antenna pattern archives to MSI files.
//!
//! A PAFX archive is a zip container holding an `antenna.paf` manifest and one
//! XML gain document per measured pattern. Each pattern becomes one MSI text
//! file with a key/value header and two 360-row gain tables.
//!
//! # Example
//!
//! ```no_run
//! use pafx2msi_rs::{convert_pafx_to_msi, ConvertOptions};
//! use std::path::Path;
//!
//! let conversion = convert_pafx_to_msi(Path::new("data/sector.pafx"), &ConvertOptions::default()).unwrap();
//! for path in &conversion.written {
//!     println!("{}", path.display());
//! }
//! ```

pub mod batch;
pub mod config;
pub mod error;
pub mod generator;
pub mod model;
pub mod parser;

// Re-exports for convenience
pub use batch::{expand_glob, Conversion};
pub use config::ConvertOptions;
pub use error::{ConvertError, Result};
pub use generator::{generate_msi, write_msi};
pub use model::{Manifest, Orientation, PatternRecord};
pub use parser::{parse_msi, parse_pafx_file};

/// Convert one PAFX archive.
///
/// Reads the manifest and every pattern it lists, then (if
/// `options.save_msi`) writes one MSI file per pattern into
/// `<output root>/<antenna name>/`.
pub fn convert_pafx_to_msi(path: &std::path::Path, options: &ConvertOptions) -> Result<Conversion> {
    let manifest = parse_pafx_file(path)?;

    let written = if options.save_msi {
        let folder = options.output_dir(path, &manifest.name);
        write_msi(&folder, &manifest.patterns)?
    } else {
        Vec::new()
    };

    Ok(Conversion {
        archive: path.to_path_buf(),
        manifest,
        written,
    })
}
