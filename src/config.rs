//! Configuration constants and settings for the converter.

use std::path::{Path, PathBuf};

/// Tool identity, also embedded in every generated MSI comment.
pub const VERSION: &str = concat!("PAFX2MSI convertor v", env!("CARGO_PKG_VERSION"));

/// Copyright line printed on startup.
pub const COPYRIGHT: &str = "(c) 2024 Sergey Arkhipov";

/// One-line description printed with the usage text.
pub const COMMENT: &str = "Converts antenna patterns from PAFX format to MSI format";

/// Usage line.
pub const USAGE: &str = "Usage: pafx2msi [-h|--help] [-o DIR] [--debug] [-v] [data/*.pafx]";

/// Name of the manifest entry inside a PAFX archive.
pub const MANIFEST_ENTRY: &str = "antenna.paf";

/// Extension of per-pattern entries inside a PAFX archive.
pub const PATTERN_EXTENSION: &str = ".pap";

/// Extension of generated MSI files.
pub const MSI_EXTENSION: &str = ".msi";

/// Manufacturer used when the manifest has none.
pub const DEFAULT_MANUFACTURER: &str = "NONAME";

/// Version used when the manifest has none.
pub const DEFAULT_VERSION: &str = "0.0";

/// Boresight gain unit used until the manifest says otherwise.
pub const DEFAULT_GAIN_UNIT: &str = "dBi";

/// Number of one-degree slots in a gain table.
pub const TABLE_SIZE: usize = 360;

/// Escaped backslash as it appears in pattern entry names.
pub const ENCODED_BACKSLASH: &str = "%092";

/// Options for a single archive conversion.
#[derive(Debug, Clone)]
pub struct ConvertOptions {
    /// Write MSI files after reading the archive.
    pub save_msi: bool,
    /// Parent directory for the per-antenna output folder.
    /// `None` means the directory holding the archive.
    pub output_root: Option<PathBuf>,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            save_msi: true,
            output_root: None,
        }
    }
}

impl ConvertOptions {
    /// Options that only read archives.
    pub fn read_only() -> Self {
        Self {
            save_msi: false,
            ..Default::default()
        }
    }

    /// Resolve the output folder for an antenna read from `archive`.
    pub fn output_dir(&self, archive: &Path, antenna: &str) -> PathBuf {
        let root = match &self.output_root {
            Some(root) => root.clone(),
            None => match archive.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        };
        root.join(antenna)
    }
}

/// Utility functions for angle operations.
pub mod angle {
    use super::TABLE_SIZE;

    /// Map any integer angle onto a gain table slot in `0..360`.
    #[inline]
    pub fn table_index(angle: i64) -> usize {
        angle.rem_euclid(TABLE_SIZE as i64) as usize
    }

    /// Angles visited for a `[start, end]` range with `step`.
    ///
    /// The end is inclusive by extending it one step, so iteration covers the
    /// half-open range `[start, end + step)`. A step that does not divide
    /// `end - start` can therefore overshoot `end`. `step` must be non-zero.
    pub fn sweep(start: i64, end: i64, step: i64) -> impl Iterator<Item = i64> {
        let count = sweep_len(start, end, step).unwrap_or(0) as u64;
        // Every visited angle lies in `[start, end + step)`, so it fits in i64
        // even when the intermediate product does not.
        (0..count).map(move |k| start.wrapping_add((k as i64).wrapping_mul(step)))
    }

    /// Number of angles `sweep` visits, without iterating.
    ///
    /// `None` when `end + step` does not fit in an i64.
    pub fn sweep_len(start: i64, end: i64, step: i64) -> Option<usize> {
        let stop = end.checked_add(step)?;
        let (start, stop, step) = (start as i128, stop as i128, step as i128);
        let count = if step > 0 && stop > start {
            (stop - start - 1) / step + 1
        } else if step < 0 && stop < start {
            (start - stop - 1) / -step + 1
        } else {
            0
        };
        usize::try_from(count).ok()
    }
}

/// Utility functions for number formatting.
pub mod number {
    /// Round to a fixed number of decimal places.
    ///
    /// Exact ties go to the even digit (`65.125` -> `65.12`), the same as the
    /// decimal formatter.
    pub fn round_to(value: f64, decimals: usize) -> f64 {
        format!("{:.*}", decimals, value).parse().unwrap_or(value)
    }

    /// Format a float the way header fields are written: whole values keep
    /// a trailing `.0` (`65.0`, not `65`).
    pub fn format_float(value: f64) -> String {
        if value.is_finite() && value.fract() == 0.0 {
            format!("{:.1}", value)
        } else {
            format!("{}", value)
        }
    }
}
