//! PAFX archive and MSI file parsers.

mod gains;
mod manifest;
mod msi;
mod pafx;
pub mod xml;

pub use gains::{parse_block, parse_gain_list, parse_pattern, AngleRange};
pub use manifest::{build_comment, normalize_polarization, parse_manifest, strip_antenna_prefix};
pub use msi::parse_msi;
pub use pafx::{parse_pafx_file, read_pafx};
