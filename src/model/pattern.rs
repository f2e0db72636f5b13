//! Pattern record: one measured radiation pattern with its two gain tables.

use crate::config::{angle, DEFAULT_GAIN_UNIT, TABLE_SIZE};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Cut plane of a gain table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Both orientations, in MSI output order.
    pub const ALL: [Orientation; 2] = [Orientation::Horizontal, Orientation::Vertical];

    /// Element name of this block inside a pattern entry.
    pub fn xml_tag(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "HorizontalPattern",
            Orientation::Vertical => "VerticalPattern",
        }
    }

    /// Section keyword in MSI files.
    pub fn msi_keyword(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "HORIZONTAL",
            Orientation::Vertical => "VERTICAL",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Horizontal => write!(f, "horizontal"),
            Orientation::Vertical => write!(f, "vertical"),
        }
    }
}

/// A named antenna pattern at one frequency and tilt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternRecord {
    /// Display name, prefixed with the manufacturer.
    pub name: String,
    /// Entry name of the pattern document inside the archive.
    pub file: String,
    /// Polarization with `Plus`/`Minus` replaced by signs.
    pub polarization: String,
    /// Front-to-back ratio in dB, as written in the manifest.
    pub front_to_back: String,
    /// Horizontal half-power beamwidth in degrees.
    pub beam_width: f64,
    /// Vertical half-power beamwidth in degrees.
    pub beam_height: f64,
    /// Electrical tilt in degrees.
    pub tilt: i32,
    /// Measurement frequency in MHz.
    pub frequency: i32,
    /// Boresight gain.
    pub max_gain_db: f64,
    /// Boresight gain unit (dBi or dBd).
    pub max_gain_unit: String,
    pub comment: String,
    /// Horizontal gain table, one slot per degree.
    pub rho_h: Vec<f64>,
    /// Vertical gain table, one slot per degree.
    pub rho_v: Vec<f64>,
}

impl Default for PatternRecord {
    fn default() -> Self {
        Self {
            name: String::new(),
            file: String::new(),
            polarization: String::new(),
            front_to_back: String::new(),
            beam_width: 0.0,
            beam_height: 0.0,
            tilt: 0,
            frequency: 0,
            max_gain_db: 0.0,
            max_gain_unit: DEFAULT_GAIN_UNIT.to_string(),
            comment: String::new(),
            rho_h: vec![0.0; TABLE_SIZE],
            rho_v: vec![0.0; TABLE_SIZE],
        }
    }
}

impl PatternRecord {
    /// Create an empty record for a pattern entry.
    pub fn new(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            ..Default::default()
        }
    }

    /// Gain table for an orientation.
    pub fn table(&self, orientation: Orientation) -> &[f64] {
        match orientation {
            Orientation::Horizontal => &self.rho_h,
            Orientation::Vertical => &self.rho_v,
        }
    }

    /// Mutable gain table for an orientation.
    pub fn table_mut(&mut self, orientation: Orientation) -> &mut [f64] {
        match orientation {
            Orientation::Horizontal => &mut self.rho_h,
            Orientation::Vertical => &mut self.rho_v,
        }
    }

    /// Store the magnitude of a gain sample at its wrapped angle.
    pub fn set_gain(&mut self, orientation: Orientation, angle: i64, gain: f64) {
        self.table_mut(orientation)[angle::table_index(angle)] = gain.abs();
    }

    /// Number of non-zero slots in a table.
    pub fn populated(&self, orientation: Orientation) -> usize {
        self.table(orientation).iter().filter(|v| **v != 0.0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_defaults() {
        let record = PatternRecord::new("p1.pap");
        assert_eq!(record.file, "p1.pap");
        assert_eq!(record.max_gain_unit, "dBi");
        assert_eq!(record.rho_h.len(), TABLE_SIZE);
        assert_eq!(record.rho_v.len(), TABLE_SIZE);
        assert!(record.rho_h.iter().all(|v| *v == 0.0));
    }

    #[test]
    fn test_set_gain_wraps_and_takes_magnitude() {
        let mut record = PatternRecord::new("p1.pap");
        record.set_gain(Orientation::Horizontal, -10, -2.5);
        record.set_gain(Orientation::Vertical, 370, 1.25);
        assert_eq!(record.rho_h[350], 2.5);
        assert_eq!(record.rho_v[10], 1.25);
        assert_eq!(record.populated(Orientation::Horizontal), 1);
        assert_eq!(record.populated(Orientation::Vertical), 1);
    }

    #[test]
    fn test_orientation_names() {
        assert_eq!(Orientation::Horizontal.xml_tag(), "HorizontalPattern");
        assert_eq!(Orientation::Vertical.msi_keyword(), "VERTICAL");
        assert_eq!(Orientation::Vertical.to_string(), "vertical");
    }
}
