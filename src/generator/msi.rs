//! MSI text generation.

use crate::config::number::format_float;
use crate::model::{Orientation, PatternRecord};
use std::fmt::{Display, Write};

/// Line writer for MSI key/value headers and gain tables.
pub struct MsiWriter {
    buffer: String,
}

impl MsiWriter {
    /// Create a new MSI writer.
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    /// Get the generated text.
    pub fn output(&self) -> &str {
        &self.buffer
    }

    /// Take the generated text.
    pub fn take_output(self) -> String {
        self.buffer
    }

    /// Write a `KEY value` header line.
    pub fn write_field(&mut self, key: &str, value: impl Display) {
        writeln!(self.buffer, "{} {}", key, value).unwrap();
    }

    /// Write a table header followed by one `<angle> <gain>` row per slot.
    pub fn write_table(&mut self, keyword: &str, table: &[f64]) {
        writeln!(self.buffer, "{} {}", keyword, table.len()).unwrap();
        for (angle, gain) in table.iter().enumerate() {
            writeln!(self.buffer, "{} {:.2}", angle, gain).unwrap();
        }
    }
}

impl Default for MsiWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Write the header block of a record.
pub fn write_header(writer: &mut MsiWriter, record: &PatternRecord) {
    writer.write_field("NAME", &record.name);
    writer.write_field("FREQUENCY", record.frequency);
    writer.write_field("H_WIDTH", format_float(record.beam_width));
    writer.write_field("V_WIDTH", format_float(record.beam_height));
    writer.write_field("FRONT_TO_BACK", &record.front_to_back);
    writer.write_field(
        "GAIN",
        format!("{} {}", format_float(record.max_gain_db), record.max_gain_unit),
    );
    writer.write_field("ELECTRICAL_TILT", record.tilt);
    writer.write_field("POLARIZATION", &record.polarization);
    writer.write_field("COMMENT", &record.comment);
}

/// Serialize a pattern record as MSI text.
pub fn generate_msi(record: &PatternRecord) -> String {
    let mut writer = MsiWriter::new();
    write_header(&mut writer, record);
    for orientation in Orientation::ALL {
        writer.write_table(orientation.msi_keyword(), record.table(orientation));
    }
    writer.take_output()
}
