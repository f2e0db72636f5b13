//! Reader for MSI pattern files.

use crate::config::TABLE_SIZE;
use crate::error::{ConvertError, Result};
use crate::model::{Orientation, PatternRecord};

/// Parse MSI text back into a pattern record.
///
/// Header keys the converter does not write are ignored. `file` is left empty.
pub fn parse_msi(content: &str) -> Result<PatternRecord> {
    let mut record = PatternRecord::default();
    let mut lines = content.lines().enumerate().map(|(i, l)| (i + 1, l));

    while let Some((line_no, line)) = lines.next() {
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() {
            continue;
        }
        let (key, value) = split_key(line);

        match key {
            "NAME" => record.name = value.to_string(),
            "FREQUENCY" => record.frequency = parse_field(value, line_no)?.trunc() as i32,
            "H_WIDTH" => record.beam_width = parse_field(value, line_no)?,
            "V_WIDTH" => record.beam_height = parse_field(value, line_no)?,
            "FRONT_TO_BACK" => record.front_to_back = value.to_string(),
            "GAIN" => {
                let (gain, unit) = split_key(value);
                record.max_gain_db = parse_field(gain, line_no)?;
                if !unit.is_empty() {
                    record.max_gain_unit = unit.to_string();
                }
            }
            "ELECTRICAL_TILT" => record.tilt = parse_field(value, line_no)?.trunc() as i32,
            "POLARIZATION" => record.polarization = value.to_string(),
            "COMMENT" => record.comment = value.to_string(),
            "HORIZONTAL" | "VERTICAL" => {
                let orientation = if key == "HORIZONTAL" {
                    Orientation::Horizontal
                } else {
                    Orientation::Vertical
                };
                let rows = parse_field(value, line_no)? as usize;
                for _ in 0..rows {
                    let (row_no, row) = lines.next().ok_or_else(|| ConvertError::MsiParse {
                        line: line_no,
                        message: format!("{} table ends early", key),
                    })?;
                    let (angle, gain) = parse_row(row.trim_end_matches('\r'), row_no)?;
                    record.set_gain(orientation, angle, gain);
                }
            }
            _ => {}
        }
    }

    Ok(record)
}

/// Split `KEY rest of line` on the first space.
fn split_key(line: &str) -> (&str, &str) {
    match line.split_once(' ') {
        Some((key, value)) => (key, value.trim()),
        None => (line, ""),
    }
}

fn parse_field(value: &str, line: usize) -> Result<f64> {
    value.trim().parse().map_err(|_| ConvertError::MsiParse {
        line,
        message: format!("expected a number, got '{}'", value),
    })
}

/// Parse an `<angle> <gain>` table row.
fn parse_row(row: &str, line: usize) -> Result<(i64, f64)> {
    let mut parts = row.split_whitespace();
    let (Some(angle), Some(gain)) = (parts.next(), parts.next()) else {
        return Err(ConvertError::MsiParse {
            line,
            message: format!("expected '<angle> <gain>', got '{}'", row),
        });
    };

    let angle: f64 = parse_field(angle, line)?;
    let angle = angle.round() as i64;
    if !(0..TABLE_SIZE as i64).contains(&angle) {
        return Err(ConvertError::MsiParse {
            line,
            message: format!("angle {} outside 0..{}", angle, TABLE_SIZE),
        });
    }
    Ok((angle, parse_field(gain, line)?))
}
