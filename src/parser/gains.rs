//! Parser for per-pattern gain documents (`*.pap` entries).

use super::xml::{parse_document, XmlNodeExt};
use crate::config::angle;
use crate::error::{ConvertError, Result};
use crate::model::{Orientation, PatternRecord};
use roxmltree::Node;
use tracing::debug;

/// Angular sampling of one gain block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleRange {
    pub start: i64,
    pub end: i64,
    pub step: i64,
}

impl AngleRange {
    /// Angles covered by this range, end inclusive.
    pub fn angles(&self) -> impl Iterator<Item = i64> {
        angle::sweep(self.start, self.end, self.step)
    }

    /// Number of angles covered, or `None` when the range overflows.
    pub fn checked_len(&self) -> Option<usize> {
        angle::sweep_len(self.start, self.end, self.step)
    }

    /// Number of angles covered; an overflowing range covers none.
    pub fn len(&self) -> usize {
        self.checked_len().unwrap_or(0)
    }

    /// Check if the range covers no angle.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Parse a pattern document and fill both gain tables of `record`.
pub fn parse_pattern(text: &str, record: &mut PatternRecord) -> Result<()> {
    let doc = parse_document(text, &record.file)?;
    let root = doc.root_element();

    for orientation in Orientation::ALL {
        let block = root
            .descendants_by_tag(orientation.xml_tag())
            .into_iter()
            .next()
            .ok_or_else(|| ConvertError::missing(root.tag_name().name(), orientation.xml_tag()))?;
        let count = parse_block(&block, orientation, record)?;
        debug!("Pattern {} has {} {} gains", record.file, count, orientation);
    }

    Ok(())
}

/// Scatter one `HorizontalPattern`/`VerticalPattern` block into its table.
///
/// Returns the number of samples stored.
pub fn parse_block(
    block: &Node,
    orientation: Orientation,
    record: &mut PatternRecord,
) -> Result<usize> {
    let gains = parse_gain_list(block.required_text("Gains")?)?;
    let range = AngleRange {
        start: block.required_value("StartAngle", "integer")?,
        end: block.required_value("EndAngle", "integer")?,
        step: block.required_value("Step", "integer")?,
    };

    if range.step == 0 {
        return Err(ConvertError::InvalidStep {
            orientation,
            step: range.step,
        });
    }

    let expected = range.checked_len().ok_or_else(|| ConvertError::InvalidValue {
        field: "EndAngle".to_string(),
        expected: "angle that stays in range after one step".to_string(),
        value: range.end.to_string(),
    })?;
    if expected != gains.len() {
        return Err(ConvertError::GainCountMismatch {
            orientation,
            expected,
            actual: gains.len(),
        });
    }

    for (angle, gain) in range.angles().zip(&gains) {
        record.set_gain(orientation, angle, *gain);
    }

    Ok(gains.len())
}

/// Split a semicolon-delimited gain list. A trailing separator is ignored.
pub fn parse_gain_list(text: &str) -> Result<Vec<f64>> {
    let text = text.trim();
    let text = text.strip_suffix(';').unwrap_or(text);
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    text.split(';')
        .map(|token| {
            let token = token.trim();
            token.parse::<f64>().map_err(|_| ConvertError::InvalidValue {
                field: "Gains".to_string(),
                expected: "number".to_string(),
                value: token.to_string(),
            })
        })
        .collect()
}
