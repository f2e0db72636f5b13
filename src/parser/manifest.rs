//! Parser for the `antenna.paf` manifest document.

use super::xml::{parse_document, XmlNodeExt};
use crate::config::{number, DEFAULT_MANUFACTURER, DEFAULT_VERSION, MANIFEST_ENTRY, VERSION};
use crate::error::{ConvertError, Result};
use crate::model::{Manifest, PatternRecord};
use roxmltree::Node;
use tracing::{debug, info};

/// Parse a manifest document into antenna identity and empty pattern records.
///
/// Gain tables stay zeroed until the pattern entries are read.
pub fn parse_manifest(text: &str) -> Result<Manifest> {
    let doc = parse_document(text, MANIFEST_ENTRY)?;
    let root = doc.root_element();

    let name = root.child_text("Name").unwrap_or("");
    let manufacturer = root.child_text("Manufacturer").unwrap_or(DEFAULT_MANUFACTURER);
    let version = root.child_text("Version").unwrap_or(DEFAULT_VERSION);
    info!("PAF have antenna {} {}", manufacturer, name);

    let mut manifest = Manifest::new(name, manufacturer, version);
    for node in root.descendants_by_tag("Pattern") {
        let record = parse_pattern_entry(&node, &manifest)?;
        debug!("Pattern {} -> {}", record.name, record.file);
        manifest.insert(record);
    }

    Ok(manifest)
}

/// Build one record from a `<Pattern>` element.
fn parse_pattern_entry(node: &Node, manifest: &Manifest) -> Result<PatternRecord> {
    let mut record = PatternRecord::new(node.required_text("AntennaPatternsEntryName")?);

    let pattern_name = node.required_text("Name")?;
    record.name = format!(
        "{} {}",
        manifest.manufacturer,
        strip_antenna_prefix(pattern_name, &manifest.name)
    );
    record.frequency = parse_truncated(node, "MeasurementFrequencyMHz")?;
    record.max_gain_db = number::round_to(node.required_value("BoresightGain", "number")?, 3);
    record.max_gain_unit = node.required_text("BoresightGainUnit")?.to_string();
    record.tilt = parse_truncated(node, "ElectricalTiltDegrees")?;
    record.beam_width =
        number::round_to(node.required_value("HorizontalBeamwidthDegrees", "number")?, 2);
    record.beam_height =
        number::round_to(node.required_value("VerticalBeamwidthDegrees", "number")?, 2);
    record.polarization = normalize_polarization(node.required_text("Polarization")?);
    record.front_to_back = node.required_text("FrontToBackRatioDB")?.to_string();
    record.comment = build_comment(node.child_text("Comment"), &manifest.version);

    Ok(record)
}

/// Read a decimal field and truncate it toward zero.
fn parse_truncated(node: &Node, tag: &str) -> Result<i32> {
    let value: f64 = node.required_value(tag, "number")?;
    let truncated = value.trunc();
    if !(i32::MIN as f64..=i32::MAX as f64).contains(&truncated) {
        return Err(ConvertError::InvalidValue {
            field: tag.to_string(),
            expected: "number within 32-bit integer range".to_string(),
            value: value.to_string(),
        });
    }
    Ok(truncated as i32)
}

/// Remove the `"<antenna>\"` prefix that pattern names carry.
pub fn strip_antenna_prefix(pattern_name: &str, antenna: &str) -> String {
    if antenna.is_empty() {
        return pattern_name.to_string();
    }
    pattern_name.replace(&format!("{}\\", antenna), "")
}

/// Replace the spelled-out signs used in polarization names.
pub fn normalize_polarization(polarization: &str) -> String {
    polarization.replace("Plus", "+").replace("Minus", "-")
}

/// Source comment (if any) followed by the provenance tag.
pub fn build_comment(source: Option<&str>, version: &str) -> String {
    let mut comment = match source {
        Some(text) => format!("{}; ", text),
        None => String::new(),
    };
    comment.push_str(&format!("V{} Generated by {}", version, VERSION));
    comment
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern_xml(extra: &str) -> String {
        format!(
            r#"<Pattern>
    <Name>Sector1\Sector1_1900_02T</Name>
    <MeasurementFrequencyMHz>1900.7</MeasurementFrequencyMHz>
    <BoresightGain>17.12345</BoresightGain>
    <BoresightGainUnit>dBi</BoresightGainUnit>
    <ElectricalTiltDegrees>2</ElectricalTiltDegrees>
    <HorizontalBeamwidthDegrees>65.456</HorizontalBeamwidthDegrees>
    <VerticalBeamwidthDegrees>7</VerticalBeamwidthDegrees>
    <Polarization>Plus45</Polarization>
    <FrontToBackRatioDB>25.3</FrontToBackRatioDB>
    {}
    <AntennaPatternsEntryName>p1.pap</AntennaPatternsEntryName>
  </Pattern>"#,
            extra
        )
    }

    fn manifest_xml(header: &str, patterns: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="utf-8"?>
<Antenna>
  {}
  <Patterns>
  {}
  </Patterns>
</Antenna>"#,
            header, patterns
        )
    }

    // ==================== header tests ====================

    #[test]
    fn test_parse_manifest_header() {
        let xml = manifest_xml(
            "<Name>Sector1</Name><Manufacturer>Acme</Manufacturer><Version>2.1</Version>",
            "",
        );
        let manifest = parse_manifest(&xml).unwrap();
        assert_eq!(manifest.name, "Sector1");
        assert_eq!(manifest.manufacturer, "Acme");
        assert_eq!(manifest.version, "2.1");
        assert!(manifest.is_empty());
    }

    #[test]
    fn test_parse_manifest_defaults() {
        let xml = manifest_xml("<Name>Sector1</Name>", &pattern_xml(""));
        let manifest = parse_manifest(&xml).unwrap();
        assert_eq!(manifest.manufacturer, "NONAME");
        assert_eq!(manifest.version, "0.0");
        assert!(manifest.patterns[0].name.starts_with("NONAME "));
        assert!(manifest.patterns[0].comment.starts_with("V0.0 Generated by "));
    }

    #[test]
    fn test_parse_manifest_empty_header_elements_use_defaults() {
        let xml = manifest_xml(
            "<Name>Sector1</Name><Manufacturer></Manufacturer><Version/>",
            "",
        );
        let manifest = parse_manifest(&xml).unwrap();
        assert_eq!(manifest.manufacturer, "NONAME");
        assert_eq!(manifest.version, "0.0");
    }

    #[test]
    fn test_parse_manifest_without_name() {
        let xml = manifest_xml("<Manufacturer>Acme</Manufacturer>", &pattern_xml(""));
        let manifest = parse_manifest(&xml).unwrap();
        assert_eq!(manifest.name, "");
        assert_eq!(manifest.patterns[0].name, "Acme Sector1\\Sector1_1900_02T");
    }

    // ==================== pattern tests ====================

    #[test]
    fn test_parse_pattern_fields() {
        let xml = manifest_xml(
            "<Name>Sector1</Name><Manufacturer>Acme</Manufacturer><Version>1.0</Version>",
            &pattern_xml("<Comment>Measured in lab</Comment>"),
        );
        let manifest = parse_manifest(&xml).unwrap();
        assert_eq!(manifest.len(), 1);

        let p = &manifest.patterns[0];
        assert_eq!(p.file, "p1.pap");
        assert_eq!(p.name, "Acme Sector1_1900_02T");
        assert_eq!(p.frequency, 1900);
        assert_eq!(p.max_gain_db, 17.123);
        assert_eq!(p.max_gain_unit, "dBi");
        assert_eq!(p.tilt, 2);
        assert_eq!(p.beam_width, 65.46);
        assert_eq!(p.beam_height, 7.0);
        assert_eq!(p.polarization, "+45");
        assert_eq!(p.front_to_back, "25.3");
        assert_eq!(
            p.comment,
            format!("Measured in lab; V1.0 Generated by {}", VERSION)
        );
    }

    #[test]
    fn test_parse_pattern_empty_comment_is_omitted() {
        let xml = manifest_xml(
            "<Name>Sector1</Name><Version>1.0</Version>",
            &pattern_xml("<Comment></Comment>"),
        );
        let manifest = parse_manifest(&xml).unwrap();
        assert_eq!(
            manifest.patterns[0].comment,
            format!("V1.0 Generated by {}", VERSION)
        );
    }

    #[test]
    fn test_parse_pattern_missing_field() {
        let broken = pattern_xml("").replace("<BoresightGain>17.12345</BoresightGain>", "");
        let xml = manifest_xml("<Name>Sector1</Name>", &broken);
        let err = parse_manifest(&xml).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingField { ref section, ref field }
                if section == "Pattern" && field == "BoresightGain"
        ));
    }

    #[test]
    fn test_parse_pattern_invalid_number() {
        let broken = pattern_xml("").replace(">1900.7<", ">high<");
        let xml = manifest_xml("<Name>Sector1</Name>", &broken);
        let err = parse_manifest(&xml).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InvalidValue { ref field, .. } if field == "MeasurementFrequencyMHz"
        ));
    }

    #[test]
    fn test_out_of_range_frequency_is_rejected() {
        let broken = pattern_xml("").replace(">1900.7<", ">1e12<");
        let xml = manifest_xml("<Name>Sector1</Name>", &broken);
        let err = parse_manifest(&xml).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InvalidValue { ref field, ref value, .. }
                if field == "MeasurementFrequencyMHz" && value == "1000000000000"
        ));
    }

    #[test]
    fn test_non_finite_tilt_is_rejected() {
        let broken = pattern_xml("").replace(
            "<ElectricalTiltDegrees>2</ElectricalTiltDegrees>",
            "<ElectricalTiltDegrees>NaN</ElectricalTiltDegrees>",
        );
        let xml = manifest_xml("<Name>Sector1</Name>", &broken);
        let err = parse_manifest(&xml).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::InvalidValue { ref field, .. } if field == "ElectricalTiltDegrees"
        ));
    }

    #[test]
    fn test_patterns_found_anywhere_in_document() {
        let second = pattern_xml("").replace("p1.pap", "p2.pap");
        let xml = format!(
            "<Antenna><Name>Sector1</Name>{}<Deep><Deeper>{}</Deeper></Deep></Antenna>",
            pattern_xml(""),
            second
        );
        let manifest = parse_manifest(&xml).unwrap();
        let files: Vec<_> = manifest.patterns.iter().map(|p| p.file.as_str()).collect();
        assert_eq!(files, vec!["p1.pap", "p2.pap"]);
    }

    #[test]
    fn test_negative_tilt_truncates_toward_zero() {
        let xml = manifest_xml(
            "<Name>Sector1</Name>",
            &pattern_xml("").replace(
                "<ElectricalTiltDegrees>2</ElectricalTiltDegrees>",
                "<ElectricalTiltDegrees>-2.9</ElectricalTiltDegrees>",
            ),
        );
        let manifest = parse_manifest(&xml).unwrap();
        assert_eq!(manifest.patterns[0].tilt, -2);
    }

    // ==================== helper tests ====================

    #[test]
    fn test_normalize_polarization() {
        assert_eq!(normalize_polarization("Plus45"), "+45");
        assert_eq!(normalize_polarization("Minus45"), "-45");
        assert_eq!(normalize_polarization("Vertical"), "Vertical");
    }

    #[test]
    fn test_strip_antenna_prefix() {
        assert_eq!(strip_antenna_prefix("Sector1\\P1", "Sector1"), "P1");
        assert_eq!(strip_antenna_prefix("Other\\P1", "Sector1"), "Other\\P1");
        assert_eq!(strip_antenna_prefix("A\\P1", ""), "A\\P1");
    }

    #[test]
    fn test_build_comment() {
        assert_eq!(
            build_comment(None, "3.0"),
            format!("V3.0 Generated by {}", VERSION)
        );
        assert_eq!(
            build_comment(Some("note"), "3.0"),
            format!("note; V3.0 Generated by {}", VERSION)
        );
    }
}
