//! PAFX archive reader.

use super::gains::parse_pattern;
use super::manifest::parse_manifest;
use super::xml::decode_document;
use crate::config::MANIFEST_ENTRY;
use crate::error::{ConvertError, Result};
use crate::model::Manifest;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;
use tracing::info;
use zip::result::ZipError;
use zip::ZipArchive;

/// Read a PAFX archive from a path: manifest first, then every pattern entry
/// it references.
///
/// If the manifest has no antenna name, the archive's file stem is used.
pub fn parse_pafx_file(path: &Path) -> Result<Manifest> {
    if !path.exists() {
        return Err(ConvertError::FileNotFound {
            path: path.to_path_buf(),
        });
    }

    let file = File::open(path)?;
    let mut manifest = read_pafx(file, path)?;

    if manifest.name.is_empty() {
        manifest.name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();
    }

    info!("Loaded {} patterns for {}", manifest.len(), manifest.name);
    Ok(manifest)
}

/// Read a PAFX archive from any seekable reader.
///
/// `source` is only used to label errors.
pub fn read_pafx<R: Read + Seek>(reader: R, source: &Path) -> Result<Manifest> {
    let mut archive = ZipArchive::new(reader)?;

    let manifest_text = read_entry(&mut archive, MANIFEST_ENTRY, source)?;
    let mut manifest =
        parse_manifest(&manifest_text).map_err(|e| e.in_entry(MANIFEST_ENTRY))?;

    for record in manifest.patterns.iter_mut() {
        let text = read_entry(&mut archive, &record.file, source)?;
        parse_pattern(&text, record).map_err(|e| e.in_entry(record.file.as_str()))?;
    }

    Ok(manifest)
}

/// Read one archive entry as text, honouring its declared encoding.
fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
    source: &Path,
) -> Result<String> {
    let mut entry = archive.by_name(name).map_err(|e| match e {
        ZipError::FileNotFound => ConvertError::MissingEntry {
            archive: source.to_path_buf(),
            entry: name.to_string(),
        },
        other => ConvertError::Zip(other),
    })?;

    let mut bytes = Vec::new();
    entry
        .read_to_end(&mut bytes)
        .map_err(|e| ConvertError::from(e).in_entry(name))?;
    decode_document(&bytes, name).map_err(|e| e.in_entry(name))
}
