//! Batch conversion over a file glob.

use crate::config::ConvertOptions;
use crate::convert_pafx_to_msi;
use crate::error::{ConvertError, Result};
use crate::model::Manifest;
use globset::{GlobBuilder, GlobMatcher};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Outcome of converting one archive.
#[derive(Debug, Clone, Serialize)]
pub struct Conversion {
    /// Archive that was read.
    pub archive: PathBuf,
    /// Parsed manifest with gain tables.
    pub manifest: Manifest,
    /// MSI files written (empty when writing is disabled).
    pub written: Vec<PathBuf>,
}

/// Characters that make a path component a glob.
const GLOB_META: &[char] = &['*', '?', '[', '{'];

/// Expand a glob pattern into the matching files, sorted.
///
/// A pattern without glob characters yields itself if it names a file.
/// `*` never crosses a `/`; use `**` to descend any number of directories.
pub fn expand_glob(pattern: &str) -> Result<Vec<PathBuf>> {
    let (base, depth) = split_literal_prefix(pattern);
    let Some(depth) = depth else {
        let path = PathBuf::from(pattern);
        return Ok(if path.is_file() { vec![path] } else { Vec::new() });
    };

    let matcher = GlobBuilder::new(pattern)
        .literal_separator(true)
        .build()
        .map_err(|source| ConvertError::InvalidGlob {
            pattern: pattern.to_string(),
            source,
        })?
        .compile_matcher();

    let mut matches = Vec::new();
    walk(&base, depth, &matcher, &mut matches);
    matches.sort();
    Ok(matches)
}

/// Split a pattern into the leading directory without glob characters and
/// the number of components below it (`None` for a plain path,
/// `usize::MAX` when `**` is present).
fn split_literal_prefix(pattern: &str) -> (PathBuf, Option<usize>) {
    let components: Vec<&str> = pattern.split('/').collect();
    let Some(first_glob) = components.iter().position(|c| c.contains(GLOB_META)) else {
        return (PathBuf::from(pattern), None);
    };

    let base = components[..first_glob].join("/");
    let base = if base.is_empty() && pattern.starts_with('/') {
        PathBuf::from("/")
    } else {
        PathBuf::from(base)
    };

    let rest = &components[first_glob..];
    let depth = if rest.iter().any(|c| c.contains("**")) {
        usize::MAX
    } else {
        rest.iter().filter(|c| !c.is_empty()).count()
    };
    (base, Some(depth))
}

/// Collect files below `dir` (at most `depth` levels down) that match.
///
/// Symlinked directories are not entered. Unreadable entries are logged and
/// skipped.
fn walk(dir: &Path, depth: usize, matcher: &GlobMatcher, out: &mut Vec<PathBuf>) {
    let root = if dir.as_os_str().is_empty() {
        Path::new(".")
    } else {
        dir
    };

    for entry in WalkDir::new(root).min_depth(1).max_depth(depth) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable path while searching {}: {}", root.display(), e);
                continue;
            }
        };

        if !entry.path().is_file() {
            continue;
        }

        // Keep a relative pattern relative: `*.pafx` must not see `./a.pafx`.
        let candidate = if dir.as_os_str().is_empty() {
            entry.path().strip_prefix(root).unwrap_or(entry.path())
        } else {
            entry.path()
        };
        if matcher.is_match(candidate) {
            debug!("Matched {}", candidate.display());
            out.push(candidate.to_path_buf());
        }
    }
}

/// Convert every archive matching `pattern`, in sorted order.
///
/// Stops at the first archive that fails; the error names that archive.
pub fn run(pattern: &str, options: &ConvertOptions) -> Result<Vec<Conversion>> {
    info!("Searching {}", pattern);
    let paths = expand_glob(pattern)?;
    if paths.is_empty() {
        warn!("No files match {}", pattern);
    }

    let mut conversions = Vec::with_capacity(paths.len());
    for path in paths {
        info!("Reading PAFX {}", path.display());
        let conversion = convert_pafx_to_msi(&path, options).map_err(|e| e.in_archive(&path))?;
        conversions.push(conversion);
    }

    Ok(conversions)
}
