//! In-memory ZIP reading and writing.
//!
//! The converter never touches the filesystem: input archives arrive as byte
//! buffers, result archives leave as byte buffers. This module owns both
//! directions:
//!
//! - [`extract`] parses a ZIP byte stream into an [`ArchiveBundle`] — an
//!   ordered list of named entries with their full content.
//! - [`build`] packs original entries plus rendered outputs into a new ZIP,
//!   everything nested under a directory prefix.
//! - [`merge`] combines several already-built ZIPs into one, preserving
//!   entry order and full paths.
//!
//! ## Entry Invariants
//!
//! Directory markers (entries with an empty base name) are dropped during
//! extraction. Entry paths within a bundle are unique; when an archive
//! contains the same path twice the later content wins, matching how
//! desktop ZIP tools resolve the ambiguity. Writing is stricter: a path
//! collision in [`build`] or [`merge`] is an error ([`ArchiveError::DuplicateEntry`])
//! rather than a silently shadowed entry.

use crate::naming;
use std::collections::HashSet;
use std::io::{Cursor, Read, Write};
use thiserror::Error;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

#[derive(Error, Debug)]
pub enum ArchiveError {
    #[error("unreadable ZIP data: {0}")]
    Malformed(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("duplicate entry path: {0}")]
    DuplicateEntry(String),
}

/// One named file inside an archive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    /// Archive-internal path, may contain directory segments.
    pub path: String,
    pub bytes: Vec<u8>,
}

/// Ordered contents of one extracted archive.
///
/// Order follows the archive's central directory, which is what gives the
/// template fallback rule ("first candidate wins") a deterministic answer.
#[derive(Debug, Default)]
pub struct ArchiveBundle {
    pub entries: Vec<Entry>,
}

impl ArchiveBundle {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Parse a ZIP byte stream into a bundle of named entries.
///
/// Every non-directory entry is read in full; nothing is filtered by
/// content. Classification into documents and templates happens downstream
/// (see [`crate::bundle::partition`]).
pub fn extract(raw: &[u8]) -> Result<ArchiveBundle, ArchiveError> {
    let mut zip = ZipArchive::new(Cursor::new(raw))?;
    let mut bundle = ArchiveBundle::default();

    for index in 0..zip.len() {
        let mut file = zip.by_index(index)?;
        let path = file.name().to_string();
        if file.is_dir() || naming::base_name(&path).is_empty() {
            continue;
        }

        let mut bytes = Vec::with_capacity(file.size() as usize);
        file.read_to_end(&mut bytes)?;

        // Same path twice: later entry replaces the earlier one, in place.
        if let Some(existing) = bundle.entries.iter_mut().find(|e| e.path == path) {
            existing.bytes = bytes;
        } else {
            bundle.entries.push(Entry { path, bytes });
        }
    }

    Ok(bundle)
}

/// Build a result ZIP: originals plus rendered outputs under `prefix/`.
///
/// Originals keep their archive-relative paths; rendered entries land
/// directly under the prefix. Entry order is originals first, then rendered,
/// both in the order given.
pub fn build(
    originals: &ArchiveBundle,
    rendered: &[Entry],
    prefix: &str,
) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut seen: HashSet<String> = HashSet::new();

    for entry in originals.entries.iter().chain(rendered) {
        let path = format!("{}/{}", prefix, entry.path);
        if !seen.insert(path.clone()) {
            return Err(ArchiveError::DuplicateEntry(path));
        }
        writer.start_file(path, SimpleFileOptions::default())?;
        writer.write_all(&entry.bytes)?;
    }

    Ok(writer.finish()?.into_inner())
}

/// Merge previously built result ZIPs into one combined ZIP.
///
/// Entries are copied with their full paths preserved, in source order. A
/// path appearing in more than one source is a [`ArchiveError::DuplicateEntry`]
/// failure — result archives are already namespaced by their per-archive
/// prefix, so a collision means two inputs shared a file stem and silently
/// keeping one of them would lose data.
pub fn merge(archives: &[Vec<u8>]) -> Result<Vec<u8>, ArchiveError> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let mut seen: HashSet<String> = HashSet::new();

    for raw in archives {
        let bundle = extract(raw)?;
        for entry in bundle.entries {
            if !seen.insert(entry.path.clone()) {
                return Err(ArchiveError::DuplicateEntry(entry.path));
            }
            writer.start_file(entry.path, SimpleFileOptions::default())?;
            writer.write_all(&entry.bytes)?;
        }
    }

    Ok(writer.finish()?.into_inner())
}
