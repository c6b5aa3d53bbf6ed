//! Centralized handling of archive-internal entry paths.
//!
//! ZIP entries arrive as forward-slash paths (`forms/notify.xml`), but
//! archives produced on Windows occasionally use backslashes. Every stage
//! that needs a base name, a stem, or an extension test goes through this
//! module so the two separator styles are handled in exactly one place.
//!
//! ## Output Naming
//!
//! Rendered documents get a deterministic name derived from the source
//! document: `forms/notify.xml` → `notify_ge.html`. The `_ge` suffix marks
//! the entry as generated so it can never shadow an original file with the
//! same stem.

/// Suffix appended to a document stem to form its rendered output name.
pub const OUTPUT_SUFFIX: &str = "_ge";

/// Base name of an archive entry path: the part after the last separator.
///
/// - `"forms/notify.xml"` → `"notify.xml"`
/// - `"forms\\notify.xml"` → `"notify.xml"`
/// - `"notify.xml"` → `"notify.xml"`
/// - `"forms/"` → `""`
pub fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

/// Base name without its final extension.
///
/// - `"forms/notify.xml"` → `"notify"`
/// - `"archive.tar.gz"` → `"archive.tar"`
/// - `"README"` → `"README"`
pub fn stem(path: &str) -> &str {
    let base = base_name(path);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(dot) => &base[..dot],
    }
}

/// Case-insensitive extension test. `ext` is given without the dot.
///
/// - `has_extension("A.XML", "xml")` → true
/// - `has_extension("xml", "xml")` → false (no dot, not an extension)
pub fn has_extension(path: &str, ext: &str) -> bool {
    let Some(dot) = path.len().checked_sub(ext.len() + 1) else {
        return false;
    };
    path.is_char_boundary(dot)
        && path[dot..].starts_with('.')
        && path[dot + 1..].eq_ignore_ascii_case(ext)
}

/// Output file name for a rendered document: `<stem>_ge.html`.
pub fn output_name(document_path: &str) -> String {
    format!("{}{}.html", stem(document_path), OUTPUT_SUFFIX)
}
