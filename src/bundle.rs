//! Classification of extracted entries into documents and templates.
//!
//! An e-Gov procedure archive mixes three kinds of entries: structured
//! documents (`.xml`), transformation templates (`.xsl`), and everything
//! else (PDFs, attachments, readme files). Classification is purely by
//! path suffix, case-insensitive — content is never inspected here.
//!
//! Both sets preserve the bundle's entry order. Order matters: the
//! resolver's fallback rule picks the *first* template candidate, so the
//! partition must not reorder what [`crate::archive::extract`] produced.

use crate::archive::ArchiveBundle;
use crate::naming;
use std::borrow::Cow;

/// Suffix identifying a structured document entry.
pub const DOCUMENT_EXT: &str = "xml";
/// Suffix identifying a transformation template entry.
pub const TEMPLATE_EXT: &str = "xsl";

/// A structured-document entry awaiting transformation.
#[derive(Debug, Clone, Copy)]
pub struct DocumentEntry<'a> {
    pub path: &'a str,
    pub bytes: &'a [u8],
}

impl DocumentEntry<'_> {
    /// Document content as text, for reference scanning.
    ///
    /// Lossy on purpose: a stylesheet processing instruction sits in the
    /// ASCII-compatible prolog, so scanning must work even when the body
    /// holds a legacy encoding that is not valid UTF-8.
    pub fn text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self.bytes)
    }
}

/// A template entry available for resolution.
#[derive(Debug, Clone, Copy)]
pub struct TemplateEntry<'a> {
    pub path: &'a str,
    pub bytes: &'a [u8],
}

/// Documents and templates found in one bundle, in bundle order.
#[derive(Debug, Default)]
pub struct Partition<'a> {
    pub documents: Vec<DocumentEntry<'a>>,
    pub templates: Vec<TemplateEntry<'a>>,
}

/// Split a bundle's entries by suffix. Unclassified entries are ignored
/// here but still travel into the result archive as originals.
pub fn partition(bundle: &ArchiveBundle) -> Partition<'_> {
    let mut split = Partition::default();
    for entry in &bundle.entries {
        if naming::has_extension(&entry.path, DOCUMENT_EXT) {
            split.documents.push(DocumentEntry {
                path: &entry.path,
                bytes: &entry.bytes,
            });
        } else if naming::has_extension(&entry.path, TEMPLATE_EXT) {
            split.templates.push(TemplateEntry {
                path: &entry.path,
                bytes: &entry.bytes,
            });
        }
    }
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Entry;

    fn bundle_of(paths: &[&str]) -> ArchiveBundle {
        ArchiveBundle {
            entries: paths
                .iter()
                .map(|p| Entry {
                    path: p.to_string(),
                    bytes: Vec::new(),
                })
                .collect(),
        }
    }

    #[test]
    fn splits_by_suffix_case_insensitive() {
        let bundle = bundle_of(&["a.xml", "b.XML", "style.xsl", "STYLE2.XSL"]);
        let split = partition(&bundle);

        assert_eq!(split.documents.len(), 2);
        assert_eq!(split.templates.len(), 2);
    }

    #[test]
    fn ignores_other_entries() {
        let bundle = bundle_of(&["readme.txt", "manual.pdf", "a.xml"]);
        let split = partition(&bundle);

        assert_eq!(split.documents.len(), 1);
        assert!(split.templates.is_empty());
    }

    #[test]
    fn preserves_bundle_order() {
        let bundle = bundle_of(&["z.xsl", "m.xml", "a.xsl", "b.xml"]);
        let split = partition(&bundle);

        let docs: Vec<&str> = split.documents.iter().map(|d| d.path).collect();
        let tpls: Vec<&str> = split.templates.iter().map(|t| t.path).collect();
        assert_eq!(docs, ["m.xml", "b.xml"]);
        assert_eq!(tpls, ["z.xsl", "a.xsl"]);
    }

    #[test]
    fn nested_paths_classify_by_base_name() {
        let bundle = bundle_of(&["forms/notify.xml", "styles/notify.xsl"]);
        let split = partition(&bundle);

        assert_eq!(split.documents[0].path, "forms/notify.xml");
        assert_eq!(split.templates[0].path, "styles/notify.xsl");
    }

    #[test]
    fn document_text_is_lossy_for_invalid_utf8() {
        let bytes = [b'<', b'a', 0xFF, b'>'];
        let doc = DocumentEntry {
            path: "a.xml",
            bytes: &bytes,
        };
        assert!(doc.text().contains('\u{FFFD}'));
    }
}
