//! Template resolution: which style sheet applies to which document.
//!
//! Resolution runs two layers of ordered, first-match-wins rules. The order
//! is load-bearing — reordering changes the answer for ambiguous archives —
//! and is pinned by the tests in this module.
//!
//! **Layer 1 — declared reference.** Documents may point at their style
//! sheet explicitly. Four detection patterns are tried against the document
//! text, strictest first:
//!
//! 1. a full `<?xml-stylesheet ... href="..."?>` processing instruction;
//! 2. a looser scan: the `xml-stylesheet` keyword followed by a quoted
//!    `href` (tolerates a mangled or unterminated instruction);
//! 3. any quoted `href` value ending in `.xsl`, wherever it appears;
//! 4. any bare file-name-like token ending in `.xsl`.
//!
//! A detected reference matches a candidate whose base name equals it
//! (case-insensitive) or whose full path contains it as a substring.
//!
//! **Layer 2 — structural rules.** When no reference is found, or the
//! reference matches nothing: a candidate whose stem equals the document's
//! stem wins (the common same-name convention); failing that, the first
//! candidate in bundle order (archives often ship one shared template).
//! Only an empty candidate set fails.

use crate::bundle::{DocumentEntry, TemplateEntry};
use crate::naming;
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("no template candidates available for {0}")]
    NoCandidates(String),
}

/// Which rule chose the template. Reported so users can audit ambiguous
/// archives instead of guessing why a particular style sheet was applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    DeclaredReference,
    NameStem,
    Fallback,
}

/// A successful resolution: the chosen template and the rule that chose it.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    pub template: TemplateEntry<'a>,
    pub rule: MatchRule,
}

// Detection cascade for layer 1, strictest pattern first. Each pattern
// captures the reference in group 1.
static REFERENCE_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        // Canonical stylesheet processing instruction.
        Regex::new(r#"(?i)<\?xml-stylesheet\s[^>]*href\s*=\s*["']([^"']+)["'][^>]*\?>"#)
            .expect("valid stylesheet PI regex"),
        // Keyword followed eventually by a quoted href.
        Regex::new(r#"(?i)xml-stylesheet\s[^>]*href\s*=\s*["']([^"']+)["']"#)
            .expect("valid loose PI regex"),
        // Any quoted href ending in the template extension.
        Regex::new(r#"(?i)href\s*=\s*["']([^"']*\.xsl)["']"#).expect("valid href regex"),
        // Any bare file-name-like token ending in the template extension.
        Regex::new(r#"(?i)([^/\\\s"'<>]+\.xsl)"#).expect("valid token regex"),
    ]
});

/// Extract a declared template reference from document text.
///
/// The first pattern producing a non-empty capture wins; `None` means the
/// document does not point at a style sheet in any recognizable way.
pub fn declared_reference(text: &str) -> Option<String> {
    REFERENCE_PATTERNS.iter().find_map(|pattern| {
        pattern
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
            .filter(|reference| !reference.is_empty())
    })
}

/// Pick exactly one template for `document`, or fail if none exist.
pub fn resolve<'a>(
    document: DocumentEntry<'a>,
    candidates: &[TemplateEntry<'a>],
) -> Result<Resolution<'a>, ResolveError> {
    if candidates.is_empty() {
        return Err(ResolveError::NoCandidates(document.path.to_string()));
    }

    if let Some(reference) = declared_reference(&document.text()) {
        let hit = candidates.iter().find(|candidate| {
            naming::base_name(candidate.path).eq_ignore_ascii_case(&reference)
                || candidate.path.contains(reference.as_str())
        });
        if let Some(template) = hit {
            return Ok(Resolution {
                template: *template,
                rule: MatchRule::DeclaredReference,
            });
        }
    }

    let document_stem = naming::stem(document.path);
    if let Some(template) = candidates
        .iter()
        .find(|candidate| naming::stem(candidate.path).eq_ignore_ascii_case(document_stem))
    {
        return Ok(Resolution {
            template: *template,
            rule: MatchRule::NameStem,
        });
    }

    Ok(Resolution {
        template: candidates[0],
        rule: MatchRule::Fallback,
    })
}
