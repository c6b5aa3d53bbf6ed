//! Document transformation: XSLT render plus output normalization.
//!
//! This stage turns one (document, template) pair into a named HTML entry.
//! The engine does the heavy lifting; this module adds the two conversion
//! policies layered on top of it:
//!
//! - **`<pre>` → `<p>` normalization.** Government style sheets wrap body
//!   text in preformatted blocks, which downstream HTML viewers render as
//!   unwrapped monospace. Every opening `<pre ...>` tag becomes `<p>` and
//!   every `</pre>` becomes `</p>`, unconditionally — a pure textual
//!   substitution, case-insensitive, attributes discarded. No other markup
//!   is touched.
//! - **Deterministic output naming.** `forms/notify.xml` always renders to
//!   `notify_ge.html` (see [`crate::naming::output_name`]).

use crate::bundle::{DocumentEntry, TemplateEntry};
use crate::naming;
use crate::xslt::{EngineError, XsltEngine};
use regex::Regex;
use std::sync::LazyLock;

/// A rendered document ready for packaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformOutput {
    /// Output entry name: `<document stem>_ge.html`.
    pub file_name: String,
    pub html: String,
}

static PRE_OPEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<pre\b[^>]*>").expect("valid pre-open regex"));
static PRE_CLOSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</pre>").expect("valid pre-close regex"));

/// Apply `template` to `document` and normalize the rendered markup.
pub fn render(
    engine: &impl XsltEngine,
    document: DocumentEntry<'_>,
    template: TemplateEntry<'_>,
) -> Result<TransformOutput, EngineError> {
    let html = engine.transform(document.bytes, template.bytes)?;
    Ok(TransformOutput {
        file_name: naming::output_name(document.path),
        html: normalize_preformatted(&html),
    })
}

/// Replace every preformatted block tag with a paragraph tag.
fn normalize_preformatted(html: &str) -> String {
    let html = PRE_OPEN.replace_all(html, "<p>");
    PRE_CLOSE.replace_all(&html, "</p>").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xslt::engine::tests::MockEngine;

    fn doc<'a>(path: &'a str, text: &'a str) -> DocumentEntry<'a> {
        DocumentEntry {
            path,
            bytes: text.as_bytes(),
        }
    }

    fn tpl<'a>(path: &'a str, text: &'a str) -> TemplateEntry<'a> {
        TemplateEntry {
            path,
            bytes: text.as_bytes(),
        }
    }

    #[test]
    fn render_names_output_from_document_stem() {
        let engine = MockEngine::new();
        let output = render(&engine, doc("forms/report.xml", "<r/>"), tpl("s.xsl", "<x/>")).unwrap();
        assert_eq!(output.file_name, "report_ge.html");
    }

    #[test]
    fn render_passes_both_inputs_to_engine() {
        let engine = MockEngine::new();
        render(&engine, doc("a.xml", "<a/>"), tpl("s.xsl", "<style/>")).unwrap();

        let calls = engine.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].document, "<a/>");
        assert_eq!(calls[0].stylesheet, "<style/>");
    }

    #[test]
    fn render_propagates_engine_failure() {
        let engine = MockEngine::failing();
        let result = render(&engine, doc("a.xml", "<a/>"), tpl("s.xsl", "<x/>"));
        assert!(matches!(result, Err(EngineError::Transform(_))));
    }

    // =========================================================================
    // <pre> normalization
    // =========================================================================

    #[test]
    fn pre_tags_become_paragraphs() {
        assert_eq!(
            normalize_preformatted("<pre>text</pre>"),
            "<p>text</p>"
        );
    }

    #[test]
    fn pre_with_attributes_loses_them() {
        assert_eq!(
            normalize_preformatted(r#"<pre class="form" style="x">text</pre>"#),
            "<p>text</p>"
        );
    }

    #[test]
    fn pre_matching_is_case_insensitive() {
        assert_eq!(
            normalize_preformatted("<PRE>a</PRE><Pre>b</Pre>"),
            "<p>a</p><p>b</p>"
        );
    }

    #[test]
    fn replacement_is_one_for_one() {
        let html = "<pre>a</pre><div><pre>b</pre></div>";
        assert_eq!(
            normalize_preformatted(html),
            "<p>a</p><div><p>b</p></div>"
        );
    }

    #[test]
    fn other_markup_is_untouched() {
        let html = r#"<html><body class="pre"><p>keep</p><span>pre</span></body></html>"#;
        assert_eq!(normalize_preformatted(html), html);
    }

    #[test]
    fn prefix_named_tags_are_untouched() {
        // <pre\b...> must not match <present>.
        assert_eq!(
            normalize_preformatted("<present>x</present>"),
            "<present>x</present>"
        );
    }

    #[test]
    fn render_applies_normalization_to_engine_output() {
        let engine =
            MockEngine::with_outputs(vec!["<html><PRE>body</PRE></html>".to_string()]);
        let output = render(&engine, doc("a.xml", "<a/>"), tpl("s.xsl", "<x/>")).unwrap();
        assert_eq!(output.html, "<html><p>body</p></html>");
    }
}
