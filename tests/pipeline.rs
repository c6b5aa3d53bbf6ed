//! End-to-end pipeline tests with the real XSLT engine.
//!
//! Everything below drives the public API the way the CLI does: ZIP bytes
//! in, combined ZIP bytes out, real `xrust` transformation in the middle.
//! Unit tests cover the matching rules with a mock engine; these pin the
//! whole conversion path.

use egov_convert::archive;
use egov_convert::pipeline::{self, InputArchive};
use egov_convert::resolve::MatchRule;
use egov_convert::xslt::XrustEngine;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const DOCUMENT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet type="text/xsl" href="notify.xsl"?>
<doc><title>Notification of Change</title></doc>"#;

// Template body on one line: whitespace-only text nodes in the template
// would otherwise leak into the rendered output.
const STYLESHEET: &str = r#"<xsl:stylesheet version="1.0"
    xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:template match="child::doc"><html><body><pre><xsl:value-of select="child::title"/></pre></body></html></xsl:template>
</xsl:stylesheet>"#;

fn zip_bytes(entries: &[(&str, &str)]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, content) in entries {
        writer
            .start_file(*path, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(content.as_bytes()).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

fn entry_text(bundle: &archive::ArchiveBundle, path: &str) -> String {
    let entry = bundle
        .entries
        .iter()
        .find(|e| e.path == path)
        .unwrap_or_else(|| {
            let paths: Vec<&str> = bundle.entries.iter().map(|e| e.path.as_str()).collect();
            panic!("entry '{path}' not found. Available: {paths:?}")
        });
    String::from_utf8(entry.bytes.clone()).unwrap()
}

#[test]
fn converts_a_declared_reference_archive_end_to_end() {
    let input = InputArchive {
        name: "procedure.zip".to_string(),
        bytes: zip_bytes(&[
            ("other.xsl", STYLESHEET),
            ("form.xml", DOCUMENT),
            ("notify.xsl", STYLESHEET),
        ]),
    };
    let engine = XrustEngine::new();

    let result = pipeline::run(std::slice::from_ref(&input), &engine, None).unwrap();
    let combined = archive::extract(&result.bytes).unwrap();

    // Originals and rendered output, all under the archive-stem prefix.
    let paths: Vec<&str> = combined.entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "procedure/other.xsl",
            "procedure/form.xml",
            "procedure/notify.xsl",
            "procedure/form_ge.html",
        ]
    );

    // Real transformation happened and the pre→p post-pass applied.
    let html = entry_text(&combined, "procedure/form_ge.html");
    assert!(html.contains("Notification of Change"));
    assert!(html.contains("<p>"));
    assert!(!html.to_lowercase().contains("<pre"));

    // The declared reference won over the earlier-listed template.
    let document = &result.report.archives[0].documents[0];
    assert_eq!(document.template.as_deref(), Some("notify.xsl"));
    assert_eq!(document.rule, Some(MatchRule::DeclaredReference));
}

#[test]
fn multi_archive_batch_round_trips_through_disk() {
    // The CLI's caller duties: write the combined buffer out, read it back.
    let first = InputArchive {
        name: "a.zip".to_string(),
        bytes: zip_bytes(&[("a.xml", DOCUMENT), ("a.xsl", STYLESHEET)]),
    };
    let second = InputArchive {
        name: "b.zip".to_string(),
        bytes: zip_bytes(&[("b.xml", DOCUMENT), ("b.xsl", STYLESHEET)]),
    };
    let engine = XrustEngine::new();

    let result = pipeline::run(&[first, second], &engine, None).unwrap();

    let tmp = tempfile::TempDir::new().unwrap();
    let out_path = tmp.path().join("egov_converted_test.zip");
    std::fs::write(&out_path, &result.bytes).unwrap();

    let reloaded = std::fs::read(&out_path).unwrap();
    let combined = archive::extract(&reloaded).unwrap();

    let paths: Vec<&str> = combined.entries.iter().map(|e| e.path.as_str()).collect();
    assert_eq!(
        paths,
        [
            "a/a.xml",
            "a/a.xsl",
            "a/a_ge.html",
            "b/b.xml",
            "b/b.xsl",
            "b/b_ge.html",
        ]
    );
}

#[test]
fn malformed_document_aborts_with_archive_and_document_names() {
    let input = InputArchive {
        name: "bad.zip".to_string(),
        bytes: zip_bytes(&[("broken.xml", "<doc><unclosed>"), ("s.xsl", STYLESHEET)]),
    };
    let engine = XrustEngine::new();

    let err = pipeline::run(&[input], &engine, None).unwrap_err();
    let message = err.to_string();
    assert!(message.contains("bad.zip"));
}

#[test]
fn stem_paired_archive_resolves_each_document_to_its_template() {
    let plain_a = r#"<doc><title>A</title></doc>"#;
    let plain_b = r#"<doc><title>B</title></doc>"#;
    let input = InputArchive {
        name: "pairs.zip".to_string(),
        bytes: zip_bytes(&[
            ("B.xsl", STYLESHEET),
            ("A.xml", plain_a),
            ("A.xsl", STYLESHEET),
            ("B.xml", plain_b),
        ]),
    };
    let engine = XrustEngine::new();

    let result = pipeline::run(&[input], &engine, None).unwrap();
    let documents = &result.report.archives[0].documents;

    assert_eq!(documents[0].path, "A.xml");
    assert_eq!(documents[0].template.as_deref(), Some("A.xsl"));
    assert_eq!(documents[1].path, "B.xml");
    assert_eq!(documents[1].template.as_deref(), Some("B.xsl"));
    assert!(
        documents
            .iter()
            .all(|d| d.rule == Some(MatchRule::NameStem))
    );
}
