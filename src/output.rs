//! CLI output formatting for conversion runs.
//!
//! # Information-First Display
//!
//! The primary display for every document is its resolution outcome — which
//! template was chosen and by which rule — with file names as the identity
//! and the output entry shown as indented context. This reads as an audit
//! of the matching decisions, which is the part of a run users actually
//! question.
//!
//! # Output Format
//!
//! ```text
//! procedures.zip (2 documents, 1 template)
//!     001 form.xml → notify.xsl [declared reference]
//!         Output: form_ge.html
//!     002 extra.xml → skipped (no template available)
//!
//! Converted 1 document, skipped 1
//! ```
//!
//! # Architecture
//!
//! Each surface has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::pipeline::{ArchiveReport, DocumentReport, Progress, RunReport};
use crate::resolve::MatchRule;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn rule_label(rule: MatchRule) -> &'static str {
    match rule {
        MatchRule::DeclaredReference => "declared reference",
        MatchRule::NameStem => "name stem",
        MatchRule::Fallback => "fallback",
    }
}

/// Singular/plural helper: `count(1, "document")` → `"1 document"`.
fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{n} {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

fn archive_header(report: &ArchiveReport) -> String {
    format!(
        "{} ({}, {})",
        report.name,
        count(report.documents.len(), "document"),
        count(report.template_count, "template"),
    )
}

fn document_lines(index: usize, document: &DocumentReport) -> Vec<String> {
    let mut lines = Vec::new();
    match (&document.template, document.rule) {
        (Some(template), Some(rule)) => {
            lines.push(format!(
                "{}{} {} → {} [{}]",
                indent(1),
                format_index(index),
                document.path,
                template,
                rule_label(rule),
            ));
            if let Some(output) = &document.output {
                lines.push(format!("{}Output: {}", indent(2), output));
            }
        }
        _ => {
            lines.push(format!(
                "{}{} {} → skipped (no template available)",
                indent(1),
                format_index(index),
                document.path,
            ));
        }
    }
    lines
}

/// Format a full run: one block per archive plus a summary line.
pub fn format_run_output(report: &RunReport) -> Vec<String> {
    let mut lines = Vec::new();
    let mut converted = 0;
    let mut skipped = 0;

    for archive in &report.archives {
        lines.push(archive_header(archive));
        for (pos, document) in archive.documents.iter().enumerate() {
            lines.extend(document_lines(pos + 1, document));
            if document.skipped() {
                skipped += 1;
            } else {
                converted += 1;
            }
        }
        lines.push(String::new());
    }

    let mut summary = format!("Converted {}", count(converted, "document"));
    if skipped > 0 {
        summary.push_str(&format!(", skipped {skipped}"));
    }
    lines.push(summary);
    lines
}

/// Format a single-archive inspection: same block, no summary.
pub fn format_inspect_output(report: &ArchiveReport) -> Vec<String> {
    let mut lines = vec![archive_header(report)];
    for (pos, document) in report.documents.iter().enumerate() {
        lines.extend(document_lines(pos + 1, document));
    }
    lines
}

/// Format one progress milestone: `[ 40%] Processing archive: two.zip`.
pub fn format_progress(progress: &Progress) -> String {
    format!("[{:>3}%] {}", progress.percent, progress.message)
}

pub fn print_run_output(report: &RunReport) {
    for line in format_run_output(report) {
        println!("{line}");
    }
}

pub fn print_inspect_output(report: &ArchiveReport) {
    for line in format_inspect_output(report) {
        println!("{line}");
    }
}
