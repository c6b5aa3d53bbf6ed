//! Batch orchestration: archives in, one combined archive out.
//!
//! For each input archive, in input order: extract → partition → resolve a
//! template per document → render → pack originals plus rendered HTML into
//! a per-archive result ZIP under `<archive stem>/`. After the last input,
//! all result ZIPs merge into one combined buffer.
//!
//! ## Failure Semantics
//!
//! Multi-archive batches are all-or-nothing. Any failure while processing
//! one archive is wrapped with that archive's name (and the document path,
//! where one is involved) and returned immediately — no partial combined
//! output exists. The single absorbed failure: a document with zero
//! template candidates is skipped, recorded in the run report, and the
//! batch continues.
//!
//! ## Progress
//!
//! Milestones are delivered over an optional mpsc channel: 0 at start, a
//! 0–80 ramp spread evenly across inputs, 90 before the merge, 100 on
//! completion. Sends are best-effort; a dropped receiver never fails the
//! run. Processing is strictly sequential, so percentages are monotonic by
//! construction.

use crate::archive::{self, ArchiveError, Entry};
use crate::bundle;
use crate::naming;
use crate::resolve::{self, MatchRule, ResolveError};
use crate::transform;
use crate::xslt::{EngineError, XsltEngine};
use serde::Serialize;
use std::sync::mpsc::Sender;
use thiserror::Error;

/// One named input archive, bytes already loaded by the caller.
#[derive(Debug, Clone)]
pub struct InputArchive {
    pub name: String,
    pub bytes: Vec<u8>,
}

/// A progress milestone. Messages are display-only, never machine-parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Progress {
    pub percent: u8,
    pub message: String,
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("error while processing archive {name}: {source}")]
    Archive {
        name: String,
        #[source]
        source: ArchiveFailure,
    },
    #[error("error while merging result archives: {0}")]
    Merge(#[source] ArchiveError),
}

/// What went wrong inside a single archive's processing.
#[derive(Error, Debug)]
pub enum ArchiveFailure {
    #[error(transparent)]
    Archive(#[from] ArchiveError),
    #[error("no XML documents found in archive")]
    NoDocumentsFound,
    #[error("error while processing document {path}: {source}")]
    Document {
        path: String,
        #[source]
        source: EngineError,
    },
}

/// Combined archive bytes plus the structured account of what happened.
#[derive(Debug)]
pub struct RunOutput {
    pub bytes: Vec<u8>,
    pub report: RunReport,
}

/// Per-batch conversion report, serializable for `--report`.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub archives: Vec<ArchiveReport>,
}

#[derive(Debug, Serialize)]
pub struct ArchiveReport {
    pub name: String,
    pub template_count: usize,
    pub documents: Vec<DocumentReport>,
}

/// How one document fared. A skipped document (no template candidates)
/// has `template`, `rule` and `output` all absent.
#[derive(Debug, Serialize)]
pub struct DocumentReport {
    pub path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub declared_reference: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rule: Option<MatchRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<String>,
}

impl DocumentReport {
    pub fn skipped(&self) -> bool {
        self.template.is_none()
    }
}

/// Run the full batch. See the module docs for ordering, failure, and
/// progress contracts.
pub fn run(
    inputs: &[InputArchive],
    engine: &impl XsltEngine,
    progress: Option<Sender<Progress>>,
) -> Result<RunOutput, RunError> {
    let total = inputs.len();
    send(&progress, 0, "Starting conversion...".to_string());

    let mut results: Vec<Vec<u8>> = Vec::with_capacity(total);
    let mut archives = Vec::with_capacity(total);

    for (index, input) in inputs.iter().enumerate() {
        let percent = (index * 80 / total) as u8;
        send(
            &progress,
            percent,
            format!("Processing archive: {}", input.name),
        );

        let (bytes, report) =
            process_archive(input, engine).map_err(|source| RunError::Archive {
                name: input.name.clone(),
                source,
            })?;
        results.push(bytes);
        archives.push(report);
    }

    send(&progress, 90, "Merging result archives...".to_string());
    let bytes = archive::merge(&results).map_err(RunError::Merge)?;
    send(&progress, 100, "Conversion complete".to_string());

    Ok(RunOutput {
        bytes,
        report: RunReport { archives },
    })
}

/// Inspect one archive without transforming: what is in it, and which
/// template each document would get.
pub fn inspect(input: &InputArchive) -> Result<ArchiveReport, RunError> {
    let wrap = |source| RunError::Archive {
        name: input.name.clone(),
        source,
    };

    let extracted = archive::extract(&input.bytes).map_err(|e| wrap(e.into()))?;
    let split = bundle::partition(&extracted);
    if split.documents.is_empty() {
        return Err(wrap(ArchiveFailure::NoDocumentsFound));
    }

    let documents = split
        .documents
        .iter()
        .map(|document| {
            let declared = resolve::declared_reference(&document.text());
            match resolve::resolve(*document, &split.templates) {
                Ok(resolution) => DocumentReport {
                    path: document.path.to_string(),
                    declared_reference: declared,
                    template: Some(resolution.template.path.to_string()),
                    rule: Some(resolution.rule),
                    output: Some(naming::output_name(document.path)),
                },
                Err(ResolveError::NoCandidates(_)) => DocumentReport {
                    path: document.path.to_string(),
                    declared_reference: declared,
                    template: None,
                    rule: None,
                    output: None,
                },
            }
        })
        .collect();

    Ok(ArchiveReport {
        name: input.name.clone(),
        template_count: split.templates.len(),
        documents,
    })
}

fn process_archive(
    input: &InputArchive,
    engine: &impl XsltEngine,
) -> Result<(Vec<u8>, ArchiveReport), ArchiveFailure> {
    let extracted = archive::extract(&input.bytes)?;
    let split = bundle::partition(&extracted);

    if split.documents.is_empty() {
        return Err(ArchiveFailure::NoDocumentsFound);
    }

    let mut rendered: Vec<Entry> = Vec::new();
    let mut documents = Vec::with_capacity(split.documents.len());

    for document in &split.documents {
        let declared = resolve::declared_reference(&document.text());
        match resolve::resolve(*document, &split.templates) {
            Ok(resolution) => {
                let output = transform::render(engine, *document, resolution.template).map_err(
                    |source| ArchiveFailure::Document {
                        path: document.path.to_string(),
                        source,
                    },
                )?;
                documents.push(DocumentReport {
                    path: document.path.to_string(),
                    declared_reference: declared,
                    template: Some(resolution.template.path.to_string()),
                    rule: Some(resolution.rule),
                    output: Some(output.file_name.clone()),
                });
                rendered.push(Entry {
                    path: output.file_name,
                    bytes: output.html.into_bytes(),
                });
            }
            Err(ResolveError::NoCandidates(_)) => {
                // Nothing to apply: skip this document, keep the archive going.
                documents.push(DocumentReport {
                    path: document.path.to_string(),
                    declared_reference: declared,
                    template: None,
                    rule: None,
                    output: None,
                });
            }
        }
    }

    let bytes = archive::build(&extracted, &rendered, naming::stem(&input.name))?;

    Ok((
        bytes,
        ArchiveReport {
            name: input.name.clone(),
            template_count: split.templates.len(),
            documents,
        },
    ))
}

fn send(progress: &Option<Sender<Progress>>, percent: u8, message: String) {
    if let Some(sender) = progress {
        // Best-effort: a hung-up receiver must not fail the pipeline.
        sender.send(Progress { percent, message }).ok();
    }
}
