//! # egov-convert
//!
//! Converts e-Gov procedure archives into readable HTML bundles. Each input
//! is a ZIP holding structured XML documents and the XSL style sheets that
//! render them; the converter pairs every document with the right style
//! sheet, transforms it, and repackages originals plus rendered HTML into
//! one combined result ZIP.
//!
//! # Architecture: Four-Stage Pipeline
//!
//! Each input archive flows through four independent stages:
//!
//! ```text
//! 1. Extract    ZIP bytes     →  ArchiveBundle       (entries in memory)
//! 2. Resolve    document      →  template + rule     (per document)
//! 3. Transform  doc + template →  HTML entry         (XSLT + post-pass)
//! 4. Package    bundle + HTML →  result ZIP          (merged at the end)
//! ```
//!
//! The stages are separate modules with separate error types so unit tests
//! can exercise matching logic without compiling style sheets, and archive
//! round-trips without running a pipeline.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`archive`] | In-memory ZIP extract / build / merge |
//! | [`bundle`] | Entry classification into documents and templates |
//! | [`resolve`] | Template resolution: declared reference → name stem → fallback |
//! | [`xslt`] | Engine trait seam + pure-Rust `xrust` backend |
//! | [`transform`] | XSLT render, `<pre>`→`<p>` normalization, output naming |
//! | [`pipeline`] | Per-batch orchestration, progress events, run report |
//! | [`naming`] | Entry-path helpers: base name, stem, `_ge.html` naming |
//! | [`output`] | CLI output formatting — resolution audit display |
//!
//! # Design Decisions
//!
//! ## Everything In Memory
//!
//! Archive bytes arrive loaded and the combined result leaves as a buffer;
//! no stage reads or writes the filesystem. This keeps the core equally at
//! home behind a CLI, a service, or a test harness, and makes every stage
//! a function from bytes to bytes.
//!
//! ## Pinned Resolution Order
//!
//! Template matching is an ordered, first-match-wins cascade: a declared
//! stylesheet reference is authoritative, same-stem pairing covers the
//! common naming convention, and the first bundled template catches the
//! one-template-for-everything archives. Reordering these rules changes
//! the answer for ambiguous archives, so the order is part of the contract
//! and pinned by tests.
//!
//! ## Pure-Rust XSLT
//!
//! Transformation uses [xrust](https://docs.rs/xrust) rather than libxslt
//! bindings. No system libraries to install or version-match: the binary
//! is fully self-contained, and a malformed archive can never segfault a
//! C library mid-batch. The engine sits behind the [`xslt::XsltEngine`]
//! trait, so tests run against a recording mock.
//!
//! ## All-Or-Nothing Batches
//!
//! One failing archive aborts the whole run with the archive's name (and
//! the failing document's path) attached. Partial result delivery would
//! make a half-converted batch look complete; users resubmit the corrected
//! batch instead. The single tolerated defect is a document with no
//! template candidates at all — it is skipped and reported, since archives
//! legitimately carry attachments-only XML.

pub mod archive;
pub mod bundle;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod resolve;
pub mod transform;
pub mod xslt;

#[cfg(test)]
pub(crate) mod test_helpers;
