//! XSLT engine trait and shared error type.
//!
//! The production implementation is
//! [`XrustEngine`](super::xrust_backend::XrustEngine). Tests use the
//! recording [`MockEngine`](tests::MockEngine) so resolver and pipeline
//! behavior can be exercised without compiling real style sheets.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("document is not well-formed XML: {0}")]
    MalformedDocument(String),
    #[error("style sheet is not well-formed XML: {0}")]
    MalformedStylesheet(String),
    #[error("transformation failed: {0}")]
    Transform(String),
}

/// Trait for XSLT transformation engines.
///
/// Implementations must parse both inputs themselves and report which one
/// was malformed — the caller needs that distinction to produce a useful
/// error for the end user.
pub trait XsltEngine {
    /// Apply `stylesheet` to `document`, returning the rendered text.
    fn transform(&self, document: &[u8], stylesheet: &[u8]) -> Result<String, EngineError>;
}
