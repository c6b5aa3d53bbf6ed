//! Production XSLT engine backed by `xrust`.
//!
//! xrust is a pure-Rust XPath/XSLT implementation, which keeps the binary
//! self-contained — no libxml2/libxslt to install or version-match. The
//! engine is deliberately closed to the outside world: `document()` calls
//! and external fetches are disabled, since archive processing must never
//! touch the network or the filesystem mid-transform.

use super::engine::{EngineError, XsltEngine};
use xrust::item::{Item, Node as _, SequenceTrait};
use xrust::parser::xml::parse;
use xrust::transform::context::StaticContextBuilder;
use xrust::trees::smite::RNode;
use xrust::xdmerror::{Error, ErrorKind};
use xrust::xslt::from_document;

#[derive(Debug, Clone, Copy, Default)]
pub struct XrustEngine;

impl XrustEngine {
    pub fn new() -> Self {
        Self
    }
}

/// Parse XML text into a fresh document node.
fn parse_document(text: &str) -> Result<RNode, Error> {
    let doc = RNode::new_document();
    parse(doc.clone(), text, None)?;
    Ok(doc)
}

impl XsltEngine for XrustEngine {
    fn transform(&self, document: &[u8], stylesheet: &[u8]) -> Result<String, EngineError> {
        let document = String::from_utf8_lossy(document);
        let stylesheet = String::from_utf8_lossy(stylesheet);

        let source = parse_document(&document)
            .map_err(|e| EngineError::MalformedDocument(e.to_string()))?;
        let style = parse_document(&stylesheet)
            .map_err(|e| EngineError::MalformedStylesheet(e.to_string()))?;

        // Compile the stylesheet. Imports/includes resolve through the same
        // in-memory parser; there is nothing to fetch them from, so any
        // external reference fails the transform.
        let mut context = from_document(style, None, parse_document, |_| {
            Err(Error::new(
                ErrorKind::NotImplemented,
                "external resources are disabled".to_string(),
            ))
        })
        .map_err(|e| EngineError::MalformedStylesheet(e.to_string()))?;

        context.context(vec![Item::Node(source)], 0);
        context.result_document(RNode::new_document());

        let mut static_context = StaticContextBuilder::new()
            .message(|_| Ok(()))
            .fetcher(|_| {
                Err(Error::new(
                    ErrorKind::NotImplemented,
                    "external resources are disabled".to_string(),
                ))
            })
            .parser(|_| {
                Err(Error::new(
                    ErrorKind::NotImplemented,
                    "external resources are disabled".to_string(),
                ))
            })
            .build();

        let sequence = context
            .evaluate(&mut static_context)
            .map_err(|e| EngineError::Transform(e.to_string()))?;

        Ok(sequence.to_xml())
    }
}
