//! XSLT transformation — engine trait seam plus the pure-Rust backend.
//!
//! The converter only needs one operation from an XSLT processor: document
//! bytes + style-sheet bytes → rendered text. That operation lives behind
//! the [`XsltEngine`] trait so the pipeline and its tests stay
//! engine-agnostic; the production implementation is [`XrustEngine`],
//! backed by the `xrust` crate (pure Rust, statically linked, no libxslt
//! system dependency).

pub mod engine;
pub mod xrust_backend;

pub use engine::{EngineError, XsltEngine};
pub use xrust_backend::XrustEngine;
