//! Shared test fixtures for the egov-convert test suite.
//!
//! Everything here builds archives in memory — tests never touch the
//! filesystem unless they are specifically exercising the CLI.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let input = input_archive("in.zip", &[
//!     ("form.xml", DOC_WITH_REFERENCE.as_bytes()),
//!     ("notify.xsl", XSL_MINIMAL.as_bytes()),
//! ]);
//! ```

use crate::pipeline::InputArchive;
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

/// A document with no stylesheet reference of any kind.
pub const DOC_PLAIN: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<doc><title>Plain</title></doc>"#;

/// A document declaring `notify.xsl` via the canonical processing
/// instruction.
pub const DOC_WITH_REFERENCE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<?xml-stylesheet type="text/xsl" href="notify.xsl"?>
<doc><title>Referenced</title></doc>"#;

/// A minimal but complete XSLT 1.0 style sheet: renders the document title
/// into an HTML body. Real enough for the xrust engine, small enough to
/// read in a failure message.
pub const XSL_MINIMAL: &str = r#"<xsl:stylesheet version="1.0"
    xmlns:xsl="http://www.w3.org/1999/XSL/Transform">
  <xsl:template match="child::doc">
    <html><body><pre><xsl:value-of select="child::title"/></pre></body></html>
  </xsl:template>
</xsl:stylesheet>"#;

/// Build ZIP bytes from (path, content) pairs, in order.
pub fn zip_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (path, bytes) in entries {
        writer
            .start_file(*path, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

/// Build a named [`InputArchive`] from (path, content) pairs.
pub fn input_archive(name: &str, entries: &[(&str, &[u8])]) -> InputArchive {
    InputArchive {
        name: name.to_string(),
        bytes: zip_bytes(entries),
    }
}
