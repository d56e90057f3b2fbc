//! WordprocessingML parsing module.
//!
//! Turns an opened [`DocumentPackage`] into the document model. Parsing
//! is an event-driven pass over already-loaded buffers; there is no
//! streaming I/O. Unknown markup is skipped; recognized-but-unhandled
//! constructs are recorded as `warning` diagnostics so a document using
//! features the validator does not understand never hard-fails here.
//! Only non-well-formed XML aborts with [`Error::MalformedMarkup`].
//!
//! [`Error::MalformedMarkup`]: crate::error::Error::MalformedMarkup

mod core_props;
mod document_xml;
mod styles_xml;

use quick_xml::events::BytesStart;

use crate::error::Result;
use crate::model::Document;
use crate::package::{DocumentPackage, CORE_PROPERTIES_PART, STYLES_PART};
use crate::report::Diagnostic;

/// Rule id attached to unsupported-construct warnings.
pub const UNSUPPORTED_CONSTRUCT: &str = "unsupported-construct";

/// Result of building the document model: the model itself plus any
/// warnings recovered during the parse.
#[derive(Debug)]
pub struct ParseOutcome {
    /// The assembled document model
    pub document: Document,

    /// Warnings for constructs that were skipped, in encounter order
    pub warnings: Vec<Diagnostic>,
}

/// Parser turning a document package into the document model.
pub struct DocxParser<'a> {
    package: &'a DocumentPackage,
}

impl<'a> DocxParser<'a> {
    /// Create a parser over an opened package.
    pub fn new(package: &'a DocumentPackage) -> Self {
        Self { package }
    }

    /// Parse all consumed parts into a [`Document`].
    pub fn parse(&self) -> Result<ParseOutcome> {
        let mut warnings = Vec::new();

        let styles = match self.package.part(STYLES_PART) {
            Some(xml) => styles_xml::parse_styles(xml, STYLES_PART)?,
            None => Default::default(),
        };

        let body = document_xml::parse_document(
            self.package.main_document()?,
            crate::package::MAIN_DOCUMENT_PART,
            &mut warnings,
        )?;

        let metadata = match self.package.part(CORE_PROPERTIES_PART) {
            Some(xml) => core_props::parse_core_properties(xml, CORE_PROPERTIES_PART)?,
            None => Default::default(),
        };

        let mut header_texts = Vec::new();
        for (name, xml) in self.package.header_parts() {
            header_texts.push(document_xml::extract_text(xml, name)?);
        }
        let mut footer_texts = Vec::new();
        for (name, xml) in self.package.footer_parts() {
            footer_texts.push(document_xml::extract_text(xml, name)?);
        }

        let document = Document {
            metadata,
            paragraphs: body.paragraphs,
            styles,
            page_setup: body.page_setup.unwrap_or_default(),
            header_texts,
            footer_texts,
        };

        log::debug!(
            "built document model: {} paragraph(s), {} style(s), {} warning(s)",
            document.paragraph_count(),
            document.styles.len(),
            warnings.len()
        );

        Ok(ParseOutcome { document, warnings })
    }
}

/// Fetch an attribute value by local name, with entities unescaped.
pub(crate) fn attr_value(e: &BytesStart, name: &[u8]) -> Option<String> {
    e.attributes()
        .flatten()
        .find(|a| a.key.local_name().as_ref() == name)
        .and_then(|a| a.unescape_value().ok().map(|v| v.into_owned()))
}

/// Fetch an attribute and parse it as an `f32`.
pub(crate) fn attr_f32(e: &BytesStart, name: &[u8]) -> Option<f32> {
    attr_value(e, name).and_then(|v| v.parse::<f32>().ok())
}

/// WordprocessingML boolean toggle: present with no `val`, or `val`
/// other than `0`/`false`, means on.
pub(crate) fn attr_toggle(e: &BytesStart) -> bool {
    match attr_value(e, b"val") {
        None => true,
        Some(v) => v != "0" && v != "false",
    }
}
