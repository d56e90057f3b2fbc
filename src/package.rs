//! Package reader for DOCX containers.
//!
//! A DOCX file is an OPC package: a ZIP archive whose entries are the
//! document's structured-markup parts. The reader opens the archive,
//! inflates the parts the validator consumes into byte buffers, and
//! verifies that the mandatory main document part exists. It never
//! parses markup; that is the [`parser`](crate::parser) module's job.

use std::collections::HashMap;
use std::io::{Cursor, Read};

use zip::ZipArchive;

use crate::error::{Error, Result};

/// Part name of the main WordprocessingML document.
pub const MAIN_DOCUMENT_PART: &str = "word/document.xml";
/// Part name of the style definitions.
pub const STYLES_PART: &str = "word/styles.xml";
/// Part name of the core document properties.
pub const CORE_PROPERTIES_PART: &str = "docProps/core.xml";

/// Whether a part is one the validator reads.
fn is_wanted_part(name: &str) -> bool {
    name == MAIN_DOCUMENT_PART
        || name == STYLES_PART
        || name == CORE_PROPERTIES_PART
        || is_header_part(name)
        || is_footer_part(name)
}

fn is_header_part(name: &str) -> bool {
    name.starts_with("word/header") && name.ends_with(".xml")
}

fn is_footer_part(name: &str) -> bool {
    name.starts_with("word/footer") && name.ends_with(".xml")
}

/// An opened document package: part name → decompressed bytes.
///
/// Created per validation call and discarded after parsing; never
/// persisted.
#[derive(Debug)]
pub struct DocumentPackage {
    parts: HashMap<String, Vec<u8>>,
}

impl DocumentPackage {
    /// Open a package from raw `.docx` bytes.
    ///
    /// Fails with [`Error::CorruptPackage`] when the archive cannot be
    /// opened, an entry cannot be inflated, or the main document part is
    /// missing. Validation cannot proceed without a document model, so
    /// this aborts the whole run rather than producing an empty report.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut archive = ZipArchive::new(Cursor::new(data))?;

        let names: Vec<String> = archive
            .file_names()
            .filter(|n| is_wanted_part(n))
            .map(|n| n.to_string())
            .collect();

        let mut parts = HashMap::with_capacity(names.len());
        for name in names {
            let mut entry = archive.by_name(&name)?;
            let mut buf = Vec::with_capacity(entry.size() as usize);
            entry
                .read_to_end(&mut buf)
                .map_err(|e| Error::CorruptPackage(format!("cannot inflate {name}: {e}")))?;
            parts.insert(name, buf);
        }

        if !parts.contains_key(MAIN_DOCUMENT_PART) {
            return Err(Error::CorruptPackage(format!(
                "mandatory part {MAIN_DOCUMENT_PART} is missing"
            )));
        }

        log::debug!("opened package with {} part(s)", parts.len());
        Ok(Self { parts })
    }

    /// Get a part's bytes by name.
    pub fn part(&self, name: &str) -> Option<&[u8]> {
        self.parts.get(name).map(|v| v.as_slice())
    }

    /// Whether the package contains the named part.
    pub fn has_part(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    /// Bytes of the main document part.
    ///
    /// The constructor guarantees its presence; the accessor still
    /// propagates an error instead of panicking.
    pub fn main_document(&self) -> Result<&[u8]> {
        self.part(MAIN_DOCUMENT_PART).ok_or_else(|| {
            Error::CorruptPackage(format!("mandatory part {MAIN_DOCUMENT_PART} is missing"))
        })
    }

    /// Running-header parts, sorted by name.
    pub fn header_parts(&self) -> Vec<(&str, &[u8])> {
        self.parts_matching(is_header_part)
    }

    /// Running-footer parts, sorted by name.
    pub fn footer_parts(&self) -> Vec<(&str, &[u8])> {
        self.parts_matching(is_footer_part)
    }

    fn parts_matching(&self, pred: fn(&str) -> bool) -> Vec<(&str, &[u8])> {
        let mut out: Vec<(&str, &[u8])> = self
            .parts
            .iter()
            .filter(|(name, _)| pred(name))
            .map(|(name, bytes)| (name.as_str(), bytes.as_slice()))
            .collect();
        out.sort_by_key(|(name, _)| *name);
        out
    }

    /// Names of all extracted parts, sorted.
    pub fn part_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.parts.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }
}
