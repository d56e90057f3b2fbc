//! DOCX container detection.

use crate::error::{Error, Result};
use crate::package;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// ZIP local file header magic: PK\x03\x04
const ZIP_MAGIC: &[u8] = b"PK\x03\x04";
/// End-of-central-directory magic of an archive with no entries.
const ZIP_EMPTY_MAGIC: &[u8] = b"PK\x05\x06";

/// Check if bytes look like a ZIP container.
///
/// This is a cheap magic-byte check; it does not prove the archive is
/// readable. Use [`is_docx_bytes`] for a full check.
pub fn is_zip_bytes(data: &[u8]) -> bool {
    data.starts_with(ZIP_MAGIC) || data.starts_with(ZIP_EMPTY_MAGIC)
}

/// Detect whether bytes are a readable DOCX package.
///
/// # Arguments
/// * `data` - Complete file content
///
/// # Returns
/// * `Ok(())` if the data opens as a ZIP archive containing the main
///   WordprocessingML document part
/// * `Err(Error::UnknownFormat)` if the magic bytes are not a ZIP container
/// * `Err(Error::CorruptPackage)` if the archive cannot be read or the
///   main part is absent
pub fn detect_docx_bytes(data: &[u8]) -> Result<()> {
    if !is_zip_bytes(data) {
        return Err(Error::UnknownFormat);
    }
    package::DocumentPackage::from_bytes(data).map(|_| ())
}

/// Check if bytes represent a DOCX package.
pub fn is_docx_bytes(data: &[u8]) -> bool {
    detect_docx_bytes(data).is_ok()
}

/// Check if a file is a DOCX package.
pub fn is_docx<P: AsRef<Path>>(path: P) -> bool {
    let Ok(file) = File::open(path) else {
        return false;
    };
    let mut reader = BufReader::new(file);
    let mut data = Vec::new();
    if reader.read_to_end(&mut data).is_err() {
        return false;
    }
    is_docx_bytes(&data)
}
