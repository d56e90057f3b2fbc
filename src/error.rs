//! Error types for the veridocx library.

use std::io;
use thiserror::Error;

/// Result type alias for veridocx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document validation.
///
/// Only fatal, pre-report conditions live here. Rule violations are never
/// errors at this level; they are collected as [`Diagnostic`]s in the
/// [`ValidationReport`].
///
/// [`Diagnostic`]: crate::report::Diagnostic
/// [`ValidationReport`]: crate::report::ValidationReport
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The file format is not recognized as a DOCX package.
    #[error("Unknown file format: not a DOCX package")]
    UnknownFormat,

    /// The package container cannot be opened, or a mandatory part
    /// (such as the main document part) is missing.
    #[error("Corrupt package: {0}")]
    CorruptPackage(String),

    /// A markup part of the package is not well-formed XML.
    #[error("Malformed markup in {part}: {reason}")]
    MalformedMarkup {
        /// Package part name, e.g. `word/document.xml`.
        part: String,
        /// Underlying parser message.
        reason: String,
    },

    /// Error serializing the validation report.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<zip::result::ZipError> for Error {
    fn from(err: zip::result::ZipError) -> Self {
        match err {
            zip::result::ZipError::Io(e) => Error::Io(e),
            other => Error::CorruptPackage(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::CorruptPackage("bad central directory".to_string());
        assert_eq!(err.to_string(), "Corrupt package: bad central directory");

        let err = Error::MalformedMarkup {
            part: "word/document.xml".to_string(),
            reason: "unexpected EOF".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Malformed markup in word/document.xml: unexpected EOF"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
