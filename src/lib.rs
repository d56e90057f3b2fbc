//! # veridocx
//!
//! Layout validation for DOCX thesis submissions.
//!
//! This library opens a submitted document package, reconstructs its
//! formatting model, and checks that model against a fixed set of layout
//! rules (page size, margins, font, spacing, indentation, required
//! sections, and total page count) without invoking a rendering engine.
//! Page count is estimated from structural data through a line-wrapping
//! and pagination approximation.
//!
//! ## Quick Start
//!
//! ```no_run
//! use veridocx::{validate_file, report};
//!
//! fn main() -> veridocx::Result<()> {
//!     // Validate a submission
//!     let result = validate_file("thesis.docx")?;
//!
//!     // Serialize the report
//!     let json = report::to_json(&result, report::JsonFormat::Pretty)?;
//!     println!("{}", json);
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Pipeline
//!
//! - **Package reader**: opens the ZIP container, inflates the markup parts
//! - **Model builder**: event-driven parse into paragraphs, runs and styles
//! - **Style resolver**: flattens the formatting cascade, detects cycles
//! - **Pagination estimator**: greedy wrap + page accumulation heuristics
//! - **Rule engine**: independent checks producing severity-tagged diagnostics
//!
//! Each validation run is a pure function of the input bytes: no shared
//! state, no internal I/O, safe to run concurrently from any executor.

pub mod detect;
pub mod error;
pub mod layout;
pub mod model;
pub mod package;
pub mod parser;
pub mod report;
pub mod resolve;
pub mod rules;

// Re-export commonly used types
pub use error::{Error, Result};
pub use layout::{FontMetrics, PageEstimator};
pub use model::{Alignment, Document, LineSpacing, Metadata, PageSetup, Paragraph, Run};
pub use package::DocumentPackage;
pub use parser::{DocxParser, ParseOutcome};
pub use report::{Diagnostic, JsonFormat, Severity, ValidationReport};
pub use resolve::{ResolvedDocument, ResolvedParagraph, ResolvedRun};
pub use rules::{Rule, RuleContext, RuleSet, ValidationProfile};

use std::fs;
use std::path::Path;

/// Validate raw `.docx` bytes against the default profile.
///
/// # Returns
///
/// The full [`ValidationReport`], or a fatal [`Error`] when the package
/// is corrupt or a markup part is malformed. Fatal failures never
/// surface as an empty report.
///
/// # Example
///
/// ```no_run
/// use veridocx::validate_bytes;
///
/// let data = std::fs::read("thesis.docx").unwrap();
/// let result = validate_bytes(&data).unwrap();
/// println!("ok: {}, pages: {}", result.ok, result.page_count_estimate);
/// ```
pub fn validate_bytes(data: &[u8]) -> Result<ValidationReport> {
    validate_bytes_with_profile(data, &ValidationProfile::default())
}

/// Validate raw `.docx` bytes against a custom profile.
pub fn validate_bytes_with_profile(
    data: &[u8],
    profile: &ValidationProfile,
) -> Result<ValidationReport> {
    let package = DocumentPackage::from_bytes(data)?;
    let outcome = DocxParser::new(&package).parse()?;
    let resolution = resolve::resolve(&outcome.document);

    let estimator = PageEstimator::new(profile.metrics.clone());
    let estimate = estimator.estimate(&outcome.document, &resolution.document);

    let mut diagnostics = outcome.warnings;
    diagnostics.extend(resolution.diagnostics);

    let ctx = RuleContext {
        document: &outcome.document,
        resolved: &resolution.document,
        page_estimate: estimate,
        profile,
    };
    diagnostics.extend(RuleSet::standard().run(&ctx));

    let result = ValidationReport::new(estimate, diagnostics);
    log::info!(
        "validated document: ok={}, pages={}, {} error(s), {} warning(s)",
        result.ok,
        result.page_count_estimate,
        result.error_count(),
        result.warning_count()
    );
    Ok(result)
}

/// Validate a `.docx` file against the default profile.
///
/// # Example
///
/// ```no_run
/// use veridocx::validate_file;
///
/// let result = validate_file("thesis.docx").unwrap();
/// assert!(result.ok);
/// ```
pub fn validate_file<P: AsRef<Path>>(path: P) -> Result<ValidationReport> {
    let data = fs::read(path)?;
    validate_bytes(&data)
}

/// Validate a `.docx` file against a custom profile.
pub fn validate_file_with_profile<P: AsRef<Path>>(
    path: P,
    profile: &ValidationProfile,
) -> Result<ValidationReport> {
    let data = fs::read(path)?;
    validate_bytes_with_profile(&data, profile)
}

/// Validate a `.docx` file without blocking the async executor.
///
/// Reads the file with tokio and runs the synchronous pipeline on a
/// blocking thread.
#[cfg(feature = "async")]
pub async fn validate_file_async<P: AsRef<Path>>(path: P) -> Result<ValidationReport> {
    let data = tokio::fs::read(path.as_ref()).await?;
    tokio::task::spawn_blocking(move || validate_bytes(&data))
        .await
        .map_err(|e| Error::Other(format!("validation task failed: {e}")))?
}

/// Builder for configuring and running validations.
///
/// # Example
///
/// ```no_run
/// use veridocx::{Validator, FontMetrics};
///
/// let result = Validator::new()
///     .with_font("Times New Roman", 14.0)
///     .with_page_range(1, 2)
///     .with_metrics(FontMetrics::default())
///     .validate_file("thesis.docx")?;
/// # Ok::<(), veridocx::Error>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Validator {
    profile: ValidationProfile,
}

impl Validator {
    /// Create a validator with the default profile.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an explicit profile.
    pub fn with_profile(profile: ValidationProfile) -> Self {
        Self { profile }
    }

    /// Set the required font.
    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.profile = self.profile.with_font(family, size);
        self
    }

    /// Set the required uniform margin, in millimeters.
    pub fn with_margin_mm(mut self, margin: f32) -> Self {
        self.profile = self.profile.with_margin_mm(margin);
        self
    }

    /// Set the allowed page-count range, inclusive.
    pub fn with_page_range(mut self, min: u32, max: u32) -> Self {
        self.profile = self.profile.with_page_range(min, max);
        self
    }

    /// Set the literature section marker.
    pub fn with_literature_marker(mut self, marker: impl Into<String>) -> Self {
        self.profile = self.profile.with_literature_marker(marker);
        self
    }

    /// Replace the pagination font metrics.
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.profile = self.profile.with_metrics(metrics);
        self
    }

    /// The effective profile.
    pub fn profile(&self) -> &ValidationProfile {
        &self.profile
    }

    /// Validate raw bytes.
    pub fn validate_bytes(&self, data: &[u8]) -> Result<ValidationReport> {
        validate_bytes_with_profile(data, &self.profile)
    }

    /// Validate a file.
    pub fn validate_file<P: AsRef<Path>>(&self, path: P) -> Result<ValidationReport> {
        validate_file_with_profile(path, &self.profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_builder() {
        let validator = Validator::new()
            .with_font("Arial", 12.0)
            .with_page_range(1, 3)
            .with_literature_marker("References");

        assert_eq!(validator.profile().font_family, "Arial");
        assert_eq!(validator.profile().max_pages, 3);
        assert_eq!(validator.profile().literature_marker, "References");
    }

    #[test]
    fn test_validate_bytes_empty_data() {
        let data: [u8; 0] = [];
        let result = validate_bytes(&data);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_bytes_not_a_zip() {
        let result = validate_bytes(b"%PDF-1.7 definitely not a docx");
        assert!(matches!(result, Err(Error::CorruptPackage(_))));
    }

    #[test]
    fn test_fatal_error_produces_no_report() {
        // A report is never synthesized for broken containers; the error
        // carries the failure instead.
        let result = validate_bytes(b"PK\x03\x04truncated");
        assert!(result.is_err());
    }
}
