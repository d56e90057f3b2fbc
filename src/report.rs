//! Validation report and diagnostics.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Severity of a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Violation that fails the document
    Error,
    /// Finding that is reported but does not fail the document
    Warning,
}

/// One reported rule violation or informational note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// Severity of the finding
    pub severity: Severity,

    /// Stable identifier of the originating rule
    pub rule: String,

    /// Human-readable message
    pub message: String,

    /// Paragraph the finding is anchored to, if any (document order,
    /// zero-based)
    pub paragraph_index: Option<usize>,
}

impl Diagnostic {
    /// Create an `error`-severity diagnostic.
    pub fn error(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            rule: rule.into(),
            message: message.into(),
            paragraph_index: None,
        }
    }

    /// Create a `warning`-severity diagnostic.
    pub fn warning(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            rule: rule.into(),
            message: message.into(),
            paragraph_index: None,
        }
    }

    /// Anchor the diagnostic to a paragraph index.
    pub fn at_paragraph(mut self, index: usize) -> Self {
        self.paragraph_index = Some(index);
        self
    }

    /// Whether this diagnostic fails the document.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// The structured result of one validation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// `true` iff no `error`-severity diagnostics were produced
    pub ok: bool,

    /// Estimated rendered page count
    pub page_count_estimate: u32,

    /// All findings, in pipeline order
    pub diagnostics: Vec<Diagnostic>,
}

impl ValidationReport {
    /// Assemble a report; the verdict is derived from the diagnostics.
    pub fn new(page_count_estimate: u32, diagnostics: Vec<Diagnostic>) -> Self {
        let ok = !diagnostics.iter().any(Diagnostic::is_error);
        Self {
            ok,
            page_count_estimate,
            diagnostics,
        }
    }

    /// Number of `error`-severity diagnostics.
    pub fn error_count(&self) -> usize {
        self.diagnostics.iter().filter(|d| d.is_error()).count()
    }

    /// Number of `warning`-severity diagnostics.
    pub fn warning_count(&self) -> usize {
        self.diagnostics.len() - self.error_count()
    }

    /// Diagnostics emitted by the named rule.
    pub fn by_rule<'a>(&'a self, rule: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics.iter().filter(move |d| d.rule == rule)
    }
}

/// JSON output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JsonFormat {
    /// Pretty-printed JSON with indentation
    #[default]
    Pretty,
    /// Compact JSON without extra whitespace
    Compact,
}

/// Serialize a report to JSON.
pub fn to_json(report: &ValidationReport, format: JsonFormat) -> Result<String> {
    let result = match format {
        JsonFormat::Pretty => serde_json::to_string_pretty(report),
        JsonFormat::Compact => serde_json::to_string(report),
    };

    result.map_err(|e| Error::Render(format!("JSON serialization error: {e}")))
}
