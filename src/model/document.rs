//! Document-level types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{mm_to_points, Paragraph, StyleCatalogue};

/// A parsed DOCX document.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Document {
    /// Core document properties (title, creator, dates)
    pub metadata: Metadata,

    /// Paragraphs in document order
    pub paragraphs: Vec<Paragraph>,

    /// Style catalogue and document defaults
    pub styles: StyleCatalogue,

    /// Page geometry active until the first section break
    pub page_setup: PageSetup,

    /// Plain text of each running-header part
    pub header_texts: Vec<String>,

    /// Plain text of each running-footer part
    pub footer_texts: Vec<String>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of paragraphs.
    pub fn paragraph_count(&self) -> usize {
        self.paragraphs.len()
    }

    /// Whether the document has no visible text at all.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.iter().all(|p| p.is_empty())
    }

    /// Paragraphs with visible text, with their document-order indices.
    pub fn non_empty_paragraphs(&self) -> impl Iterator<Item = (usize, &Paragraph)> {
        self.paragraphs
            .iter()
            .enumerate()
            .filter(|(_, p)| !p.is_empty())
    }

    /// Plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.paragraphs
            .iter()
            .map(|p| p.text())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Physical page geometry for a section, in points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSetup {
    /// Page width
    pub width: f32,

    /// Page height
    pub height: f32,

    /// Top margin
    pub margin_top: f32,

    /// Bottom margin
    pub margin_bottom: f32,

    /// Left margin
    pub margin_left: f32,

    /// Right margin
    pub margin_right: f32,
}

impl PageSetup {
    /// A4 page (210 x 297 mm) with the given uniform margin in points.
    pub fn a4(margin: f32) -> Self {
        Self {
            width: mm_to_points(210.0),
            height: mm_to_points(297.0),
            margin_top: margin,
            margin_bottom: margin,
            margin_left: margin,
            margin_right: margin,
        }
    }

    /// US Letter page (8.5 x 11 in) with 1-inch margins. Word's factory
    /// default, used when a document declares no page geometry at all.
    pub fn letter() -> Self {
        Self {
            width: 612.0,
            height: 792.0,
            margin_top: 72.0,
            margin_bottom: 72.0,
            margin_left: 72.0,
            margin_right: 72.0,
        }
    }

    /// Horizontal space available to text.
    pub fn content_width(&self) -> f32 {
        (self.width - self.margin_left - self.margin_right).max(0.0)
    }

    /// Vertical space available to text.
    pub fn content_height(&self) -> f32 {
        (self.height - self.margin_top - self.margin_bottom).max(0.0)
    }

    /// The four margins as (side name, value) pairs.
    pub fn margins(&self) -> [(&'static str, f32); 4] {
        [
            ("top", self.margin_top),
            ("bottom", self.margin_bottom),
            ("left", self.margin_left),
            ("right", self.margin_right),
        ]
    }
}

impl Default for PageSetup {
    fn default() -> Self {
        Self::letter()
    }
}

/// Core document properties from `docProps/core.xml`.
///
/// Informational only; no rule consumes these, but hosts display them
/// alongside the validation checklist.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document creator
    pub creator: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Keywords
    pub keywords: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Last modification date
    pub modified: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Run;

    #[test]
    fn test_document_new() {
        let doc = Document::new();
        assert!(doc.is_empty());
        assert_eq!(doc.paragraph_count(), 0);
    }

    #[test]
    fn test_non_empty_paragraphs_keep_indices() {
        let mut doc = Document::new();
        doc.paragraphs.push(Paragraph::with_text("title"));
        doc.paragraphs.push(Paragraph::new());
        doc.paragraphs.push(Paragraph::with_text("body"));

        let indexed: Vec<usize> = doc.non_empty_paragraphs().map(|(i, _)| i).collect();
        assert_eq!(indexed, vec![0, 2]);
    }

    #[test]
    fn test_content_box() {
        let setup = PageSetup::a4(mm_to_points(20.0));
        assert!((setup.width - 595.28).abs() < 0.1);
        assert!((setup.height - 841.89).abs() < 0.1);
        assert!((setup.content_width() - (595.28 - 2.0 * 56.69)).abs() < 0.1);
        assert!((setup.content_height() - (841.89 - 2.0 * 56.69)).abs() < 0.1);
    }

    #[test]
    fn test_degenerate_margins_clamp() {
        let mut setup = PageSetup::letter();
        setup.margin_left = 400.0;
        setup.margin_right = 400.0;
        assert_eq!(setup.content_width(), 0.0);
    }

    #[test]
    fn test_plain_text_joins_paragraphs() {
        let mut doc = Document::new();
        let mut p = Paragraph::new();
        p.add_run(Run::new("a"));
        doc.paragraphs.push(p);
        doc.paragraphs.push(Paragraph::with_text("b"));
        assert_eq!(doc.plain_text(), "a\nb");
    }
}
