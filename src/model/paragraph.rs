//! Paragraph and run-level types.

use serde::{Deserialize, Serialize};

use super::PageSetup;

/// A paragraph: ordered runs plus paragraph-level formatting.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Paragraph {
    /// Text runs in document order
    pub runs: Vec<Run>,

    /// Referenced paragraph style, if any
    pub style_id: Option<String>,

    /// Direct alignment override
    pub alignment: Option<Alignment>,

    /// Direct line-spacing override
    pub line_spacing: Option<LineSpacing>,

    /// Direct first-line indent override, in points
    pub first_line_indent: Option<f32>,

    /// Space before the paragraph, in points
    pub space_before: Option<f32>,

    /// Space after the paragraph, in points
    pub space_after: Option<f32>,

    /// Set when this paragraph carries a section break: the new page
    /// geometry governing subsequent content
    pub section_break: Option<PageSetup>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a paragraph holding a single plain-text run.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.runs.push(Run::new(text));
        p
    }

    /// Add a run to the paragraph.
    pub fn add_run(&mut self, run: Run) {
        self.runs.push(run);
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }

    /// Whether this paragraph carries a section break.
    pub fn is_section_break(&self) -> bool {
        self.section_break.is_some()
    }
}

/// A contiguous span of text sharing one formatting context.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Run {
    /// The text content (may be empty or whitespace-only)
    pub text: String,

    /// Direct formatting overrides
    pub properties: RunProperties,

    /// Referenced character style, if any
    pub style_id: Option<String>,
}

impl Run {
    /// Create a run with plain text and no direct formatting.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            properties: RunProperties::default(),
            style_id: None,
        }
    }

    /// Whether the run has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Direct run-level formatting. Absent values cascade through the
/// referenced style chain down to document defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunProperties {
    /// Font family name
    pub font_family: Option<String>,

    /// Font size in points
    pub font_size: Option<f32>,

    /// Bold
    pub bold: Option<bool>,

    /// Italic
    pub italic: Option<bool>,
}

impl RunProperties {
    /// Whether any direct formatting is present.
    pub fn is_plain(&self) -> bool {
        self.font_family.is_none()
            && self.font_size.is_none()
            && self.bold.is_none()
            && self.italic.is_none()
    }
}

/// Paragraph text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left alignment (default)
    #[default]
    Left,
    /// Center alignment
    Center,
    /// Right alignment
    Right,
    /// Justified alignment
    Justify,
}

impl Alignment {
    /// Parse a WordprocessingML `w:jc` value.
    pub fn from_wml(value: &str) -> Option<Self> {
        match value {
            "left" | "start" => Some(Alignment::Left),
            "center" => Some(Alignment::Center),
            "right" | "end" => Some(Alignment::Right),
            "both" | "justify" | "distribute" => Some(Alignment::Justify),
            _ => None,
        }
    }
}

/// Line spacing as stored on a paragraph or style.
///
/// The underlying format stores either a multiplier (`w:lineRule="auto"`,
/// value in 240ths) or an absolute extent (`exact`/`atLeast`, value in
/// twips). Both survive into the model; the original template asks for a
/// multiplier, so the body rule flags absolute spacing separately.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum LineSpacing {
    /// Multiple of the single-spaced line height (1.0 = single)
    Multiple(f32),
    /// Absolute line extent in points
    Exact(f32),
}

impl Default for LineSpacing {
    fn default() -> Self {
        LineSpacing::Multiple(1.0)
    }
}

impl LineSpacing {
    /// The multiplier, if this is relative spacing.
    pub fn multiplier(&self) -> Option<f32> {
        match self {
            LineSpacing::Multiple(m) => Some(*m),
            LineSpacing::Exact(_) => None,
        }
    }
}
