//! Style catalogue types.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{Alignment, LineSpacing};

/// A named style definition from `word/styles.xml`.
///
/// Styles form a single-inheritance chain through `based_on`. The chain
/// is walked (with cycle detection) by the resolver, not here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleDefinition {
    /// Style identifier
    pub id: String,

    /// Parent style identifier
    pub based_on: Option<String>,

    /// Font family name
    pub font_family: Option<String>,

    /// Font size in points
    pub font_size: Option<f32>,

    /// Bold
    pub bold: Option<bool>,

    /// Italic
    pub italic: Option<bool>,

    /// Paragraph alignment
    pub alignment: Option<Alignment>,

    /// Line spacing
    pub line_spacing: Option<LineSpacing>,

    /// First-line indent in points
    pub first_line_indent: Option<f32>,
}

impl StyleDefinition {
    /// Create an empty definition with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }
}

/// Document-wide formatting defaults.
///
/// Populated from `docDefaults` in the styles part when present;
/// otherwise Word's factory defaults apply, so an unstyled document is
/// judged against what a layout engine would actually render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentDefaults {
    /// Default font family
    pub font_family: String,

    /// Default font size in points
    pub font_size: f32,

    /// Default paragraph alignment
    pub alignment: Alignment,

    /// Default line spacing
    pub line_spacing: LineSpacing,

    /// Default first-line indent in points
    pub first_line_indent: f32,
}

impl Default for DocumentDefaults {
    fn default() -> Self {
        Self {
            font_family: "Calibri".to_string(),
            font_size: 11.0,
            alignment: Alignment::Left,
            line_spacing: LineSpacing::Multiple(1.0),
            first_line_indent: 0.0,
        }
    }
}

/// The style catalogue: id → definition, plus document defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StyleCatalogue {
    /// Style definitions keyed by id
    pub styles: HashMap<String, StyleDefinition>,

    /// Document-wide defaults
    pub defaults: DocumentDefaults,
}

impl StyleCatalogue {
    /// Create an empty catalogue with factory defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a style by id.
    pub fn get(&self, id: &str) -> Option<&StyleDefinition> {
        self.styles.get(id)
    }

    /// Insert a style definition, replacing any previous one with the
    /// same id.
    pub fn insert(&mut self, style: StyleDefinition) {
        self.styles.insert(style.id.clone(), style);
    }

    /// Number of style definitions.
    pub fn len(&self) -> usize {
        self.styles.len()
    }

    /// Whether the catalogue has no definitions.
    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }
}
