//! Style cascade resolution.
//!
//! Flattens every run's and paragraph's formatting into concrete values:
//! direct override → referenced style → the style's `basedOn` chain
//! (closest ancestor wins) → document defaults. Style chains are walked
//! with cycle detection; a cyclic style resolves to document defaults
//! and contributes one `error` diagnostic, without aborting the pipeline.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::model::{Alignment, Document, LineSpacing, StyleCatalogue};
use crate::report::Diagnostic;

/// Rule id attached to style-cycle diagnostics.
pub const STYLE_CYCLE: &str = "style-cycle";

/// A run after cascading resolution: no remaining references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedRun {
    /// The run's text content
    pub text: String,

    /// Effective font family
    pub font_family: String,

    /// Effective font size in points
    pub font_size: f32,

    /// Effective bold
    pub bold: bool,

    /// Effective italic
    pub italic: bool,
}

impl ResolvedRun {
    /// Whether the run has no visible text.
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// A paragraph with concrete formatting and its resolved runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolvedParagraph {
    /// Document-order index of the source paragraph
    pub index: usize,

    /// Effective alignment
    pub alignment: Alignment,

    /// Effective line spacing
    pub line_spacing: LineSpacing,

    /// Effective first-line indent in points
    pub first_line_indent: f32,

    /// Space before the paragraph in points
    pub space_before: f32,

    /// Space after the paragraph in points
    pub space_after: f32,

    /// Resolved runs, one per source run, in order
    pub runs: Vec<ResolvedRun>,
}

impl ResolvedParagraph {
    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    /// Whether the paragraph has no visible text.
    pub fn is_empty(&self) -> bool {
        self.runs.iter().all(ResolvedRun::is_empty)
    }
}

/// The whole document after resolution, preserving document order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResolvedDocument {
    /// One entry per source paragraph
    pub paragraphs: Vec<ResolvedParagraph>,
}

impl ResolvedDocument {
    /// Resolved paragraphs with visible text.
    pub fn non_empty_paragraphs(&self) -> impl Iterator<Item = &ResolvedParagraph> {
        self.paragraphs.iter().filter(|p| !p.is_empty())
    }
}

/// Result of resolving a document: the flattened formatting plus any
/// diagnostics raised while walking style chains.
#[derive(Debug, Default)]
pub struct Resolution {
    /// The resolved document
    pub document: ResolvedDocument,

    /// Style-cycle diagnostics, one per offending style
    pub diagnostics: Vec<Diagnostic>,
}

/// A style with its inheritance chain folded in.
#[derive(Debug, Clone, Default)]
struct FlatStyle {
    font_family: Option<String>,
    font_size: Option<f32>,
    bold: Option<bool>,
    italic: Option<bool>,
    alignment: Option<Alignment>,
    line_spacing: Option<LineSpacing>,
    first_line_indent: Option<f32>,
}

impl FlatStyle {
    /// Fold a definition under the already-accumulated values: fields
    /// set closer to the leaf win.
    fn absorb(&mut self, style: &crate::model::StyleDefinition) {
        if self.font_family.is_none() {
            self.font_family = style.font_family.clone();
        }
        if self.font_size.is_none() {
            self.font_size = style.font_size;
        }
        if self.bold.is_none() {
            self.bold = style.bold;
        }
        if self.italic.is_none() {
            self.italic = style.italic;
        }
        if self.alignment.is_none() {
            self.alignment = style.alignment;
        }
        if self.line_spacing.is_none() {
            self.line_spacing = style.line_spacing;
        }
        if self.first_line_indent.is_none() {
            self.first_line_indent = style.first_line_indent;
        }
    }
}

/// Flatten every catalogue style. Returns the flattened map plus the ids
/// whose chains hit a cycle; those resolve as all-defaults.
fn flatten_catalogue(catalogue: &StyleCatalogue) -> (HashMap<String, FlatStyle>, Vec<String>) {
    let mut flat = HashMap::with_capacity(catalogue.styles.len());
    let mut cyclic = Vec::new();

    let mut ids: Vec<&String> = catalogue.styles.keys().collect();
    ids.sort_unstable();

    for id in ids {
        let mut acc = FlatStyle::default();
        let mut visited = HashSet::new();
        let mut cursor = Some(id.as_str());
        let mut is_cyclic = false;

        while let Some(current) = cursor {
            if !visited.insert(current) {
                is_cyclic = true;
                break;
            }
            // Dangling parent references terminate the chain.
            let Some(style) = catalogue.get(current) else {
                break;
            };
            acc.absorb(style);
            cursor = style.based_on.as_deref();
        }

        if is_cyclic {
            cyclic.push(id.clone());
            flat.insert(id.clone(), FlatStyle::default());
        } else {
            flat.insert(id.clone(), acc);
        }
    }

    (flat, cyclic)
}

/// Resolve the whole document's formatting.
pub fn resolve(document: &Document) -> Resolution {
    let defaults = &document.styles.defaults;
    let (flat, cyclic) = flatten_catalogue(&document.styles);

    let diagnostics = cyclic
        .iter()
        .map(|id| {
            Diagnostic::error(
                STYLE_CYCLE,
                format!("style '{id}' has a cyclic inheritance chain; document defaults applied"),
            )
        })
        .collect();

    let empty = FlatStyle::default();
    let mut paragraphs = Vec::with_capacity(document.paragraphs.len());

    for (index, paragraph) in document.paragraphs.iter().enumerate() {
        // Dangling references fall back to direct formatting only.
        let para_style = paragraph
            .style_id
            .as_deref()
            .and_then(|id| flat.get(id))
            .unwrap_or(&empty);

        let alignment = paragraph
            .alignment
            .or(para_style.alignment)
            .unwrap_or(defaults.alignment);
        let line_spacing = paragraph
            .line_spacing
            .or(para_style.line_spacing)
            .unwrap_or(defaults.line_spacing);
        let first_line_indent = paragraph
            .first_line_indent
            .or(para_style.first_line_indent)
            .unwrap_or(defaults.first_line_indent);

        let runs = paragraph
            .runs
            .iter()
            .map(|run| {
                let run_style = run
                    .style_id
                    .as_deref()
                    .and_then(|id| flat.get(id))
                    .unwrap_or(&empty);

                ResolvedRun {
                    text: run.text.clone(),
                    font_family: run
                        .properties
                        .font_family
                        .clone()
                        .or_else(|| run_style.font_family.clone())
                        .or_else(|| para_style.font_family.clone())
                        .unwrap_or_else(|| defaults.font_family.clone()),
                    font_size: run
                        .properties
                        .font_size
                        .or(run_style.font_size)
                        .or(para_style.font_size)
                        .unwrap_or(defaults.font_size),
                    bold: run
                        .properties
                        .bold
                        .or(run_style.bold)
                        .or(para_style.bold)
                        .unwrap_or(false),
                    italic: run
                        .properties
                        .italic
                        .or(run_style.italic)
                        .or(para_style.italic)
                        .unwrap_or(false),
                }
            })
            .collect();

        paragraphs.push(ResolvedParagraph {
            index,
            alignment,
            line_spacing,
            first_line_indent,
            space_before: paragraph.space_before.unwrap_or(0.0),
            space_after: paragraph.space_after.unwrap_or(0.0),
            runs,
        });
    }

    Resolution {
        document: ResolvedDocument { paragraphs },
        diagnostics,
    }
}
