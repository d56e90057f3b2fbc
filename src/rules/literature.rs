//! Literature section rule.

use regex::Regex;

use super::{matches_marker, Rule, RuleContext};
use crate::report::Diagnostic;
use crate::resolve::ResolvedParagraph;

/// Rule id for literature diagnostics.
pub const LITERATURE: &str = "literature";

/// Numbered reference item, e.g. «1. Кнут Д. ...».
const ITEM_PATTERN: &str = r"^\s*\d+\.";

/// How many paragraphs after the marker are searched for numbered items.
const ITEM_LOOKAHEAD: usize = 5;

/// The document must contain a literature section heading; its absence
/// is an error. When present, the heading should sit in the trailing
/// part of the document and be followed by numbered items (warnings).
pub struct LiteratureRule;

impl Rule for LiteratureRule {
    fn id(&self) -> &'static str {
        LITERATURE
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let marker = &ctx.profile.literature_marker;
        let paragraphs: Vec<&ResolvedParagraph> = ctx.resolved.non_empty_paragraphs().collect();

        let Some(position) = paragraphs
            .iter()
            .position(|p| matches_marker(&p.text(), marker))
        else {
            return vec![Diagnostic::error(
                LITERATURE,
                format!("literature section «{marker}» is missing"),
            )];
        };

        let mut diagnostics = Vec::new();
        let heading = paragraphs[position];

        if (position as f32) < paragraphs.len() as f32 * 0.6 {
            diagnostics.push(
                Diagnostic::warning(
                    LITERATURE,
                    format!("literature section «{marker}» should be near the end of the document"),
                )
                .at_paragraph(heading.index),
            );
        }

        let has_item = match Regex::new(ITEM_PATTERN) {
            Ok(re) => paragraphs[position + 1..]
                .iter()
                .take(ITEM_LOOKAHEAD)
                .any(|p| re.is_match(p.text().trim())),
            Err(_) => true,
        };
        if !has_item {
            diagnostics.push(
                Diagnostic::warning(
                    LITERATURE,
                    "literature items usually start with «1.» and count upward",
                )
                .at_paragraph(heading.index),
            );
        }

        diagnostics
    }
}
