//! Caption rule: figure and table captions at caption size.

use regex::Regex;

use super::{within, Rule, RuleContext};
use crate::report::Diagnostic;

/// Rule id for caption diagnostics.
pub const CAPTIONS: &str = "captions";

/// «Рис. 1 ...» or «Таблиця 2 ...» at the start of a paragraph.
const CAPTION_PATTERN: &str = r"^(?:Рис\.\s*\d+|Таблиця\s*\d+)";

/// Whether a paragraph's text is a figure/table caption.
pub(crate) fn is_caption(text: &str) -> bool {
    Regex::new(CAPTION_PATTERN)
        .map(|re| re.is_match(text.trim()))
        .unwrap_or(false)
}

/// Caption paragraphs should use the caption font size; mismatches are
/// reported as warnings, one per caption paragraph.
pub struct CaptionsRule;

impl Rule for CaptionsRule {
    fn id(&self) -> &'static str {
        CAPTIONS
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let profile = ctx.profile;
        let mut diagnostics = Vec::new();

        for paragraph in ctx.resolved.non_empty_paragraphs() {
            if !is_caption(&paragraph.text()) {
                continue;
            }
            let offending = paragraph.runs.iter().find(|r| {
                !r.is_empty()
                    && !within(
                        r.font_size,
                        profile.caption_font_size,
                        profile.font_size_tolerance,
                    )
            });
            if let Some(run) = offending {
                diagnostics.push(
                    Diagnostic::warning(
                        CAPTIONS,
                        format!(
                            "caption font size {:.1} pt differs from required {:.1} pt",
                            run.font_size, profile.caption_font_size
                        ),
                    )
                    .at_paragraph(paragraph.index),
                );
            }
        }

        diagnostics
    }
}
