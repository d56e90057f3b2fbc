//! Body formatting rule: alignment, line spacing and first-line indent.

use super::{matches_marker, within, Rule, RuleContext};
use crate::model::LineSpacing;
use crate::report::Diagnostic;
use crate::resolve::ResolvedParagraph;

/// Rule id for body-format diagnostics.
pub const BODY_FORMAT: &str = "body-format";

/// Checks the body paragraphs (everything after the three header lines,
/// up to the literature section) against the required alignment,
/// line-spacing multiplier and first-line indent. Violations are
/// warnings; they do not fail the document.
///
/// Only the leading `body_sample` paragraphs are inspected, so a
/// pathological document cannot flood the report.
pub struct BodyFormatRule;

impl Rule for BodyFormatRule {
    fn id(&self) -> &'static str {
        BODY_FORMAT
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let profile = ctx.profile;
        let body: Vec<&ResolvedParagraph> = ctx
            .resolved
            .non_empty_paragraphs()
            .skip(3)
            .take_while(|p| !matches_marker(&p.text(), &profile.literature_marker))
            .take(profile.body_sample)
            .collect();

        let mut diagnostics = Vec::new();
        for paragraph in body {
            if paragraph.alignment != profile.body_alignment {
                diagnostics.push(
                    Diagnostic::warning(
                        BODY_FORMAT,
                        format!(
                            "paragraph alignment is {:?}, expected {:?}",
                            paragraph.alignment, profile.body_alignment
                        ),
                    )
                    .at_paragraph(paragraph.index),
                );
            }

            match paragraph.line_spacing {
                LineSpacing::Multiple(m) => {
                    if !within(m, profile.line_spacing, profile.line_spacing_tolerance) {
                        diagnostics.push(
                            Diagnostic::warning(
                                BODY_FORMAT,
                                format!(
                                    "line spacing {m:.2} differs from required {:.2}",
                                    profile.line_spacing
                                ),
                            )
                            .at_paragraph(paragraph.index),
                        );
                    }
                }
                LineSpacing::Exact(points) => {
                    diagnostics.push(
                        Diagnostic::warning(
                            BODY_FORMAT,
                            format!(
                                "line spacing is an absolute {points:.1} pt; expected the \
                                 {:.2} multiplier",
                                profile.line_spacing
                            ),
                        )
                        .at_paragraph(paragraph.index),
                    );
                }
            }

            if !within(
                paragraph.first_line_indent,
                profile.first_line_indent,
                profile.indent_tolerance,
            ) {
                diagnostics.push(
                    Diagnostic::warning(
                        BODY_FORMAT,
                        format!(
                            "first-line indent {:.1} pt differs from required {:.1} pt",
                            paragraph.first_line_indent, profile.first_line_indent
                        ),
                    )
                    .at_paragraph(paragraph.index),
                );
            }
        }

        diagnostics
    }
}
