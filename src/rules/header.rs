//! Header block rules: presence and formatting of the title, authors
//! and organization lines.

use regex::Regex;

use super::{Rule, RuleContext};
use crate::model::Alignment;
use crate::report::Diagnostic;
use crate::resolve::ResolvedParagraph;

/// Rule id for header-presence diagnostics.
pub const HEADER_BLOCK: &str = "header-block";
/// Rule id for header-formatting diagnostics.
pub const HEADER_FORMAT: &str = "header-format";

/// Surname followed by two initials, Cyrillic or Latin,
/// e.g. «Петренко І. П.» or "Smith J. R.".
const INITIALS_PATTERN: &str =
    r"[A-Za-zА-ЯІЇЄҐа-яіїєґ’\-]+\s+[A-ZА-ЯІЇЄҐ]\.\s*[A-ZА-ЯІЇЄҐ]\.";

/// The first three non-empty paragraphs must exist: title, authors and
/// organization lines are identified by position and non-emptiness, not
/// by style.
pub struct HeaderBlockRule;

impl Rule for HeaderBlockRule {
    fn id(&self) -> &'static str {
        HEADER_BLOCK
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let found = ctx.resolved.non_empty_paragraphs().take(3).count();
        if found < 3 {
            return vec![Diagnostic::error(
                HEADER_BLOCK,
                format!(
                    "header block incomplete: expected title, authors and organization \
                     lines, found {found} non-empty paragraph(s)"
                ),
            )];
        }
        Vec::new()
    }
}

/// Formatting of the header lines: uppercase title, centering, weight,
/// italic authors, and the authors-list heuristics.
pub struct HeaderFormatRule;

impl Rule for HeaderFormatRule {
    fn id(&self) -> &'static str {
        HEADER_FORMAT
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let header: Vec<&ResolvedParagraph> = ctx.resolved.non_empty_paragraphs().take(3).collect();
        let [title, authors, organization] = header.as_slice() else {
            // Presence is HeaderBlockRule's finding.
            return Vec::new();
        };
        let profile = ctx.profile;
        let mut diagnostics = Vec::new();

        if profile.require_title_uppercase {
            let text = title.text();
            let text = text.trim();
            if text.chars().any(char::is_alphabetic) && text != text.to_uppercase() {
                diagnostics.push(
                    Diagnostic::error(HEADER_FORMAT, "title must be in uppercase")
                        .at_paragraph(title.index),
                );
            }
        }

        let labeled = [
            ("title", title),
            ("authors", authors),
            ("organization", organization),
        ];

        if profile.require_header_centered {
            for (label, paragraph) in &labeled {
                if paragraph.alignment != Alignment::Center {
                    diagnostics.push(
                        Diagnostic::error(HEADER_FORMAT, format!("{label} line must be centered"))
                            .at_paragraph(paragraph.index),
                    );
                }
            }
        }

        if profile.require_header_bold {
            for (label, paragraph) in &labeled {
                if paragraph.runs.iter().any(|r| !r.is_empty() && !r.bold) {
                    diagnostics.push(
                        Diagnostic::error(HEADER_FORMAT, format!("{label} line must be bold"))
                            .at_paragraph(paragraph.index),
                    );
                }
            }
        }

        if profile.require_authors_italic
            && authors.runs.iter().any(|r| !r.is_empty() && !r.italic)
        {
            diagnostics.push(
                Diagnostic::error(HEADER_FORMAT, "authors line must be italic")
                    .at_paragraph(authors.index),
            );
        }

        let authors_text = authors.text();
        if !authors_text.contains(',') {
            diagnostics.push(
                Diagnostic::warning(
                    HEADER_FORMAT,
                    "authors are usually listed separated by commas",
                )
                .at_paragraph(authors.index),
            );
        }
        if let Ok(re) = Regex::new(INITIALS_PATTERN) {
            if !re.is_match(&authors_text) {
                diagnostics.push(
                    Diagnostic::warning(
                        HEADER_FORMAT,
                        "authors line does not look like 'Surname I. P.' (initials after surname)",
                    )
                    .at_paragraph(authors.index),
                );
            }
        }

        diagnostics
    }
}
