//! Running header/footer rule.

use super::{Rule, RuleContext};
use crate::report::Diagnostic;

/// Rule id for running header/footer diagnostics.
pub const HEADER_FOOTER: &str = "header-footer";

/// The submission template forbids running headers and footers; any
/// header or footer part carrying visible text is an error.
pub struct HeaderFooterRule;

impl Rule for HeaderFooterRule {
    fn id(&self) -> &'static str {
        HEADER_FOOTER
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        if has_text(&ctx.document.header_texts) {
            diagnostics.push(Diagnostic::error(
                HEADER_FOOTER,
                "running headers must be empty",
            ));
        }
        if has_text(&ctx.document.footer_texts) {
            diagnostics.push(Diagnostic::error(
                HEADER_FOOTER,
                "running footers must be empty",
            ));
        }

        diagnostics
    }
}

fn has_text(parts: &[String]) -> bool {
    parts.iter().any(|t| !t.trim().is_empty())
}
