//! Page geometry rule: page size and margins.

use super::{within, Rule, RuleContext};
use crate::model::PageSetup;
use crate::report::Diagnostic;

/// Rule id for page-geometry diagnostics.
pub const PAGE_GEOMETRY: &str = "page-geometry";

/// Checks every section's page size and margins against the profile,
/// within the configured tolerances.
pub struct PageGeometryRule;

impl Rule for PageGeometryRule {
    fn id(&self) -> &'static str {
        PAGE_GEOMETRY
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        check_section(ctx, &ctx.document.page_setup, None, &mut diagnostics);
        for (index, paragraph) in ctx.document.paragraphs.iter().enumerate() {
            if let Some(setup) = &paragraph.section_break {
                check_section(ctx, setup, Some(index), &mut diagnostics);
            }
        }

        diagnostics
    }
}

fn check_section(
    ctx: &RuleContext,
    setup: &PageSetup,
    paragraph_index: Option<usize>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    let profile = ctx.profile;

    let size_ok = within(setup.width, profile.page_width, profile.page_size_tolerance)
        && within(setup.height, profile.page_height, profile.page_size_tolerance);
    if !size_ok {
        let mut diagnostic = Diagnostic::error(
            PAGE_GEOMETRY,
            format!(
                "page size {:.0}x{:.0} pt differs from required {:.0}x{:.0} pt",
                setup.width, setup.height, profile.page_width, profile.page_height
            ),
        );
        if let Some(index) = paragraph_index {
            diagnostic = diagnostic.at_paragraph(index);
        }
        diagnostics.push(diagnostic);
    }

    for (side, value) in setup.margins() {
        if !within(value, profile.margin, profile.margin_tolerance) {
            let mut diagnostic = Diagnostic::error(
                PAGE_GEOMETRY,
                format!(
                    "{side} margin {:.1} pt differs from required {:.1} pt",
                    value, profile.margin
                ),
            );
            if let Some(index) = paragraph_index {
                diagnostic = diagnostic.at_paragraph(index);
            }
            diagnostics.push(diagnostic);
        }
    }
}
