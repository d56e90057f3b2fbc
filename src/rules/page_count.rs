//! Length rule: estimated page count within the allowed range.

use super::{Rule, RuleContext};
use crate::report::Diagnostic;

/// Rule id for page-count diagnostics.
pub const PAGE_COUNT: &str = "page-count";

/// The pagination estimate must fall inside the profile's inclusive
/// page range. An empty document estimates to zero pages and fails here
/// rather than being treated as a valid one-page document.
pub struct PageCountRule;

impl Rule for PageCountRule {
    fn id(&self) -> &'static str {
        PAGE_COUNT
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let profile = ctx.profile;
        let estimate = ctx.page_estimate;

        if estimate < profile.min_pages || estimate > profile.max_pages {
            return vec![Diagnostic::error(
                PAGE_COUNT,
                format!(
                    "estimated page count {estimate} is outside the required range \
                     {}..={}",
                    profile.min_pages, profile.max_pages
                ),
            )];
        }

        Vec::new()
    }
}
