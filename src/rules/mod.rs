//! Layout rule engine.
//!
//! Each rule is an independent value behind a single-capability trait:
//! given the resolved document, produce diagnostics. Rules are stored in
//! an ordered [`RuleSet`] and every rule always runs; diagnostics from
//! one rule never suppress another's.

mod body;
mod captions;
mod font;
mod geometry;
mod header;
mod header_footer;
mod literature;
mod page_count;
mod profile;

pub use body::BodyFormatRule;
pub use captions::CaptionsRule;
pub use font::FontRule;
pub use geometry::PageGeometryRule;
pub use header::{HeaderBlockRule, HeaderFormatRule};
pub use header_footer::HeaderFooterRule;
pub use literature::LiteratureRule;
pub use page_count::PageCountRule;
pub use profile::ValidationProfile;

use unicode_normalization::UnicodeNormalization;

use crate::model::Document;
use crate::report::Diagnostic;
use crate::resolve::ResolvedDocument;

/// Everything a rule may inspect. Borrowed for one validation run.
pub struct RuleContext<'a> {
    /// The parsed document model
    pub document: &'a Document,

    /// The cascade-free formatting view
    pub resolved: &'a ResolvedDocument,

    /// Output of the pagination estimator
    pub page_estimate: u32,

    /// Required values and tolerances
    pub profile: &'a ValidationProfile,
}

/// A single validation rule.
pub trait Rule {
    /// Stable identifier used in diagnostics.
    fn id(&self) -> &'static str;

    /// Inspect the document and produce zero or more diagnostics.
    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic>;
}

/// An ordered collection of rules.
pub struct RuleSet {
    rules: Vec<Box<dyn Rule>>,
}

impl RuleSet {
    /// Create an empty rule set.
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// The full battery in report order.
    pub fn standard() -> Self {
        let mut set = Self::new();
        set.register(Box::new(PageGeometryRule));
        set.register(Box::new(FontRule));
        set.register(Box::new(HeaderBlockRule));
        set.register(Box::new(HeaderFormatRule));
        set.register(Box::new(HeaderFooterRule));
        set.register(Box::new(BodyFormatRule));
        set.register(Box::new(LiteratureRule));
        set.register(Box::new(CaptionsRule));
        set.register(Box::new(PageCountRule));
        set
    }

    /// Append a rule.
    pub fn register(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Number of registered rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the set is empty.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule to completion and collect all diagnostics.
    pub fn run(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        self.rules.iter().flat_map(|rule| rule.check(ctx)).collect()
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

/// Tolerance comparison used by every geometry-flavored check.
pub(crate) fn within(value: f32, target: f32, tolerance: f32) -> bool {
    (value - target).abs() <= tolerance
}

/// Case-insensitive, trimmed, NFC-normalized text comparison for
/// section-heading markers.
pub(crate) fn matches_marker(text: &str, marker: &str) -> bool {
    normalize(text) == normalize(marker)
}

fn normalize(s: &str) -> String {
    s.trim().nfc().collect::<String>().to_lowercase()
}
