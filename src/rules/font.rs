//! Font rule: every run's family and size.

use super::{captions::is_caption, within, Rule, RuleContext};
use crate::report::Diagnostic;

/// Rule id for font diagnostics.
pub const FONT: &str = "font";

/// Checks that every resolved run uses the required font family and
/// size. Caption paragraphs are exempt here; they have their own
/// required size and are covered by the captions rule.
pub struct FontRule;

impl Rule for FontRule {
    fn id(&self) -> &'static str {
        FONT
    }

    fn check(&self, ctx: &RuleContext) -> Vec<Diagnostic> {
        let profile = ctx.profile;
        let mut diagnostics = Vec::new();

        for paragraph in ctx.resolved.non_empty_paragraphs() {
            if is_caption(&paragraph.text()) {
                continue;
            }

            let mut wrong_family: Option<&str> = None;
            let mut wrong_size: Option<f32> = None;
            for run in paragraph.runs.iter().filter(|r| !r.is_empty()) {
                if run.font_family != profile.font_family {
                    wrong_family.get_or_insert(&run.font_family);
                }
                if !within(run.font_size, profile.font_size, profile.font_size_tolerance) {
                    wrong_size.get_or_insert(run.font_size);
                }
            }

            if let Some(found) = wrong_family {
                diagnostics.push(
                    Diagnostic::error(
                        FONT,
                        format!(
                            "font family '{found}' differs from required '{}'",
                            profile.font_family
                        ),
                    )
                    .at_paragraph(paragraph.index),
                );
            }
            if let Some(found) = wrong_size {
                diagnostics.push(
                    Diagnostic::error(
                        FONT,
                        format!(
                            "font size {found:.1} pt differs from required {:.1} pt",
                            profile.font_size
                        ),
                    )
                    .at_paragraph(paragraph.index),
                );
            }
        }

        diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Document, Paragraph, Run};
    use crate::resolve::resolve;
    use crate::rules::ValidationProfile;

    fn run_with_font(text: &str, family: &str, size: f32) -> Paragraph {
        let mut p = Paragraph::new();
        let mut run = Run::new(text);
        run.properties.font_family = Some(family.to_string());
        run.properties.font_size = Some(size);
        p.add_run(run);
        p
    }

    fn run_rule(doc: &Document) -> Vec<Diagnostic> {
        let profile = ValidationProfile::default();
        let resolution = resolve(doc);
        let ctx = RuleContext {
            document: doc,
            resolved: &resolution.document,
            page_estimate: 1,
            profile: &profile,
        };
        FontRule.check(&ctx)
    }

    #[test]
    fn test_conformant_font_is_silent() {
        let mut doc = Document::new();
        doc.paragraphs
            .push(run_with_font("text", "Times New Roman", 14.0));
        assert!(run_rule(&doc).is_empty());
    }

    #[test]
    fn test_size_within_tolerance_passes() {
        let mut doc = Document::new();
        doc.paragraphs
            .push(run_with_font("text", "Times New Roman", 14.4));
        assert!(run_rule(&doc).is_empty());
    }

    #[test]
    fn test_wrong_family_and_size_one_diagnostic_each() {
        let mut doc = Document::new();
        let mut p = run_with_font("first ", "Arial", 12.0);
        let mut second = Run::new("second");
        second.properties.font_family = Some("Arial".to_string());
        second.properties.font_size = Some(10.0);
        p.add_run(second);
        doc.paragraphs.push(p);

        let diagnostics = run_rule(&doc);
        // Flags collapse per paragraph: one family + one size error.
        assert_eq!(diagnostics.len(), 2);
        assert!(diagnostics.iter().all(|d| d.is_error()));
        assert!(diagnostics.iter().all(|d| d.paragraph_index == Some(0)));
    }

    #[test]
    fn test_empty_runs_are_ignored() {
        let mut doc = Document::new();
        let mut p = run_with_font("text", "Times New Roman", 14.0);
        p.add_run(run_with_font("  ", "Wingdings", 8.0).runs.remove(0));
        doc.paragraphs.push(p);
        assert!(run_rule(&doc).is_empty());
    }

    #[test]
    fn test_caption_paragraphs_are_exempt() {
        let mut doc = Document::new();
        doc.paragraphs
            .push(run_with_font("Рис. 1. Схема алгоритму", "Times New Roman", 12.0));
        assert!(run_rule(&doc).is_empty());
    }
}
