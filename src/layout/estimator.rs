//! Greedy line wrapping and page accumulation.

use super::FontMetrics;
use crate::model::Document;
use crate::resolve::{ResolvedDocument, ResolvedParagraph};

/// Estimates rendered page count from the resolved document.
#[derive(Debug, Clone, Default)]
pub struct PageEstimator {
    metrics: FontMetrics,
}

/// A word with its approximate width, plus the width of the space that
/// precedes it when it is not the first word on a line.
#[derive(Debug)]
struct MeasuredWord {
    width: f32,
    space_width: f32,
}

impl PageEstimator {
    /// Create an estimator with the given metrics.
    pub fn new(metrics: FontMetrics) -> Self {
        Self { metrics }
    }

    /// The metrics in use.
    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    /// Estimate the number of rendered pages.
    ///
    /// Returns 0 for a document with no visible text. Otherwise the
    /// estimate is at least 1, and every paragraph advances the cursor,
    /// so an oversized paragraph spans pages instead of looping.
    pub fn estimate(&self, document: &Document, resolved: &ResolvedDocument) -> u32 {
        if document.is_empty() {
            return 0;
        }

        let mut page_setup = document.page_setup;
        let mut pages: u32 = 1;
        let mut cursor: f32 = 0.0;

        for resolved_para in &resolved.paragraphs {
            let Some(source) = document.paragraphs.get(resolved_para.index) else {
                continue;
            };

            if let Some(new_setup) = source.section_break {
                // A section break always starts a new page; from the top
                // of an untouched page there is nothing to break away from.
                if cursor > 0.0 {
                    pages += 1;
                    cursor = 0.0;
                }
                page_setup = new_setup;
            }

            let content_width = page_setup.content_width();
            let content_height = page_setup.content_height();
            if content_height <= 0.0 {
                continue;
            }

            let line_height = self.paragraph_line_height(resolved_para);
            let line_count = self.wrap_line_count(resolved_para, content_width);

            cursor += resolved_para.space_before;
            for _ in 0..line_count {
                if cursor > 0.0 && cursor + line_height > content_height {
                    pages += 1;
                    cursor = 0.0;
                }
                cursor += line_height;
            }
            cursor += resolved_para.space_after;
        }

        pages
    }

    /// Line height for a paragraph: the tallest run governs.
    fn paragraph_line_height(&self, paragraph: &ResolvedParagraph) -> f32 {
        let size = paragraph
            .runs
            .iter()
            .map(|r| r.font_size)
            .fold(0.0_f32, f32::max);
        let size = if size > 0.0 { size } else { 11.0 };
        self.metrics.line_height(size, &paragraph.line_spacing)
    }

    /// Number of wrapped lines the paragraph occupies at `content_width`.
    ///
    /// Greedy fit: words are measured with their run's font, the first
    /// line is narrowed by the first-line indent, and a word wider than
    /// a whole line consumes as many lines as its width requires.
    fn wrap_line_count(&self, paragraph: &ResolvedParagraph, content_width: f32) -> u32 {
        let words = self.measure_words(paragraph);
        if words.is_empty() {
            // An empty paragraph still occupies one blank line.
            return 1;
        }
        if content_width <= 0.0 {
            return words.len() as u32;
        }

        let indent = paragraph.first_line_indent.max(0.0);
        let first_width = if indent < content_width {
            content_width - indent
        } else {
            content_width
        };

        let mut lines: u32 = 1;
        let mut available = first_width;
        let mut used: f32 = 0.0;

        for word in &words {
            let needed = if used > 0.0 {
                word.space_width + word.width
            } else {
                word.width
            };

            if used + needed <= available {
                used += needed;
                continue;
            }

            // Move to the next line; later lines use the full measure.
            lines += 1;
            available = content_width;
            if word.width <= available {
                used = word.width;
            } else {
                // Oversized word: break it across full lines.
                let full_lines = (word.width / available).floor() as u32;
                let remainder = word.width - full_lines as f32 * available;
                if remainder > 0.0 {
                    lines += full_lines;
                    used = remainder;
                } else {
                    lines += full_lines.saturating_sub(1);
                    used = available;
                }
            }
        }

        lines
    }

    /// Split the paragraph's text into measured words. Each character is
    /// measured with the metrics of the run it came from; inter-word
    /// spaces take the width of the run they appear in.
    fn measure_words(&self, paragraph: &ResolvedParagraph) -> Vec<MeasuredWord> {
        let mut words = Vec::new();
        let mut current: Option<MeasuredWord> = None;
        let mut pending_space: f32 = 0.0;

        for run in &paragraph.runs {
            let char_width = self.metrics.char_width(&run.font_family, run.font_size);
            for ch in run.text.chars() {
                if ch.is_whitespace() {
                    if let Some(word) = current.take() {
                        words.push(word);
                    }
                    pending_space = char_width;
                } else {
                    let word = current.get_or_insert(MeasuredWord {
                        width: 0.0,
                        space_width: pending_space,
                    });
                    word.width += char_width;
                }
            }
        }
        if let Some(word) = current.take() {
            words.push(word);
        }

        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{mm_to_points, Alignment, LineSpacing, PageSetup, Paragraph, Run};
    use crate::resolve::resolve;

    fn a4_doc() -> Document {
        let mut doc = Document::new();
        doc.page_setup = PageSetup::a4(mm_to_points(20.0));
        doc
    }

    fn body_paragraph(text: &str) -> Paragraph {
        let mut p = Paragraph::new();
        let mut run = Run::new(text);
        run.properties.font_family = Some("Times New Roman".to_string());
        run.properties.font_size = Some(14.0);
        p.add_run(run);
        p.line_spacing = Some(LineSpacing::Multiple(1.15));
        p.alignment = Some(Alignment::Justify);
        p
    }

    fn estimate(doc: &Document) -> u32 {
        let resolution = resolve(doc);
        PageEstimator::new(FontMetrics::default()).estimate(doc, &resolution.document)
    }

    #[test]
    fn test_empty_document_is_zero_pages() {
        let doc = a4_doc();
        assert_eq!(estimate(&doc), 0);

        let mut doc = a4_doc();
        doc.paragraphs.push(Paragraph::with_text("   "));
        doc.paragraphs.push(Paragraph::new());
        assert_eq!(estimate(&doc), 0);
    }

    #[test]
    fn test_short_document_is_one_page() {
        let mut doc = a4_doc();
        doc.paragraphs.push(body_paragraph("A single short line."));
        assert_eq!(estimate(&doc), 1);
    }

    #[test]
    fn test_oversized_paragraph_spans_pages_and_terminates() {
        let mut doc = a4_doc();
        // ~50 lines/page at 14 pt; 4000 words of 7 chars wrap far past one page.
        let text = "словник ".repeat(4000);
        doc.paragraphs.push(body_paragraph(&text));
        let pages = estimate(&doc);
        assert!(pages >= 2, "expected at least 2 pages, got {pages}");
    }

    #[test]
    fn test_section_break_forces_new_page() {
        let mut doc = a4_doc();
        doc.paragraphs.push(body_paragraph("first section"));
        let mut carrier = body_paragraph("second section");
        carrier.section_break = Some(PageSetup::a4(mm_to_points(20.0)));
        doc.paragraphs.push(carrier);
        assert_eq!(estimate(&doc), 2);
    }

    #[test]
    fn test_section_break_on_untouched_page_adds_nothing() {
        let mut doc = a4_doc();
        let mut carrier = body_paragraph("only section");
        carrier.section_break = Some(PageSetup::a4(mm_to_points(20.0)));
        doc.paragraphs.push(carrier);
        assert_eq!(estimate(&doc), 1);
    }

    #[test]
    fn test_line_count_grows_with_text() {
        let doc = a4_doc();
        let estimator = PageEstimator::new(FontMetrics::default());
        let resolution = resolve(&{
            let mut d = doc.clone();
            d.paragraphs.push(body_paragraph("кілька слів у рядку"));
            d.paragraphs.push(body_paragraph(&"довгий текст ".repeat(60)));
            d
        });
        let short = estimator.wrap_line_count(
            &resolution.document.paragraphs[0],
            doc.page_setup.content_width(),
        );
        let long = estimator.wrap_line_count(
            &resolution.document.paragraphs[1],
            doc.page_setup.content_width(),
        );
        assert_eq!(short, 1);
        assert!(long > short);
    }

    #[test]
    fn test_first_line_indent_narrows_first_line() {
        let doc = a4_doc();
        let estimator = PageEstimator::new(FontMetrics::default());

        // 68 chars of 7 pt ≈ 476 pt: fits the full 481.9 pt measure but
        // not the indented first line.
        let word = "а".repeat(68);
        let mut with_indent = body_paragraph(&word);
        with_indent.first_line_indent = Some(mm_to_points(12.5));
        let mut without_indent = body_paragraph(&word);
        without_indent.first_line_indent = Some(0.0);

        let mut d = doc.clone();
        d.paragraphs.push(with_indent);
        d.paragraphs.push(without_indent);
        let resolution = resolve(&d);
        let content_width = doc.page_setup.content_width();

        assert_eq!(
            estimator.wrap_line_count(&resolution.document.paragraphs[1], content_width),
            1
        );
        assert_eq!(
            estimator.wrap_line_count(&resolution.document.paragraphs[0], content_width),
            2
        );
    }

    #[test]
    fn test_empty_paragraph_between_text_occupies_a_line() {
        let estimator = PageEstimator::new(FontMetrics::default());
        let mut doc = a4_doc();
        doc.paragraphs.push(body_paragraph("text"));
        doc.paragraphs.push(Paragraph::new());
        let resolution = resolve(&doc);
        assert_eq!(
            estimator.wrap_line_count(&resolution.document.paragraphs[1], 400.0),
            1
        );
    }

    #[test]
    fn test_estimate_is_deterministic() {
        let mut doc = a4_doc();
        doc.paragraphs.push(body_paragraph(&"текст тез ".repeat(500)));
        assert_eq!(estimate(&doc), estimate(&doc));
    }
}
