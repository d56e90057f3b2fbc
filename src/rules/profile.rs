//! Validation profile: required values and tolerances.

use serde::{Deserialize, Serialize};

use crate::layout::FontMetrics;
use crate::model::{cm_to_points, mm_to_points, Alignment};

/// Required formatting values and the tolerances applied when comparing
/// against them.
///
/// Tolerances exist because physical units round-trip lossily through
/// the underlying format (twips, half-points); exact equality is never
/// required. All lengths are absolute points. The defaults encode the
/// conference submission template: Times New Roman 14 pt on A4 with
/// 20 mm margins, justified body text at 1.15 spacing with a 1.25 cm
/// first-line indent, a «Література» section, and a length of 1-2 pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationProfile {
    /// Required font family for every run
    pub font_family: String,

    /// Required font size in points
    pub font_size: f32,

    /// Allowed font-size deviation in points
    pub font_size_tolerance: f32,

    /// Required page width in points
    pub page_width: f32,

    /// Required page height in points
    pub page_height: f32,

    /// Allowed page-size deviation in points
    pub page_size_tolerance: f32,

    /// Required uniform margin in points
    pub margin: f32,

    /// Allowed margin deviation in points
    pub margin_tolerance: f32,

    /// Required body-paragraph alignment
    pub body_alignment: Alignment,

    /// Required line-spacing multiplier
    pub line_spacing: f32,

    /// Allowed line-spacing deviation
    pub line_spacing_tolerance: f32,

    /// Required first-line indent in points
    pub first_line_indent: f32,

    /// Allowed indent deviation in points
    pub indent_tolerance: f32,

    /// Require the title line to be uppercase
    pub require_title_uppercase: bool,

    /// Require the header lines to be centered
    pub require_header_centered: bool,

    /// Require the header lines to be bold
    pub require_header_bold: bool,

    /// Require the authors line to be italic
    pub require_authors_italic: bool,

    /// Section-heading marker of the literature block, matched
    /// case-insensitively on trimmed, NFC-normalized text
    pub literature_marker: String,

    /// Required font size for figure/table captions, in points
    pub caption_font_size: f32,

    /// Minimum estimated page count, inclusive
    pub min_pages: u32,

    /// Maximum estimated page count, inclusive
    pub max_pages: u32,

    /// How many leading body paragraphs the body-format rule samples
    pub body_sample: usize,

    /// Font metrics for the pagination estimate
    pub metrics: FontMetrics,
}

impl Default for ValidationProfile {
    fn default() -> Self {
        Self {
            font_family: "Times New Roman".to_string(),
            font_size: 14.0,
            font_size_tolerance: 0.5,
            page_width: mm_to_points(210.0),
            page_height: mm_to_points(297.0),
            page_size_tolerance: 6.0,
            margin: mm_to_points(20.0),
            margin_tolerance: 2.0,
            body_alignment: Alignment::Justify,
            line_spacing: 1.15,
            line_spacing_tolerance: 0.06,
            first_line_indent: cm_to_points(1.25),
            indent_tolerance: 4.0,
            require_title_uppercase: true,
            require_header_centered: true,
            require_header_bold: true,
            require_authors_italic: true,
            literature_marker: "Література".to_string(),
            caption_font_size: 12.0,
            min_pages: 1,
            max_pages: 2,
            body_sample: 30,
            metrics: FontMetrics::default(),
        }
    }
}

impl ValidationProfile {
    /// Create a profile with the default template requirements.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the required font.
    pub fn with_font(mut self, family: impl Into<String>, size: f32) -> Self {
        self.font_family = family.into();
        self.font_size = size;
        self
    }

    /// Set the required page size, in millimeters.
    pub fn with_page_size_mm(mut self, width: f32, height: f32) -> Self {
        self.page_width = mm_to_points(width);
        self.page_height = mm_to_points(height);
        self
    }

    /// Set the required uniform margin, in millimeters.
    pub fn with_margin_mm(mut self, margin: f32) -> Self {
        self.margin = mm_to_points(margin);
        self
    }

    /// Set the allowed margin deviation, in millimeters.
    pub fn with_margin_tolerance_mm(mut self, tolerance: f32) -> Self {
        self.margin_tolerance = mm_to_points(tolerance);
        self
    }

    /// Set the literature section marker.
    pub fn with_literature_marker(mut self, marker: impl Into<String>) -> Self {
        self.literature_marker = marker.into();
        self
    }

    /// Set the allowed page-count range, inclusive.
    pub fn with_page_range(mut self, min: u32, max: u32) -> Self {
        self.min_pages = min;
        self.max_pages = max;
        self
    }

    /// Replace the pagination font metrics.
    pub fn with_metrics(mut self, metrics: FontMetrics) -> Self {
        self.metrics = metrics;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_profile_matches_template() {
        let profile = ValidationProfile::default();
        assert_eq!(profile.font_family, "Times New Roman");
        assert_eq!(profile.font_size, 14.0);
        assert!((profile.margin - 56.69).abs() < 0.01);
        assert!((profile.first_line_indent - 35.43).abs() < 0.01);
        assert_eq!((profile.min_pages, profile.max_pages), (1, 2));
    }

    #[test]
    fn test_builder_chain() {
        let profile = ValidationProfile::new()
            .with_font("Arial", 12.0)
            .with_margin_mm(25.0)
            .with_margin_tolerance_mm(0.5)
            .with_page_range(1, 4)
            .with_literature_marker("References");
        assert_eq!(profile.font_family, "Arial");
        assert!((profile.margin - mm_to_points(25.0)).abs() < 1e-4);
        assert!((profile.margin_tolerance - mm_to_points(0.5)).abs() < 1e-4);
        assert_eq!(profile.max_pages, 4);
        assert_eq!(profile.literature_marker, "References");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let profile: ValidationProfile =
            serde_json::from_str(r#"{"font_size": 12.0, "max_pages": 3}"#).unwrap();
        assert_eq!(profile.font_size, 12.0);
        assert_eq!(profile.max_pages, 3);
        // Everything else keeps the template defaults.
        assert_eq!(profile.font_family, "Times New Roman");
        assert_eq!(profile.min_pages, 1);
    }
}
