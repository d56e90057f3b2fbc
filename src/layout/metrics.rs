//! Font metrics for width and line-height approximation.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::model::LineSpacing;

/// Approximate font metrics driving the pagination estimate.
///
/// Widths are expressed as a fraction of the font size: an average glyph
/// in 14 pt Times New Roman is about `14 × 0.50 = 7 pt` wide in running
/// text. The table is calibrated against reference documents and fully
/// overridable through the validation profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontMetrics {
    /// Average glyph width factors keyed by lowercased family name
    pub width_factors: HashMap<String, f32>,

    /// Factor for families absent from the table
    pub default_width_factor: f32,

    /// Single-spaced line height as a fraction of the font size
    pub line_height_factor: f32,
}

impl Default for FontMetrics {
    fn default() -> Self {
        let width_factors = [
            ("times new roman", 0.50),
            ("arial", 0.52),
            ("helvetica", 0.52),
            ("calibri", 0.48),
            ("cambria", 0.50),
            ("courier new", 0.60),
        ]
        .into_iter()
        .map(|(family, factor)| (family.to_string(), factor))
        .collect();

        Self {
            width_factors,
            default_width_factor: 0.52,
            line_height_factor: 1.15,
        }
    }
}

impl FontMetrics {
    /// Create metrics with the default table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the width factor for one family.
    pub fn with_width_factor(mut self, family: impl Into<String>, factor: f32) -> Self {
        self.width_factors.insert(family.into().to_lowercase(), factor);
        self
    }

    /// Override the fallback width factor.
    pub fn with_default_width_factor(mut self, factor: f32) -> Self {
        self.default_width_factor = factor;
        self
    }

    /// Override the line-height factor.
    pub fn with_line_height_factor(mut self, factor: f32) -> Self {
        self.line_height_factor = factor;
        self
    }

    /// Average width in points of one glyph of `family` at `size`.
    pub fn char_width(&self, family: &str, size: f32) -> f32 {
        let factor = self
            .width_factors
            .get(family.to_lowercase().as_str())
            .copied()
            .unwrap_or(self.default_width_factor);
        factor * size
    }

    /// Vertical extent in points of one line at `size` under `spacing`.
    pub fn line_height(&self, size: f32, spacing: &LineSpacing) -> f32 {
        match spacing {
            LineSpacing::Multiple(m) => size * self.line_height_factor * m,
            LineSpacing::Exact(points) => *points,
        }
    }
}
