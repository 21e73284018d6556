//! Configuration for the layout engine

use serde::Deserialize;

use super::types::Shape;

/// Arrangement used for three characters on a circular seal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThreeCharArrangement {
    /// One on top, two below
    #[default]
    Triangle,
    /// All three in a single row
    Horizontal,
    /// One column of three
    Vertical,
}

/// What to do with more than five characters on a circle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleOverflow {
    /// Fall back to the square-root grid, shrunk to fit the circle
    #[default]
    Grid,
    /// Fail with `UnsupportedCharCount`
    Reject,
}

/// Configuration options for layout computation
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutConfig {
    /// Gap ratio for circles holding four or more characters
    pub circle_dense_gap_ratio: f64,

    /// Gap ratio for circles holding one to three characters
    pub circle_loose_gap_ratio: f64,

    /// Gap ratio for square seals
    pub square_gap_ratio: f64,

    /// Fraction of each chord a circle row may occupy
    pub circle_fill_factor: f64,

    /// Glyph size as a fraction of the cell on circles
    pub circle_glyph_fill: f64,

    /// Glyph size as a fraction of the cell on squares
    pub square_glyph_fill: f64,

    /// Smallest usable cell, in pixels
    pub min_cell_size: f64,

    /// Bisection budget for the circle solver
    pub max_iterations: usize,

    pub three_char: ThreeCharArrangement,

    pub circle_overflow: CircleOverflow,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            circle_dense_gap_ratio: 0.01,
            circle_loose_gap_ratio: 0.02,
            square_gap_ratio: 0.02,
            circle_fill_factor: 0.92,
            circle_glyph_fill: 0.95,
            square_glyph_fill: 0.92,
            min_cell_size: 1.0,
            max_iterations: 50,
            three_char: ThreeCharArrangement::Triangle,
            circle_overflow: CircleOverflow::Grid,
        }
    }
}

impl LayoutConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Gap ratio used for `count` characters on `shape`
    pub fn gap_ratio_for(&self, shape: Shape, count: usize) -> f64 {
        match shape {
            Shape::Square => self.square_gap_ratio,
            Shape::Circle if count >= 4 => self.circle_dense_gap_ratio,
            Shape::Circle => self.circle_loose_gap_ratio,
        }
    }

    /// Glyph fill factor used on `shape`
    pub fn glyph_fill_for(&self, shape: Shape) -> f64 {
        match shape {
            Shape::Circle => self.circle_glyph_fill,
            Shape::Square => self.square_glyph_fill,
        }
    }

    /// Set the three-character arrangement
    pub fn with_three_char(mut self, arrangement: ThreeCharArrangement) -> Self {
        self.three_char = arrangement;
        self
    }

    /// Set the overflow policy for crowded circles
    pub fn with_circle_overflow(mut self, overflow: CircleOverflow) -> Self {
        self.circle_overflow = overflow;
        self
    }

    /// Set the square gap ratio
    pub fn with_square_gap_ratio(mut self, ratio: f64) -> Self {
        self.square_gap_ratio = ratio;
        self
    }

    /// Set both circle gap ratios
    pub fn with_circle_gap_ratios(mut self, dense: f64, loose: f64) -> Self {
        self.circle_dense_gap_ratio = dense;
        self.circle_loose_gap_ratio = loose;
        self
    }

    /// Set the circle chord fill factor
    pub fn with_circle_fill_factor(mut self, factor: f64) -> Self {
        self.circle_fill_factor = factor;
        self
    }

    /// Set the minimum cell size in pixels
    pub fn with_min_cell_size(mut self, size: f64) -> Self {
        self.min_cell_size = size;
        self
    }
}
