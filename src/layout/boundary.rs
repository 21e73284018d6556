//! Seal boundary geometry
//!
//! A boundary is the outer stroke of the seal plus the safe area inside it
//! where character cells may be placed. Everything is derived from the
//! canvas size and a handful of ratios, so the same boundary scales to any
//! output resolution.

use serde::Serialize;

use super::error::LayoutError;
use super::types::{InkColor, Point, Shape};

pub const DEFAULT_MARGIN_RATIO: f64 = 0.03;
pub const DEFAULT_BORDER_WIDTH_RATIO: f64 = 0.035;
pub const DEFAULT_INSET_RATIO: f64 = 0.02;

/// Immutable description of the seal outline and its safe area
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoundarySpec {
    shape: Shape,
    canvas_size: u32,
    margin_ratio: f64,
    border_width_ratio: f64,
    inset_ratio: f64,
    ink: InkColor,
}

impl BoundarySpec {
    /// Build a boundary with the default inset
    pub fn new(
        shape: Shape,
        canvas_size: u32,
        margin_ratio: f64,
        border_width_ratio: f64,
    ) -> Result<Self, LayoutError> {
        Self::with_inset(
            shape,
            canvas_size,
            margin_ratio,
            border_width_ratio,
            DEFAULT_INSET_RATIO,
        )
    }

    /// Build a boundary with an explicit inset between border and safe area
    pub fn with_inset(
        shape: Shape,
        canvas_size: u32,
        margin_ratio: f64,
        border_width_ratio: f64,
        inset_ratio: f64,
    ) -> Result<Self, LayoutError> {
        if canvas_size == 0 {
            return Err(LayoutError::invalid_boundary("canvas size must be positive"));
        }
        for (name, value) in [
            ("margin ratio", margin_ratio),
            ("border width ratio", border_width_ratio),
            ("inset ratio", inset_ratio),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::invalid_boundary(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        let spec = Self {
            shape,
            canvas_size,
            margin_ratio,
            border_width_ratio,
            inset_ratio,
            ink: InkColor::default(),
        };

        if spec.outer_extent() <= 0.0 {
            return Err(LayoutError::invalid_boundary(format!(
                "margin ratio {margin_ratio} leaves no outline on a {canvas_size}px canvas"
            )));
        }
        if spec.safe_extent() <= 0.0 {
            return Err(LayoutError::invalid_boundary(format!(
                "safe extent {:.3}px is not positive on a {canvas_size}px canvas",
                spec.safe_extent()
            )));
        }
        Ok(spec)
    }

    /// Circle with default ratios
    pub fn circle(canvas_size: u32) -> Result<Self, LayoutError> {
        Self::new(
            Shape::Circle,
            canvas_size,
            DEFAULT_MARGIN_RATIO,
            DEFAULT_BORDER_WIDTH_RATIO,
        )
    }

    /// Square with default ratios
    pub fn square(canvas_size: u32) -> Result<Self, LayoutError> {
        Self::new(
            Shape::Square,
            canvas_size,
            DEFAULT_MARGIN_RATIO,
            DEFAULT_BORDER_WIDTH_RATIO,
        )
    }

    /// Same geometry, different ink
    pub fn with_ink(mut self, ink: InkColor) -> Self {
        self.ink = ink;
        self
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn canvas_size(&self) -> u32 {
        self.canvas_size
    }

    pub fn ink(&self) -> InkColor {
        self.ink
    }

    pub fn margin_ratio(&self) -> f64 {
        self.margin_ratio
    }

    pub fn border_width_ratio(&self) -> f64 {
        self.border_width_ratio
    }

    pub fn inset_ratio(&self) -> f64 {
        self.inset_ratio
    }

    /// Canvas center; the stamp is always centered
    pub fn center(&self) -> Point {
        let half = self.canvas_size as f64 / 2.0;
        Point::new(half, half)
    }

    /// Radius (circle) or half side (square) of the stroke centerline
    pub fn outer_extent(&self) -> f64 {
        let size = self.canvas_size as f64;
        size / 2.0 - size * self.margin_ratio
    }

    pub fn border_width_px(&self) -> f64 {
        self.canvas_size as f64 * self.border_width_ratio
    }

    /// Radius or half side available to character cells
    pub fn safe_extent(&self) -> f64 {
        let size = self.canvas_size as f64;
        self.outer_extent() - self.border_width_px() / 2.0 - size * self.inset_ratio
    }
}
