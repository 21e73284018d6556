//! Error types for the layout engine

use thiserror::Error;

use super::types::Shape;

/// Errors that can occur during layout computation
#[derive(Debug, Error, PartialEq)]
pub enum LayoutError {
    /// Boundary parameters leave no room for glyphs
    #[error("invalid boundary: {reason}")]
    InvalidBoundary { reason: String },

    /// No positive cell size satisfies the boundary constraints
    #[error("layout infeasible for rows {rows}: {reason}")]
    LayoutInfeasible { rows: String, reason: String },

    /// Row plan does not account for every character of the text
    #[error("row plan places {planned} characters but text has {actual}")]
    PlanMismatch { planned: usize, actual: usize },

    /// Character count has no layout for this shape
    #[error("{count} characters are not supported on a {shape} boundary (max {max})")]
    UnsupportedCharCount {
        count: usize,
        shape: Shape,
        max: usize,
    },

    /// A row in the plan holds no characters
    #[error("row {index} of the plan is empty")]
    EmptyRow { index: usize },
}

impl LayoutError {
    /// Create an invalid boundary error
    pub fn invalid_boundary(reason: impl Into<String>) -> Self {
        Self::InvalidBoundary {
            reason: reason.into(),
        }
    }

    /// Create a layout infeasible error
    pub fn infeasible(rows: impl ToString, reason: impl Into<String>) -> Self {
        Self::LayoutInfeasible {
            rows: rows.to_string(),
            reason: reason.into(),
        }
    }
}
