//! Layout engine for computing character positions on a seal
//!
//! This module takes a text and a boundary and produces a [`StampLayout`]:
//! the row plan, the uniform cell geometry and one target center per
//! character. Nothing here touches pixels.

pub mod boundary;
pub mod config;
pub mod error;
pub mod lint;
pub mod placement;
pub mod rows;
pub mod solver;
pub mod types;

pub use boundary::BoundarySpec;
pub use config::{CircleOverflow, LayoutConfig, ThreeCharArrangement};
pub use error::LayoutError;
pub use lint::{LintCategory, LintWarning};
pub use placement::place_characters;
pub use rows::{grid_rows, resolve_rows, resolve_rows_checked};
pub use solver::solve_cell_size;
pub use types::*;

use tracing::debug;

/// Compute the full layout of `text` inside `boundary`.
///
/// Runs the resolver, solver and placement steps in order; any failure is
/// returned before a partial layout exists.
pub fn compute(
    text: &str,
    boundary: &BoundarySpec,
    config: &LayoutConfig,
) -> Result<StampLayout, LayoutError> {
    let shape = boundary.shape();
    let count = text.chars().count();

    let row_plan =
        resolve_rows_checked(count, shape, config.three_char, config.circle_overflow)?;
    let gap_ratio = config.gap_ratio_for(shape, count);
    let cell = solve_cell_size(&row_plan, boundary, gap_ratio, config)?;
    let placements = place_characters(text, &row_plan, &cell, boundary)?;

    debug!(
        %shape,
        count,
        rows = %row_plan,
        cell_size = cell.cell_size,
        gap = cell.gap,
        "computed layout"
    );

    Ok(StampLayout {
        shape,
        row_plan,
        cell,
        gap_ratio,
        glyph_size: cell.cell_size * config.glyph_fill_for(shape),
        placements,
    })
}
