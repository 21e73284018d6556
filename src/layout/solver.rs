//! Cell-size solver
//!
//! Finds the single largest cell edge for which every row of a plan fits
//! inside the boundary's safe area. Squares have a closed form. Circles
//! start from the same closed form as an upper bound and bisect down
//! until every row clears the chord at its outer edge.

use tracing::debug;

use super::boundary::BoundarySpec;
use super::config::LayoutConfig;
use super::error::LayoutError;
use super::types::{CellGeometry, RowPlan, Shape};

/// Compute the uniform cell geometry for `plan` inside `boundary`.
///
/// An empty plan has no cells and yields the zero geometry.
pub fn solve_cell_size(
    plan: &RowPlan,
    boundary: &BoundarySpec,
    gap_ratio: f64,
    config: &LayoutConfig,
) -> Result<CellGeometry, LayoutError> {
    if plan.is_empty() {
        return Ok(CellGeometry::default());
    }
    if let Some(index) = plan.iter().position(|&len| len == 0) {
        return Err(LayoutError::EmptyRow { index });
    }
    if !gap_ratio.is_finite() || gap_ratio < 0.0 {
        return Err(LayoutError::infeasible(
            plan,
            format!("gap ratio {gap_ratio} must be a non-negative number"),
        ));
    }

    let safe = boundary.safe_extent();
    let upper = square_cell_size(plan, safe, gap_ratio);

    let cell_size = match boundary.shape() {
        Shape::Square => upper,
        Shape::Circle => {
            let fill = config.circle_fill_factor;
            if fits_circle(plan, upper, gap_ratio, safe, fill) {
                upper
            } else {
                bisect_circle(plan, upper, gap_ratio, safe, fill, config.max_iterations)
            }
        }
    };

    if !cell_size.is_finite() || cell_size <= 0.0 {
        return Err(LayoutError::infeasible(plan, "no positive cell size fits the boundary"));
    }
    if cell_size < config.min_cell_size {
        return Err(LayoutError::infeasible(
            plan,
            format!(
                "cell size {cell_size:.3}px is below the {}px minimum",
                config.min_cell_size
            ),
        ));
    }

    debug!(
        shape = %boundary.shape(),
        rows = %plan,
        cell_size,
        upper_bound = upper,
        "solved cell size"
    );

    Ok(CellGeometry {
        cell_size,
        gap: cell_size * gap_ratio,
    })
}

/// Largest cell for which the widest row and the row stack both fit a
/// square of half side `safe`
fn square_cell_size(plan: &RowPlan, safe: f64, gap_ratio: f64) -> f64 {
    let span = safe * 2.0;
    let cols = plan.max_row_len() as f64;
    let rows = plan.row_count() as f64;
    let by_cols = span / (cols + (cols - 1.0) * gap_ratio);
    let by_rows = span / (rows + (rows - 1.0) * gap_ratio);
    by_cols.min(by_rows)
}

/// Whether every row of `plan` fits a circle of `radius` at cell size `cell`.
///
/// Rows are measured at their outer edge (the cell edge farthest from the
/// horizontal center line), which bounds every cell corner inside the circle.
pub(crate) fn fits_circle(
    plan: &RowPlan,
    cell: f64,
    gap_ratio: f64,
    radius: f64,
    fill: f64,
) -> bool {
    let geometry = CellGeometry {
        cell_size: cell,
        gap: cell * gap_ratio,
    };
    let stack = geometry.span(plan.row_count());

    plan.iter().enumerate().all(|(i, &len)| {
        let dy = -stack / 2.0 + cell / 2.0 + i as f64 * geometry.pitch();
        let edge = dy.abs() + cell / 2.0;
        if edge >= radius {
            return false;
        }
        let chord = 2.0 * (radius * radius - edge * edge).sqrt() * fill;
        geometry.span(len) <= chord
    })
}

fn bisect_circle(
    plan: &RowPlan,
    upper: f64,
    gap_ratio: f64,
    radius: f64,
    fill: f64,
    max_iterations: usize,
) -> f64 {
    let mut lo = 0.0;
    let mut hi = upper;
    for _ in 0..max_iterations {
        let mid = (lo + hi) / 2.0;
        if fits_circle(plan, mid, gap_ratio, radius, fill) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(rows: &[usize]) -> RowPlan {
        RowPlan::new(rows.to_vec())
    }

    #[test]
    fn test_square_closed_form() {
        let boundary = BoundarySpec::square(1000).unwrap();
        let safe = boundary.safe_extent();
        let cell = solve_cell_size(&plan(&[2, 3]), &boundary, 0.02, &LayoutConfig::default())
            .unwrap();
        let expected = (safe * 2.0) / (3.0 + 2.0 * 0.02);
        assert!((cell.cell_size - expected).abs() < 1e-9);
        assert!((cell.gap - expected * 0.02).abs() < 1e-9);
    }

    #[test]
    fn test_square_limited_by_rows() {
        let boundary = BoundarySpec::square(1000).unwrap();
        let safe = boundary.safe_extent();
        let cell = solve_cell_size(&plan(&[1, 1, 1]), &boundary, 0.02, &LayoutConfig::default())
            .unwrap();
        let expected = (safe * 2.0) / (3.0 + 2.0 * 0.02);
        assert!((cell.cell_size - expected).abs() < 1e-9);
    }

    #[test]
    fn test_circle_shrinks_below_square_bound() {
        let boundary = BoundarySpec::circle(1000).unwrap();
        let config = LayoutConfig::default();
        let rows = plan(&[2, 2]);
        let upper = square_cell_size(&rows, boundary.safe_extent(), 0.01);
        let cell = solve_cell_size(&rows, &boundary, 0.01, &config).unwrap();
        assert!(cell.cell_size < upper);
        assert!(fits_circle(
            &rows,
            cell.cell_size,
            0.01,
            boundary.safe_extent(),
            config.circle_fill_factor
        ));
        // Bisection lands within 1% of the true limit
        assert!(!fits_circle(
            &rows,
            cell.cell_size * 1.01,
            0.01,
            boundary.safe_extent(),
            config.circle_fill_factor
        ));
    }

    #[test]
    fn test_empty_plan_has_no_cells() {
        let boundary = BoundarySpec::circle(100).unwrap();
        let cell =
            solve_cell_size(&RowPlan::empty(), &boundary, 0.01, &LayoutConfig::default()).unwrap();
        assert_eq!(cell, CellGeometry::default());
    }

    #[test]
    fn test_empty_row_rejected() {
        let boundary = BoundarySpec::square(100).unwrap();
        let err = solve_cell_size(&plan(&[2, 0, 2]), &boundary, 0.02, &LayoutConfig::default())
            .unwrap_err();
        assert_eq!(err, LayoutError::EmptyRow { index: 1 });
    }

    #[test]
    fn test_tiny_cell_infeasible() {
        let boundary = BoundarySpec::new(Shape::Square, 10, 0.45, 0.035).unwrap();
        let err = solve_cell_size(
            &plan(&[5, 5, 5, 5]),
            &boundary,
            0.02,
            &LayoutConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(err, LayoutError::LayoutInfeasible { .. }));
    }

    #[test]
    fn test_negative_gap_ratio_rejected() {
        let boundary = BoundarySpec::square(100).unwrap();
        let err = solve_cell_size(&plan(&[2]), &boundary, -0.5, &LayoutConfig::default())
            .unwrap_err();
        assert!(matches!(err, LayoutError::LayoutInfeasible { .. }));
    }
}
