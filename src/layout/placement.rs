//! Placement calculator: turns a row plan and cell geometry into target
//! centers, centering every row on the vertical axis and the row stack on
//! the horizontal axis.

use super::boundary::BoundarySpec;
use super::error::LayoutError;
use super::types::{CellGeometry, CharacterPlacement, RowPlan};

/// Place each character of `text` row-major according to `plan`
pub fn place_characters(
    text: &str,
    plan: &RowPlan,
    cell: &CellGeometry,
    boundary: &BoundarySpec,
) -> Result<Vec<CharacterPlacement>, LayoutError> {
    let chars: Vec<char> = text.chars().collect();
    if plan.char_count() != chars.len() {
        return Err(LayoutError::PlanMismatch {
            planned: plan.char_count(),
            actual: chars.len(),
        });
    }

    let center = boundary.center();
    let pitch = cell.pitch();
    let first_row_y = center.y - cell.span(plan.row_count()) / 2.0 + cell.cell_size / 2.0;

    let mut placements = Vec::with_capacity(chars.len());
    let mut remaining = chars.into_iter();
    for (row, &len) in plan.iter().enumerate() {
        let center_y = first_row_y + row as f64 * pitch;
        let first_col_x = center.x - cell.span(len) / 2.0 + cell.cell_size / 2.0;
        for (col, ch) in remaining.by_ref().take(len).enumerate() {
            placements.push(CharacterPlacement {
                ch,
                center_x: first_col_x + col as f64 * pitch,
                center_y,
            });
        }
    }
    Ok(placements)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell() -> CellGeometry {
        CellGeometry {
            cell_size: 100.0,
            gap: 10.0,
        }
    }

    #[test]
    fn test_two_plus_three() {
        let boundary = BoundarySpec::square(1000).unwrap();
        let plan = RowPlan::new(vec![2, 3]);
        let placed = place_characters("대한민국만", &plan, &cell(), &boundary).unwrap();

        let xs: Vec<f64> = placed.iter().map(|p| p.center_x).collect();
        let ys: Vec<f64> = placed.iter().map(|p| p.center_y).collect();
        assert_eq!(xs, vec![445.0, 555.0, 390.0, 500.0, 610.0]);
        assert_eq!(ys, vec![445.0, 445.0, 555.0, 555.0, 555.0]);
        let chars: String = placed.iter().map(|p| p.ch).collect();
        assert_eq!(chars, "대한민국만");
    }

    #[test]
    fn test_single_char_centered() {
        let boundary = BoundarySpec::circle(800).unwrap();
        let plan = RowPlan::new(vec![1]);
        let placed = place_characters("강", &plan, &cell(), &boundary).unwrap();
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].center_x, 400.0);
        assert_eq!(placed[0].center_y, 400.0);
    }

    #[test]
    fn test_mismatch_rejected() {
        let boundary = BoundarySpec::square(1000).unwrap();
        let plan = RowPlan::new(vec![2, 2]);
        let err = place_characters("abc", &plan, &cell(), &boundary).unwrap_err();
        assert_eq!(
            err,
            LayoutError::PlanMismatch {
                planned: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn test_counts_codepoints_not_bytes() {
        let boundary = BoundarySpec::square(1000).unwrap();
        let plan = RowPlan::new(vec![2]);
        assert!(place_characters("합격", &plan, &cell(), &boundary).is_ok());
    }

    #[test]
    fn test_empty_text_and_plan() {
        let boundary = BoundarySpec::square(1000).unwrap();
        let placed =
            place_characters("", &RowPlan::empty(), &CellGeometry::default(), &boundary).unwrap();
        assert!(placed.is_empty());
    }
}
