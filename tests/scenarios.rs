//! End-to-end layout scenarios for typical seal texts

use pretty_assertions::assert_eq;

use stamp_layout::layout::boundary::DEFAULT_BORDER_WIDTH_RATIO;
use stamp_layout::{plan, BoundarySpec, LayoutError, Shape};

const EPS: f64 = 1e-6;

#[test]
fn test_single_char_circle_is_centered() {
    let boundary = BoundarySpec::circle(1000).unwrap();
    let layout = plan("강", &boundary).unwrap();
    let safe = boundary.safe_extent();

    assert_eq!(layout.row_plan.clone().into_inner(), vec![1]);
    assert_eq!(layout.placements.len(), 1);
    assert!((layout.placements[0].center_x - 500.0).abs() < EPS);
    assert!((layout.placements[0].center_y - 500.0).abs() < EPS);

    // The largest square a circle can hold is sqrt(2) * r; the fill factor
    // keeps the cell a little below that.
    let cell = layout.cell.cell_size;
    assert!(cell <= safe * 2f64.sqrt() + EPS);
    let ratio = cell / (2.0 * safe);
    assert!(ratio > 0.6 && ratio < 0.75, "cell ratio {ratio}");
    assert!((layout.glyph_size - cell * 0.95).abs() < EPS);
}

#[test]
fn test_four_char_circle_is_two_by_two() {
    let boundary = BoundarySpec::circle(1000).unwrap();
    let layout = plan("합격단체", &boundary).unwrap();

    assert_eq!(layout.row_plan.clone().into_inner(), vec![2, 2]);
    let p = &layout.placements;
    assert_eq!(p.iter().map(|p| p.ch).collect::<String>(), "합격단체");

    // Straddles both center lines
    assert!(p[0].center_x < 500.0 && p[1].center_x > 500.0);
    assert!(p[0].center_y < 500.0 && p[2].center_y > 500.0);
    assert!((p[0].center_x - p[2].center_x).abs() < EPS);
    assert!((p[0].center_x + p[1].center_x - 1000.0).abs() < EPS);
    assert!((p[0].center_y + p[2].center_y - 1000.0).abs() < EPS);
}

#[test]
fn test_five_char_square_two_over_three() {
    let boundary = BoundarySpec::square(1000).unwrap();
    let layout = plan("대한민국만", &boundary).unwrap();

    assert_eq!(layout.row_plan.clone().into_inner(), vec![2, 3]);
    let rows = layout.rows();
    assert_eq!(rows[0].len(), 2);
    assert_eq!(rows[1].len(), 3);

    let top_mid = (rows[0][0].center_x + rows[0][1].center_x) / 2.0;
    assert!((top_mid - 500.0).abs() < EPS);
    assert!((rows[1][1].center_x - 500.0).abs() < EPS);
    assert!((rows[0][0].center_y + rows[1][0].center_y - 1000.0).abs() < EPS);
}

#[test]
fn test_twenty_one_chars_fall_back_to_grid() {
    let boundary = BoundarySpec::square(1000).unwrap();
    let text: String = "가나다라마바사".chars().cycle().take(21).collect();
    let layout = plan(&text, &boundary).unwrap();

    assert_eq!(layout.row_plan.clone().into_inner(), vec![5, 5, 5, 5, 1]);
    assert_eq!(layout.row_plan.char_count(), 21);
    let last = layout.placements.last().unwrap();
    assert!((last.center_x - 500.0).abs() < EPS);
}

#[test]
fn test_pathological_boundary_never_yields_silent_zero() {
    let text: String = "가나다라".chars().cycle().take(20).collect();
    for margin in [0.49, 0.45, 0.4] {
        match BoundarySpec::new(Shape::Square, 10, margin, DEFAULT_BORDER_WIDTH_RATIO) {
            Err(err) => assert!(matches!(err, LayoutError::InvalidBoundary { .. })),
            Ok(boundary) => match plan(&text, &boundary) {
                Ok(layout) => assert!(layout.cell.cell_size > 0.0),
                Err(err) => assert!(
                    matches!(err, LayoutError::LayoutInfeasible { .. }),
                    "unexpected error: {err}"
                ),
            },
        }
    }
}

#[test]
fn test_margin_049_rejected_as_boundary() {
    let err = BoundarySpec::new(Shape::Square, 10, 0.49, DEFAULT_BORDER_WIDTH_RATIO).unwrap_err();
    assert!(matches!(err, LayoutError::InvalidBoundary { .. }));
}

#[test]
fn test_margin_045_infeasible() {
    let boundary = BoundarySpec::new(Shape::Square, 10, 0.45, DEFAULT_BORDER_WIDTH_RATIO).unwrap();
    let text: String = "가나다라".chars().cycle().take(20).collect();
    let err = plan(&text, &boundary).unwrap_err();
    assert!(matches!(err, LayoutError::LayoutInfeasible { .. }));
}

#[test]
fn test_plan_serializes_to_json() {
    let boundary = BoundarySpec::square(100).unwrap();
    let layout = plan("印", &boundary).unwrap();
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["shape"], "square");
    assert_eq!(json["row_plan"], serde_json::json!([1]));
    assert_eq!(json["placements"][0]["char"], "印");
}
