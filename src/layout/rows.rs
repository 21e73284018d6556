//! Row plans: how many characters go on each line of the seal

use tracing::debug;

use super::config::{CircleOverflow, ThreeCharArrangement};
use super::error::LayoutError;
use super::types::{RowPlan, Shape};

/// Largest count with a hand-tuned circle layout
pub const CIRCLE_MAX_TABULATED: usize = 5;

/// Hand-tuned square layouts, indexed by `count - SQUARE_TABLE_START`
const SQUARE_TABLE_START: usize = 4;
const SQUARE_TABLE: [&[usize]; 17] = [
    &[2, 2],
    &[2, 3],
    &[3, 3],
    &[3, 4],
    &[4, 4],
    &[3, 3, 3],
    &[3, 4, 3],
    &[3, 4, 4],
    &[4, 4, 4],
    &[4, 5, 4],
    &[4, 5, 5],
    &[5, 5, 5],
    &[4, 4, 4, 4],
    &[4, 4, 5, 4],
    &[4, 5, 5, 4],
    &[4, 5, 5, 5],
    &[5, 5, 5, 5],
];

/// Resolve the row plan for `char_count` characters on `shape`.
///
/// Circle counts above five go through the square-root grid. Use
/// [`resolve_rows_checked`] to honour a [`CircleOverflow::Reject`] policy.
pub fn resolve_rows(char_count: usize, shape: Shape, three_char: ThreeCharArrangement) -> RowPlan {
    if char_count == 0 {
        return RowPlan::empty();
    }
    let rows = match shape {
        Shape::Circle => circle_rows(char_count, three_char),
        Shape::Square => square_rows(char_count),
    };
    rows.map(|r| RowPlan::new(r.to_vec()))
        .unwrap_or_else(|| {
            let plan = grid_rows(char_count);
            debug!(count = char_count, %shape, plan = %plan, "no tabulated layout, using grid");
            plan
        })
}

/// Like [`resolve_rows`], rejecting circle counts the overflow policy forbids
pub fn resolve_rows_checked(
    char_count: usize,
    shape: Shape,
    three_char: ThreeCharArrangement,
    overflow: CircleOverflow,
) -> Result<RowPlan, LayoutError> {
    if shape == Shape::Circle
        && char_count > CIRCLE_MAX_TABULATED
        && overflow == CircleOverflow::Reject
    {
        return Err(LayoutError::UnsupportedCharCount {
            count: char_count,
            shape,
            max: CIRCLE_MAX_TABULATED,
        });
    }
    Ok(resolve_rows(char_count, shape, three_char))
}

fn circle_rows(count: usize, three_char: ThreeCharArrangement) -> Option<&'static [usize]> {
    let rows: &'static [usize] = match count {
        1 => &[1],
        2 => &[2],
        3 => match three_char {
            ThreeCharArrangement::Triangle => &[1, 2],
            ThreeCharArrangement::Horizontal => &[3],
            ThreeCharArrangement::Vertical => &[1, 1, 1],
        },
        4 => &[2, 2],
        5 => &[2, 3],
        _ => return None,
    };
    Some(rows)
}

fn square_rows(count: usize) -> Option<&'static [usize]> {
    count
        .checked_sub(SQUARE_TABLE_START)
        .and_then(|i| SQUARE_TABLE.get(i))
        .copied()
}

/// `ceil(sqrt(n))` columns per row, the last row taking the remainder
pub fn grid_rows(char_count: usize) -> RowPlan {
    if char_count == 0 {
        return RowPlan::empty();
    }
    let cols = ceil_sqrt(char_count);
    let mut rows = Vec::with_capacity(char_count.div_ceil(cols));
    let mut remaining = char_count;
    while remaining > 0 {
        let row = cols.min(remaining);
        rows.push(row);
        remaining -= row;
    }
    RowPlan::new(rows)
}

/// Integer ceiling square root, exact for every `usize`
fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root < n {
        root += 1;
    }
    while root > 1 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root
}
