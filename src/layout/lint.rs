//! Lint engine for detecting defects in a computed stamp layout.
//!
//! Runs after placement to check the geometric guarantees every layout is
//! supposed to keep: plan/count agreement, per-row symmetry, vertical
//! centering of the row stack, containment in the safe area and
//! non-overlapping cells.

use std::fmt;

use super::boundary::BoundarySpec;
use super::types::{CharacterPlacement, Shape, StampLayout};

/// Slack for floating point comparisons, in pixels
const EPSILON: f64 = 1e-6;

/// A lint warning about a layout defect
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint defect
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    Count,
    Symmetry,
    Centering,
    Containment,
    Overlap,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Count => write!(f, "count"),
            LintCategory::Symmetry => write!(f, "symmetry"),
            LintCategory::Centering => write!(f, "centering"),
            LintCategory::Containment => write!(f, "containment"),
            LintCategory::Overlap => write!(f, "overlap"),
        }
    }
}

/// Run all lint checks on a completed layout.
pub fn check(layout: &StampLayout, boundary: &BoundarySpec) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_count(layout, &mut warnings);
    check_symmetry(layout, boundary, &mut warnings);
    check_centering(layout, boundary, &mut warnings);
    check_containment(layout, boundary, &mut warnings);
    check_overlaps(layout, &mut warnings);
    warnings
}

fn display_name(index: usize, placement: &CharacterPlacement) -> String {
    format!("'{}' (#{})", placement.ch, index + 1)
}

// ── Count ────────────────────────────────────────────────────────

fn check_count(layout: &StampLayout, warnings: &mut Vec<LintWarning>) {
    let planned = layout.row_plan.char_count();
    if planned != layout.placements.len() {
        warnings.push(LintWarning {
            category: LintCategory::Count,
            message: format!(
                "row plan {} places {} characters but layout has {}",
                layout.row_plan,
                planned,
                layout.placements.len()
            ),
        });
    }
}

// ── Symmetry about the vertical center line ──────────────────────

fn check_symmetry(layout: &StampLayout, boundary: &BoundarySpec, warnings: &mut Vec<LintWarning>) {
    let cx = boundary.center().x;
    for (row_index, row) in layout.rows().into_iter().enumerate() {
        let n = row.len();
        for j in 0..n.div_ceil(2) {
            let left = row[j].center_x - cx;
            let right = row[n - 1 - j].center_x - cx;
            if (left + right).abs() > EPSILON {
                warnings.push(LintWarning {
                    category: LintCategory::Symmetry,
                    message: format!(
                        "row {} is off-center: offsets {:.3} and {:.3} do not mirror",
                        row_index + 1,
                        left,
                        right
                    ),
                });
                break;
            }
        }
        if row.iter().any(|p| (p.center_y - row[0].center_y).abs() > EPSILON) {
            warnings.push(LintWarning {
                category: LintCategory::Symmetry,
                message: format!("row {} is not level", row_index + 1),
            });
        }
    }
}

// ── Row stack centering ──────────────────────────────────────────

fn check_centering(layout: &StampLayout, boundary: &BoundarySpec, warnings: &mut Vec<LintWarning>) {
    let cy = boundary.center().y;
    let row_ys: Vec<f64> = layout
        .rows()
        .into_iter()
        .filter_map(|row| row.first().map(|p| p.center_y))
        .collect();
    let n = row_ys.len();
    for i in 0..n.div_ceil(2) {
        let top = row_ys[i] - cy;
        let bottom = row_ys[n - 1 - i] - cy;
        if (top + bottom).abs() > EPSILON {
            warnings.push(LintWarning {
                category: LintCategory::Centering,
                message: format!(
                    "rows {} and {} are not mirrored about the horizontal center ({:.3} vs {:.3})",
                    i + 1,
                    n - i,
                    top,
                    bottom
                ),
            });
            return;
        }
    }
}

// ── Containment in the safe area ─────────────────────────────────

fn check_containment(
    layout: &StampLayout,
    boundary: &BoundarySpec,
    warnings: &mut Vec<LintWarning>,
) {
    let center = boundary.center();
    let safe = boundary.safe_extent();
    for (i, placement) in layout.placements.iter().enumerate() {
        let cell_box = placement.cell_box(&layout.cell);
        let outside = match boundary.shape() {
            Shape::Circle => cell_box
                .corners()
                .iter()
                .any(|corner| corner.distance(center) > safe + EPSILON),
            Shape::Square => {
                cell_box.x < center.x - safe - EPSILON
                    || cell_box.right() > center.x + safe + EPSILON
                    || cell_box.y < center.y - safe - EPSILON
                    || cell_box.bottom() > center.y + safe + EPSILON
            }
        };
        if outside {
            warnings.push(LintWarning {
                category: LintCategory::Containment,
                message: format!(
                    "cell of {} extends outside the {} safe area",
                    display_name(i, placement),
                    boundary.shape()
                ),
            });
        }
    }
}

// ── Overlap detection ────────────────────────────────────────────

fn check_overlaps(layout: &StampLayout, warnings: &mut Vec<LintWarning>) {
    let min_distance = layout.cell.pitch() - EPSILON;
    for (i, a) in layout.placements.iter().enumerate() {
        for (j, b) in layout.placements.iter().enumerate().skip(i + 1) {
            if a.center().distance(b.center()) < min_distance {
                warnings.push(LintWarning {
                    category: LintCategory::Overlap,
                    message: format!(
                        "cells of {} and {} are closer than one cell pitch",
                        display_name(i, a),
                        display_name(j, b)
                    ),
                });
            }
        }
    }
}
