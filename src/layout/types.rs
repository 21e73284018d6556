//! Core types for the layout engine

use std::fmt;
use std::ops::Deref;

use serde::Serialize;

/// A 2D point in canvas pixel coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// An axis-aligned box in canvas pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl BoundingBox {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square box of side `size` centered on `center`
    pub fn centered(center: Point, size: f64) -> Self {
        Self::new(center.x - size / 2.0, center.y - size / 2.0, size, size)
    }

    /// Right edge x-coordinate
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge y-coordinate
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point of the bounding box
    pub fn center(&self) -> Point {
        Point {
            x: self.x + self.width / 2.0,
            y: self.y + self.height / 2.0,
        }
    }

    /// The four corners, clockwise from top-left
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.x, self.y),
            Point::new(self.right(), self.y),
            Point::new(self.right(), self.bottom()),
            Point::new(self.x, self.bottom()),
        ]
    }

    /// Check if this bounding box intersects another
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }
}

/// Outer shape of the seal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    Circle,
    Square,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Circle => write!(f, "circle"),
            Shape::Square => write!(f, "square"),
        }
    }
}

/// Flat ink color used for the border and every glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct InkColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl InkColor {
    /// Traditional seal vermilion
    pub const VERMILION: InkColor = InkColor::rgb(200, 30, 30);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim().strip_prefix('#')?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        match hex.len() {
            3 => {
                let mut it = hex
                    .chars()
                    .map(|c| c.to_digit(16).map(|d| (d * 17) as u8));
                Some(Self::rgb(it.next()??, it.next()??, it.next()??))
            }
            6 => Some(Self::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Self::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
            _ => None,
        }
    }

    /// Lowercase `#rrggbb` form (alpha dropped)
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl Default for InkColor {
    fn default() -> Self {
        Self::VERMILION
    }
}

/// Per-row character counts, top row first
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct RowPlan(Vec<usize>);

impl RowPlan {
    pub fn new(rows: Vec<usize>) -> Self {
        Self(rows)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    /// Total number of characters the plan places
    pub fn char_count(&self) -> usize {
        self.0.iter().sum()
    }

    pub fn row_count(&self) -> usize {
        self.0.len()
    }

    /// Length of the widest row (0 for an empty plan)
    pub fn max_row_len(&self) -> usize {
        self.0.iter().copied().max().unwrap_or(0)
    }

    pub fn into_inner(self) -> Vec<usize> {
        self.0
    }
}

impl Deref for RowPlan {
    type Target = [usize];

    fn deref(&self) -> &[usize] {
        &self.0
    }
}

impl From<Vec<usize>> for RowPlan {
    fn from(rows: Vec<usize>) -> Self {
        Self(rows)
    }
}

impl fmt::Display for RowPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|n| n.to_string()).collect();
        write!(f, "{}", parts.join("+"))
    }
}

/// Uniform cell edge and inter-cell gap shared by every character
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct CellGeometry {
    pub cell_size: f64,
    pub gap: f64,
}

impl CellGeometry {
    /// Center-to-center distance between neighbouring cells
    pub fn pitch(&self) -> f64 {
        self.cell_size + self.gap
    }

    /// Extent of `n` cells laid side by side
    pub fn span(&self, n: usize) -> f64 {
        if n == 0 {
            return 0.0;
        }
        n as f64 * self.cell_size + (n - 1) as f64 * self.gap
    }
}

/// Target center of one character
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CharacterPlacement {
    #[serde(rename = "char")]
    pub ch: char,
    pub center_x: f64,
    pub center_y: f64,
}

impl CharacterPlacement {
    pub fn center(&self) -> Point {
        Point::new(self.center_x, self.center_y)
    }

    /// The square cell this character occupies
    pub fn cell_box(&self, cell: &CellGeometry) -> BoundingBox {
        BoundingBox::centered(self.center(), cell.cell_size)
    }
}

/// A complete layout plan, ready for raster or vector rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StampLayout {
    pub shape: Shape,
    pub row_plan: RowPlan,
    pub cell: CellGeometry,
    pub gap_ratio: f64,
    /// Pixel size glyphs are rasterized at (cell size times the glyph fill factor)
    pub glyph_size: f64,
    pub placements: Vec<CharacterPlacement>,
}

impl StampLayout {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    /// Placements grouped by row, top row first
    pub fn rows(&self) -> Vec<&[CharacterPlacement]> {
        let mut rows = Vec::with_capacity(self.row_plan.row_count());
        let mut start = 0;
        for &len in self.row_plan.iter() {
            let end = (start + len).min(self.placements.len());
            rows.push(&self.placements[start..end]);
            start = end;
        }
        rows
    }
}
