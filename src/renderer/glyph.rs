//! Glyph metrics providers
//!
//! The renderer never loads fonts itself. It asks a [`GlyphMetricsProvider`]
//! for a glyph's ink bounds and for its coverage pixels, so any rendering
//! backend can be plugged in.

use std::path::Path;

use rusttype::{point, Font, Scale};
use thiserror::Error;

use crate::layout::Point;

/// Errors that can occur when loading a font
#[derive(Error, Debug)]
pub enum FontError {
    #[error("Failed to read font file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Font data is not a valid TrueType/OpenType face (index {index})")]
    InvalidFont { index: u32 },
}

/// Tight box around a glyph's visible pixels, relative to its draw origin
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlyphInkBounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl GlyphInkBounds {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    pub fn center(&self) -> Point {
        Point::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }
}

/// Source of glyph geometry and coverage.
///
/// The draw origin is the top-left corner of the glyph's line box: ink
/// bounds are reported relative to it, and `rasterize` places the glyph
/// so that the same bounds land at `origin + bounds`.
pub trait GlyphMetricsProvider {
    /// Ink bounds of `ch` at `px` pixels, or `None` if it draws nothing
    fn ink_bounds(&self, ch: char, px: f64) -> Option<GlyphInkBounds>;

    /// Emit `(x, y, coverage)` for every pixel `ch` touches when drawn at `origin`
    fn rasterize(&self, ch: char, px: f64, origin: Point, plot: &mut dyn FnMut(i32, i32, f32));
}

/// TrueType/OpenType glyphs rendered with rusttype
pub struct FontGlyphs {
    font: Font<'static>,
}

impl FontGlyphs {
    /// Load face `index` of a font file (`.ttf`, `.otf` or `.ttc`)
    pub fn from_file(path: &Path, index: u32) -> Result<Self, FontError> {
        let data = std::fs::read(path)?;
        Self::from_bytes(data, index)
    }

    /// Load face `index` from in-memory font data
    pub fn from_bytes(data: Vec<u8>, index: u32) -> Result<Self, FontError> {
        let font =
            Font::try_from_vec_and_index(data, index).ok_or(FontError::InvalidFont { index })?;
        Ok(Self { font })
    }

    fn ascent(&self, scale: Scale) -> f32 {
        self.font.v_metrics(scale).ascent
    }
}

impl GlyphMetricsProvider for FontGlyphs {
    fn ink_bounds(&self, ch: char, px: f64) -> Option<GlyphInkBounds> {
        let scale = Scale::uniform(px as f32);
        let ascent = self.ascent(scale);
        let bb = self.font.glyph(ch).scaled(scale).exact_bounding_box()?;
        Some(GlyphInkBounds {
            left: bb.min.x as f64,
            top: (bb.min.y + ascent) as f64,
            right: bb.max.x as f64,
            bottom: (bb.max.y + ascent) as f64,
        })
    }

    fn rasterize(&self, ch: char, px: f64, origin: Point, plot: &mut dyn FnMut(i32, i32, f32)) {
        let scale = Scale::uniform(px as f32);
        let baseline = point(origin.x as f32, origin.y as f32 + self.ascent(scale));
        let glyph = self.font.glyph(ch).scaled(scale).positioned(baseline);
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                plot(gx as i32 + bb.min.x, gy as i32 + bb.min.y, v);
            });
        }
    }
}

/// Draws every non-whitespace character as a solid block of ink.
///
/// The block covers the middle 80% of the em box horizontally and sits on
/// the lower 80% vertically, like a glyph resting on a baseline. Useful for
/// layout previews and tests without a font file.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockGlyphs;

impl GlyphMetricsProvider for BlockGlyphs {
    fn ink_bounds(&self, ch: char, px: f64) -> Option<GlyphInkBounds> {
        if ch.is_whitespace() || px <= 0.0 {
            return None;
        }
        Some(GlyphInkBounds {
            left: 0.1 * px,
            top: 0.2 * px,
            right: 0.9 * px,
            bottom: px,
        })
    }

    fn rasterize(&self, ch: char, px: f64, origin: Point, plot: &mut dyn FnMut(i32, i32, f32)) {
        let Some(bounds) = self.ink_bounds(ch, px) else {
            return;
        };
        let (left, right) = (origin.x + bounds.left, origin.x + bounds.right);
        let (top, bottom) = (origin.y + bounds.top, origin.y + bounds.bottom);

        for y in top.floor() as i32..bottom.ceil() as i32 {
            let cover_y = overlap(y as f64, top, bottom);
            for x in left.floor() as i32..right.ceil() as i32 {
                let coverage = overlap(x as f64, left, right) * cover_y;
                if coverage > 0.0 {
                    plot(x, y, coverage as f32);
                }
            }
        }
    }
}

/// Length of the intersection of pixel `[p, p + 1)` with `[lo, hi)`
fn overlap(p: f64, lo: f64, hi: f64) -> f64 {
    ((p + 1.0).min(hi) - p.max(lo)).max(0.0)
}
