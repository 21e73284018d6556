//! Raster rendering of stamp layouts onto a transparent RGBA canvas

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_hollow_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;

use crate::layout::{BoundarySpec, InkColor, Point, Shape, StampLayout};

use super::config::RasterConfig;
use super::glyph::GlyphMetricsProvider;

/// Render the boundary stroke and every placed glyph.
///
/// Each glyph is positioned so the center of its ink bounds lands exactly
/// on the placement's target center. `layout` must have been computed for
/// `boundary`; a plan for the other shape is a caller bug.
pub fn render_raster<P>(
    boundary: &BoundarySpec,
    layout: &StampLayout,
    glyphs: &P,
    config: &RasterConfig,
) -> RgbaImage
where
    P: GlyphMetricsProvider + ?Sized,
{
    debug_assert_eq!(
        layout.shape,
        boundary.shape(),
        "layout was computed for a different boundary shape"
    );
    let size = boundary.canvas_size();
    let mut image = RgbaImage::from_pixel(size, size, Rgba([255, 255, 255, 0]));

    stroke_boundary(&mut image, boundary);
    draw_glyphs(&mut image, boundary.ink(), layout, glyphs);

    if config.guides {
        draw_guides(&mut image, boundary, layout, config.guide_color);
    }

    image
}

/// Anti-aliased outline centered on the boundary's outer extent
fn stroke_boundary(image: &mut RgbaImage, boundary: &BoundarySpec) {
    let half_width = boundary.border_width_px() / 2.0;
    if half_width <= 0.0 {
        return;
    }
    let center = boundary.center();
    let extent = boundary.outer_extent();
    let ink = boundary.ink();
    let shape = boundary.shape();

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f64 + 0.5 - center.x;
        let dy = y as f64 + 0.5 - center.y;
        let distance = match shape {
            Shape::Circle => dx.hypot(dy),
            Shape::Square => dx.abs().max(dy.abs()),
        };
        let coverage = (half_width + 0.5 - (distance - extent).abs()).clamp(0.0, 1.0);
        if coverage > 0.0 {
            blend(pixel, ink, coverage as f32);
        }
    }
}

fn draw_glyphs<P>(image: &mut RgbaImage, ink: InkColor, layout: &StampLayout, glyphs: &P)
where
    P: GlyphMetricsProvider + ?Sized,
{
    let (width, height) = (image.width() as i32, image.height() as i32);
    for placement in &layout.placements {
        let Some(bounds) = glyphs.ink_bounds(placement.ch, layout.glyph_size) else {
            continue;
        };
        let ink_center = bounds.center();
        let origin = Point::new(
            placement.center_x - ink_center.x,
            placement.center_y - ink_center.y,
        );
        glyphs.rasterize(placement.ch, layout.glyph_size, origin, &mut |x, y, coverage| {
            if x < 0 || y < 0 || x >= width || y >= height {
                return;
            }
            blend(image.get_pixel_mut(x as u32, y as u32), ink, coverage);
        });
    }
}

fn draw_guides(image: &mut RgbaImage, boundary: &BoundarySpec, layout: &StampLayout, color: InkColor) {
    let color = to_rgba(color);
    let center = boundary.center();
    let safe = boundary.safe_extent();
    let (cx, cy) = (center.x as f32, center.y as f32);
    let s = safe as f32;

    draw_line_segment_mut(image, (cx - s, cy), (cx + s, cy), color);
    draw_line_segment_mut(image, (cx, cy - s), (cx, cy + s), color);

    let side = layout.cell.cell_size.round().max(1.0) as u32;
    for placement in &layout.placements {
        let cell = placement.cell_box(&layout.cell);
        let rect = Rect::at(cell.x.round() as i32, cell.y.round() as i32).of_size(side, side);
        draw_hollow_rect_mut(image, rect, color);
    }
}

pub(crate) fn to_rgba(color: InkColor) -> Rgba<u8> {
    Rgba([color.r, color.g, color.b, color.a])
}

/// Source-over composite of `ink` at `coverage` onto a straight-alpha pixel
fn blend(dst: &mut Rgba<u8>, ink: InkColor, coverage: f32) {
    let src_alpha = ink.a as f32 / 255.0 * coverage.clamp(0.0, 1.0);
    if src_alpha <= 0.0 {
        return;
    }
    let dst_alpha = dst.0[3] as f32 / 255.0;
    let out_alpha = src_alpha + dst_alpha * (1.0 - src_alpha);
    let mix = |src: u8, dst: u8| {
        let value = (src as f32 * src_alpha + dst as f32 * dst_alpha * (1.0 - src_alpha)) / out_alpha;
        value.round().clamp(0.0, 255.0) as u8
    };
    dst.0 = [
        mix(ink.r, dst.0[0]),
        mix(ink.g, dst.0[1]),
        mix(ink.b, dst.0[2]),
        (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8,
    ];
}
