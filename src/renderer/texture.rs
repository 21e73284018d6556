//! Post-processing stages applied after the deterministic render
//!
//! Stages only ever see the finished image, so layout and glyph placement
//! stay reproducible whether or not a stage runs.

use image::RgbaImage;

use crate::layout::{BoundarySpec, Shape};

/// A finishing pass over a rendered stamp
pub trait PostProcess {
    fn apply(&self, image: &mut RgbaImage, boundary: &BoundarySpec);
}

/// Worn-impression texture: jitters the brightness of random inked pixels.
///
/// The same seed always produces the same texture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InkTexture {
    pub seed: u64,
    /// Fraction of canvas pixels sampled
    pub density: f64,
    /// Maximum red-channel shift, at most 255; green and blue shift by half
    pub variation: i32,
}

impl InkTexture {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            density: 0.001,
            variation: 20,
        }
    }

    pub fn with_density(mut self, density: f64) -> Self {
        self.density = density;
        self
    }

    pub fn with_variation(mut self, variation: i32) -> Self {
        self.variation = variation;
        self
    }
}

impl PostProcess for InkTexture {
    fn apply(&self, image: &mut RgbaImage, boundary: &BoundarySpec) {
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return;
        }
        let samples = (width as f64 * height as f64 * self.density.max(0.0)) as u64;
        let variation = self.variation.unsigned_abs().min(255) as i32;
        let center = boundary.center();
        // Outer edge of the border stroke
        let extent = boundary.outer_extent() + boundary.border_width_px() / 2.0;
        let mut rng = XorShift::new(self.seed);

        for _ in 0..samples {
            let x = rng.below(width as u64) as u32;
            let y = rng.below(height as u64) as u32;
            let shift = rng.below(2 * variation as u64 + 1) as i32 - variation;

            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            let inside = match boundary.shape() {
                Shape::Circle => dx.hypot(dy) < extent,
                Shape::Square => dx.abs().max(dy.abs()) < extent,
            };
            if !inside {
                continue;
            }

            let pixel = image.get_pixel_mut(x, y);
            if pixel.0[3] == 0 {
                continue;
            }
            let [r, g, b, a] = pixel.0;
            pixel.0 = [
                shifted(r, shift),
                shifted(g, shift / 2),
                shifted(b, shift / 2),
                a,
            ];
        }
    }
}

fn shifted(channel: u8, shift: i32) -> u8 {
    (channel as i32 + shift).clamp(0, 255) as u8
}

/// Small deterministic PRNG; quality only needs to beat the eye
struct XorShift {
    state: u64,
}

impl XorShift {
    fn new(seed: u64) -> Self {
        let state = seed ^ 0x9E37_79B9_7F4A_7C15;
        Self {
            state: if state == 0 { 1 } else { state },
        }
    }

    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }

    fn below(&mut self, max: u64) -> u64 {
        self.next_u64() % max.max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn inked_canvas() -> RgbaImage {
        RgbaImage::from_pixel(64, 64, Rgba([200, 30, 30, 255]))
    }

    #[test]
    fn test_same_seed_same_texture() {
        let boundary = BoundarySpec::square(64).unwrap();
        let texture = InkTexture::new(7).with_density(0.5);
        let mut a = inked_canvas();
        let mut b = inked_canvas();
        texture.apply(&mut a, &boundary);
        texture.apply(&mut b, &boundary);
        assert_eq!(a.as_raw(), b.as_raw());
        assert_ne!(a.as_raw(), inked_canvas().as_raw());
    }

    #[test]
    fn test_different_seed_different_texture() {
        let boundary = BoundarySpec::square(64).unwrap();
        let mut a = inked_canvas();
        let mut b = inked_canvas();
        InkTexture::new(1).with_density(0.5).apply(&mut a, &boundary);
        InkTexture::new(2).with_density(0.5).apply(&mut b, &boundary);
        assert_ne!(a.as_raw(), b.as_raw());
    }

    #[test]
    fn test_transparent_pixels_untouched() {
        let boundary = BoundarySpec::circle(64).unwrap();
        let blank = RgbaImage::from_pixel(64, 64, Rgba([255, 255, 255, 0]));
        let mut image = blank.clone();
        InkTexture::new(3).with_density(2.0).apply(&mut image, &boundary);
        assert_eq!(image.as_raw(), blank.as_raw());
    }

    #[test]
    fn test_shift_stays_within_variation() {
        let boundary = BoundarySpec::square(64).unwrap();
        let mut image = inked_canvas();
        // One sample, so no pixel is shifted twice
        InkTexture::new(11)
            .with_density(1.0 / 4096.0)
            .with_variation(5)
            .apply(&mut image, &boundary);
        for pixel in image.pixels() {
            assert!((pixel.0[0] as i32 - 200).abs() <= 5);
            assert!((pixel.0[1] as i32 - 30).abs() <= 2);
            assert_eq!(pixel.0[3], 255);
        }
    }

    #[test]
    fn test_extreme_variation_is_clamped() {
        let boundary = BoundarySpec::square(64).unwrap();
        let mut image = inked_canvas();
        InkTexture::new(5)
            .with_density(0.5)
            .with_variation(i32::MIN)
            .apply(&mut image, &boundary);
        assert!(image.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_outer_half_of_border_is_textured() {
        let boundary = BoundarySpec::circle(64).unwrap();
        let center = boundary.center();
        let centerline = boundary.outer_extent();
        let outer_edge = centerline + boundary.border_width_px() / 2.0;
        let mut image = inked_canvas();
        InkTexture::new(13)
            .with_density(4.0)
            .apply(&mut image, &boundary);

        let mut band_changed = false;
        for (x, y, pixel) in image.enumerate_pixels() {
            let d = (x as f64 - center.x).hypot(y as f64 - center.y);
            let changed = pixel.0 != [200, 30, 30, 255];
            if d >= outer_edge {
                assert!(!changed, "pixel ({x}, {y}) outside the stroke was textured");
            } else if d > centerline && changed {
                band_changed = true;
            }
        }
        assert!(band_changed);
    }

    #[test]
    fn test_xorshift_never_sticks_at_zero() {
        let mut rng = XorShift::new(0x9E37_79B9_7F4A_7C15);
        assert_ne!(rng.next_u64(), 0);
    }
}
