//! Renderers for stamp layouts
//!
//! `raster` paints the boundary and glyphs into an RGBA image, `texture`
//! holds optional finishing passes, and `svg` writes a vector preview of the
//! same plan.

pub mod config;
pub mod glyph;
pub mod raster;
pub mod svg;
pub mod texture;

pub use config::{RasterConfig, SvgConfig};
pub use glyph::{BlockGlyphs, FontError, FontGlyphs, GlyphInkBounds, GlyphMetricsProvider};
pub use raster::render_raster;
pub use svg::render_svg;
pub use texture::{InkTexture, PostProcess};
