//! Stamp Layout - a layout engine for seal-style stamp images
//!
//! Given a short text and a circular or square boundary, the engine picks a
//! row arrangement, solves for the largest uniform cell that fits, places
//! each character on a symmetric grid and paints the result onto a
//! transparent RGBA canvas.
//!
//! # Example
//!
//! ```rust
//! use stamp_layout::{render, BlockGlyphs, BoundarySpec};
//!
//! let boundary = BoundarySpec::circle(256).unwrap();
//! let stamp = render("印章", &boundary, &BlockGlyphs).unwrap();
//! assert_eq!(stamp.image.dimensions(), (256, 256));
//! assert_eq!(stamp.layout.placements.len(), 2);
//! ```

pub mod layout;
pub mod preset;
pub mod renderer;

pub use layout::{
    BoundarySpec, CellGeometry, CharacterPlacement, CircleOverflow, InkColor, LayoutConfig,
    LayoutError, LintWarning, RowPlan, Shape, StampLayout, ThreeCharArrangement,
};
pub use preset::{Preset, PresetError};
pub use renderer::{
    render_svg, BlockGlyphs, FontError, FontGlyphs, GlyphMetricsProvider, InkTexture,
    PostProcess, RasterConfig, SvgConfig,
};

use std::path::Path;

use image::{ImageFormat, RgbaImage};
use rayon::prelude::*;
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during the render pipeline
#[derive(Debug, Error)]
pub enum RenderError {
    /// Error during layout
    #[error("layout error: {0}")]
    Layout(#[from] LayoutError),

    /// Error encoding or writing the image
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Configuration for the complete render pipeline
#[derive(Debug, Clone, Default)]
pub struct RenderConfig {
    /// Layout configuration
    pub layout: LayoutConfig,
    /// Raster output configuration
    pub raster: RasterConfig,
    /// Optional worn-ink texture applied after rendering
    pub texture: Option<InkTexture>,
    /// Run the layout lint and log its findings
    pub lint: bool,
}

impl RenderConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the layout configuration
    pub fn with_layout(mut self, config: LayoutConfig) -> Self {
        self.layout = config;
        self
    }

    /// Set the raster configuration
    pub fn with_raster(mut self, config: RasterConfig) -> Self {
        self.raster = config;
        self
    }

    /// Apply an ink texture after rendering
    pub fn with_texture(mut self, texture: InkTexture) -> Self {
        self.texture = Some(texture);
        self
    }

    /// Enable or disable lint logging
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

impl From<&Preset> for RenderConfig {
    fn from(preset: &Preset) -> Self {
        Self {
            layout: preset.layout.clone(),
            texture: preset.texture,
            ..Self::default()
        }
    }
}

/// A rendered stamp together with the plan that produced it
#[derive(Debug, Clone)]
pub struct Stamp {
    pub image: RgbaImage,
    pub layout: StampLayout,
}

impl Stamp {
    /// Write the image as a PNG, preserving transparency
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        self.image.save_with_format(path, ImageFormat::Png)?;
        Ok(())
    }
}

/// Compute the layout plan for `text` without rendering
pub fn plan(text: &str, boundary: &BoundarySpec) -> Result<StampLayout, LayoutError> {
    plan_with_config(text, boundary, &LayoutConfig::default())
}

/// Compute the layout plan with custom layout configuration
pub fn plan_with_config(
    text: &str,
    boundary: &BoundarySpec,
    config: &LayoutConfig,
) -> Result<StampLayout, LayoutError> {
    layout::compute(text, boundary, config)
}

/// Render `text` inside `boundary` with default configuration
pub fn render<P>(text: &str, boundary: &BoundarySpec, glyphs: &P) -> Result<Stamp, RenderError>
where
    P: GlyphMetricsProvider + ?Sized,
{
    render_with_config(text, boundary, glyphs, &RenderConfig::default())
}

/// Render with custom configuration
///
/// # Example
///
/// ```rust
/// use stamp_layout::{render_with_config, BlockGlyphs, BoundarySpec, InkTexture, RenderConfig};
///
/// let boundary = BoundarySpec::square(128).unwrap();
/// let config = RenderConfig::new().with_texture(InkTexture::new(7));
/// let a = render_with_config("대한민국", &boundary, &BlockGlyphs, &config).unwrap();
/// let b = render_with_config("대한민국", &boundary, &BlockGlyphs, &config).unwrap();
/// assert_eq!(a.image.as_raw(), b.image.as_raw());
/// ```
pub fn render_with_config<P>(
    text: &str,
    boundary: &BoundarySpec,
    glyphs: &P,
    config: &RenderConfig,
) -> Result<Stamp, RenderError>
where
    P: GlyphMetricsProvider + ?Sized,
{
    let (stamp, warnings) = render_inner(text, boundary, glyphs, config, config.lint)?;
    for warning in &warnings {
        warn!(category = %warning.category, "{}", warning.message);
    }
    Ok(stamp)
}

/// Render and return the layout lint findings alongside the stamp
pub fn render_with_lint<P>(
    text: &str,
    boundary: &BoundarySpec,
    glyphs: &P,
    config: &RenderConfig,
) -> Result<(Stamp, Vec<LintWarning>), RenderError>
where
    P: GlyphMetricsProvider + ?Sized,
{
    render_inner(text, boundary, glyphs, config, true)
}

/// Render many texts against one boundary in parallel.
///
/// Results come back in input order; one failing text does not stop the
/// others.
pub fn render_batch<S, P>(
    texts: &[S],
    boundary: &BoundarySpec,
    glyphs: &P,
    config: &RenderConfig,
) -> Vec<Result<Stamp, RenderError>>
where
    S: AsRef<str> + Sync,
    P: GlyphMetricsProvider + Sync + ?Sized,
{
    debug!(count = texts.len(), shape = %boundary.shape(), "rendering batch");
    texts
        .par_iter()
        .map(|text| render_with_config(text.as_ref(), boundary, glyphs, config))
        .collect()
}

fn render_inner<P>(
    text: &str,
    boundary: &BoundarySpec,
    glyphs: &P,
    config: &RenderConfig,
    lint: bool,
) -> Result<(Stamp, Vec<LintWarning>), RenderError>
where
    P: GlyphMetricsProvider + ?Sized,
{
    let layout = layout::compute(text, boundary, &config.layout)?;
    let warnings = if lint {
        layout::lint::check(&layout, boundary)
    } else {
        Vec::new()
    };

    let mut image = renderer::render_raster(boundary, &layout, glyphs, &config.raster);
    if let Some(texture) = &config.texture {
        texture.apply(&mut image, boundary);
    }

    Ok((Stamp { image, layout }, warnings))
}
