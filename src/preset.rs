//! Stamp presets loaded from TOML
//!
//! A preset bundles everything that shapes a stamp apart from its text:
//! boundary geometry, ink, layout constants and the optional texture pass.
//! Every key is optional; missing keys fall back to the built-in defaults.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::layout::boundary::{DEFAULT_BORDER_WIDTH_RATIO, DEFAULT_INSET_RATIO, DEFAULT_MARGIN_RATIO};
use crate::layout::{
    BoundarySpec, CircleOverflow, InkColor, LayoutConfig, LayoutError, Shape, ThreeCharArrangement,
};
use crate::renderer::InkTexture;

/// Errors that can occur when loading or parsing presets
#[derive(Error, Debug)]
pub enum PresetError {
    #[error("Failed to read preset file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse preset TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Invalid ink color '{0}' (expected #rgb, #rrggbb or #rrggbbaa)")]
    InvalidColor(String),
    #[error("Invalid value for '{key}': {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

/// A complete stamp configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Preset {
    /// Optional name for the preset
    pub name: Option<String>,
    /// Optional description
    pub description: Option<String>,
    pub shape: Shape,
    pub canvas_size: u32,
    pub margin_ratio: f64,
    pub border_width_ratio: f64,
    pub inset_ratio: f64,
    pub ink: InkColor,
    pub layout: LayoutConfig,
    pub texture: Option<InkTexture>,
}

/// TOML structure for deserializing presets
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlPreset {
    metadata: Option<TomlMetadata>,
    boundary: Option<TomlBoundary>,
    layout: Option<TomlLayout>,
    texture: Option<TomlTexture>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
    description: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlBoundary {
    shape: Option<Shape>,
    canvas_size: Option<u32>,
    margin_ratio: Option<f64>,
    border_width_ratio: Option<f64>,
    inset_ratio: Option<f64>,
    ink: Option<String>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlLayout {
    circle_dense_gap_ratio: Option<f64>,
    circle_loose_gap_ratio: Option<f64>,
    square_gap_ratio: Option<f64>,
    circle_fill_factor: Option<f64>,
    circle_glyph_fill: Option<f64>,
    square_glyph_fill: Option<f64>,
    min_cell_size: Option<f64>,
    max_iterations: Option<usize>,
    three_char: Option<ThreeCharArrangement>,
    circle_overflow: Option<CircleOverflow>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTexture {
    seed: u64,
    density: Option<f64>,
    variation: Option<i32>,
}

/// Default preset - 1024px vermilion circle, no texture
const DEFAULT_PRESET: &str = r##"
[metadata]
name = "vermilion"
description = "Red circular seal on a transparent 1024px canvas"

[boundary]
shape = "circle"
canvas_size = 1024
ink = "#c81e1e"
"##;

impl Preset {
    /// Load preset from TOML file
    pub fn from_file(path: &Path) -> Result<Self, PresetError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load preset from TOML string
    pub fn from_str(content: &str) -> Result<Self, PresetError> {
        let parsed: TomlPreset = toml::from_str(content)?;
        let mut preset = Self::builtin();

        if let Some(meta) = parsed.metadata {
            preset.name = meta.name;
            preset.description = meta.description;
        }

        if let Some(b) = parsed.boundary {
            if let Some(shape) = b.shape {
                preset.shape = shape;
            }
            if let Some(size) = b.canvas_size {
                preset.canvas_size = size;
            }
            if let Some(ratio) = b.margin_ratio {
                preset.margin_ratio = ratio;
            }
            if let Some(ratio) = b.border_width_ratio {
                preset.border_width_ratio = ratio;
            }
            if let Some(ratio) = b.inset_ratio {
                preset.inset_ratio = ratio;
            }
            if let Some(ink) = b.ink {
                preset.ink = InkColor::from_hex(&ink).ok_or(PresetError::InvalidColor(ink))?;
            }
        }

        if let Some(l) = parsed.layout {
            let layout = &mut preset.layout;
            macro_rules! apply {
                ($($field:ident),*) => {
                    $(if let Some(value) = l.$field {
                        layout.$field = value;
                    })*
                };
            }
            apply!(
                circle_dense_gap_ratio,
                circle_loose_gap_ratio,
                square_gap_ratio,
                circle_fill_factor,
                circle_glyph_fill,
                square_glyph_fill,
                min_cell_size,
                max_iterations,
                three_char,
                circle_overflow
            );
        }

        if let Some(t) = parsed.texture {
            let mut texture = InkTexture::new(t.seed);
            if let Some(density) = t.density {
                texture = texture.with_density(density);
            }
            if let Some(variation) = t.variation {
                texture = texture.with_variation(variation);
            }
            preset.texture = Some(texture);
        }

        preset.validate()?;
        Ok(preset)
    }

    /// Defaults before any TOML is applied
    fn builtin() -> Self {
        Self {
            name: None,
            description: None,
            shape: Shape::Circle,
            canvas_size: 1024,
            margin_ratio: DEFAULT_MARGIN_RATIO,
            border_width_ratio: DEFAULT_BORDER_WIDTH_RATIO,
            inset_ratio: DEFAULT_INSET_RATIO,
            ink: InkColor::default(),
            layout: LayoutConfig::default(),
            texture: None,
        }
    }

    fn validate(&self) -> Result<(), PresetError> {
        let layout = &self.layout;
        for (key, value) in [
            ("circle_dense_gap_ratio", layout.circle_dense_gap_ratio),
            ("circle_loose_gap_ratio", layout.circle_loose_gap_ratio),
            ("square_gap_ratio", layout.square_gap_ratio),
            ("min_cell_size", layout.min_cell_size),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PresetError::InvalidValue {
                    key,
                    reason: format!("{value} must be a non-negative number"),
                });
            }
        }
        for (key, value) in [
            ("circle_fill_factor", layout.circle_fill_factor),
            ("circle_glyph_fill", layout.circle_glyph_fill),
            ("square_glyph_fill", layout.square_glyph_fill),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(PresetError::InvalidValue {
                    key,
                    reason: format!("{value} must be in (0, 1]"),
                });
            }
        }
        if layout.max_iterations == 0 {
            return Err(PresetError::InvalidValue {
                key: "max_iterations",
                reason: "must be at least 1".to_string(),
            });
        }
        if let Some(texture) = &self.texture {
            if !texture.density.is_finite() || texture.density < 0.0 {
                return Err(PresetError::InvalidValue {
                    key: "density",
                    reason: format!("{} must be a non-negative number", texture.density),
                });
            }
            if !(0..=255).contains(&texture.variation) {
                return Err(PresetError::InvalidValue {
                    key: "variation",
                    reason: format!("{} must be in 0..=255", texture.variation),
                });
            }
        }
        Ok(())
    }

    /// Build the boundary this preset describes
    pub fn boundary(&self) -> Result<BoundarySpec, LayoutError> {
        BoundarySpec::with_inset(
            self.shape,
            self.canvas_size,
            self.margin_ratio,
            self.border_width_ratio,
            self.inset_ratio,
        )
        .map(|b| b.with_ink(self.ink))
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::from_str(DEFAULT_PRESET).expect("Default preset should be valid TOML")
    }
}
