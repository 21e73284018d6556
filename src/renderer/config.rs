//! Configuration for raster and SVG rendering

use crate::layout::InkColor;

/// Configuration options for raster output
#[derive(Debug, Clone, PartialEq)]
pub struct RasterConfig {
    /// Draw center lines and cell outlines over the stamp
    pub guides: bool,

    /// Color used for guides
    pub guide_color: InkColor,
}

impl Default for RasterConfig {
    fn default() -> Self {
        Self {
            guides: false,
            guide_color: InkColor::rgba(60, 60, 100, 150),
        }
    }
}

impl RasterConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable guide overlay
    pub fn with_guides(mut self, guides: bool) -> Self {
        self.guides = guides;
        self
    }

    /// Set the guide color
    pub fn with_guide_color(mut self, color: InkColor) -> Self {
        self.guide_color = color;
        self
    }
}

/// Configuration options for SVG output
#[derive(Debug, Clone)]
pub struct SvgConfig {
    /// Whether to include XML declaration
    pub standalone: bool,

    /// Whether to format output with indentation
    pub pretty_print: bool,

    /// Prefix for CSS class names (e.g., "stamp-" for "stamp-glyph")
    pub class_prefix: Option<String>,

    /// Font family written on glyph text elements
    pub font_family: Option<String>,

    /// Draw center lines and cell rectangles
    pub guides: bool,
}

impl Default for SvgConfig {
    fn default() -> Self {
        Self {
            standalone: true,
            pretty_print: true,
            class_prefix: Some("stamp-".to_string()),
            font_family: None,
            guides: false,
        }
    }
}

impl SvgConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether output is standalone
    pub fn with_standalone(mut self, standalone: bool) -> Self {
        self.standalone = standalone;
        self
    }

    /// Set whether to pretty-print output
    pub fn with_pretty_print(mut self, pretty: bool) -> Self {
        self.pretty_print = pretty;
        self
    }

    /// Set the CSS class prefix
    pub fn with_class_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.class_prefix = Some(prefix.into());
        self
    }

    /// Remove the CSS class prefix
    pub fn without_class_prefix(mut self) -> Self {
        self.class_prefix = None;
        self
    }

    /// Set the font family for glyph text
    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = Some(family.into());
        self
    }

    /// Enable or disable guide overlay
    pub fn with_guides(mut self, guides: bool) -> Self {
        self.guides = guides;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SvgConfig::default();
        assert!(config.standalone);
        assert!(config.pretty_print);
        assert_eq!(config.class_prefix, Some("stamp-".to_string()));
        assert!(!config.guides);
        assert!(!RasterConfig::default().guides);
    }

    #[test]
    fn test_builder_pattern() {
        let config = SvgConfig::new()
            .with_standalone(false)
            .with_pretty_print(false)
            .with_class_prefix("my-")
            .with_font_family("Noto Serif CJK KR")
            .with_guides(true);

        assert!(!config.standalone);
        assert!(!config.pretty_print);
        assert_eq!(config.class_prefix, Some("my-".to_string()));
        assert_eq!(config.font_family.as_deref(), Some("Noto Serif CJK KR"));
        assert!(config.guides);

        let raster = RasterConfig::new()
            .with_guides(true)
            .with_guide_color(InkColor::rgb(0, 0, 0));
        assert!(raster.guides);
        assert_eq!(raster.guide_color, InkColor::rgb(0, 0, 0));
    }
}
