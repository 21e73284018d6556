//! SVG generation from stamp layouts
//!
//! The vector preview reuses the computed plan: the boundary outline, one
//! `<text>` per character centered on its target, and optional guides.
//! Glyphs are left as live text, so the final look depends on the viewer's
//! font; tracing to outlines belongs to downstream tools.

use crate::layout::{BoundarySpec, Shape, StampLayout};

use super::SvgConfig;

/// Build SVG elements incrementally
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
    indent: usize,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
            indent: 1,
        }
    }

    fn prefix(&self) -> String {
        self.config.class_prefix.clone().unwrap_or_default()
    }

    fn indent_str(&self) -> String {
        if self.config.pretty_print {
            "  ".repeat(self.indent)
        } else {
            String::new()
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a circle outline
    pub fn add_circle(&mut self, class: &str, cx: f64, cy: f64, r: f64, styles: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<circle class="{}{}" cx="{}" cy="{}" r="{}"{}/>"#,
            self.indent_str(),
            prefix,
            class,
            num(cx),
            num(cy),
            num(r),
            styles
        ));
    }

    /// Add a rectangle
    pub fn add_rect(&mut self, class: &str, x: f64, y: f64, w: f64, h: f64, styles: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<rect class="{}{}" x="{}" y="{}" width="{}" height="{}"{}/>"#,
            self.indent_str(),
            prefix,
            class,
            num(x),
            num(y),
            num(w),
            num(h),
            styles
        ));
    }

    /// Add a line element
    pub fn add_line(&mut self, class: &str, x1: f64, y1: f64, x2: f64, y2: f64, styles: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<line class="{}{}" x1="{}" y1="{}" x2="{}" y2="{}"{}/>"#,
            self.indent_str(),
            prefix,
            class,
            num(x1),
            num(y1),
            num(x2),
            num(y2),
            styles
        ));
    }

    /// Add one glyph, centered on `(x, y)` both ways
    pub fn add_glyph(&mut self, ch: char, x: f64, y: f64, styles: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<text class="{}glyph" x="{}" y="{}" text-anchor="middle" dominant-baseline="central"{}>{}</text>"#,
            self.indent_str(),
            prefix,
            num(x),
            num(y),
            styles,
            escape_xml(&ch.to_string())
        ));
    }

    /// Add a group element with a class
    pub fn start_group(&mut self, class: &str) {
        let prefix = self.prefix();
        self.elements.push(format!(
            r#"{}<g class="{}{}">"#,
            self.indent_str(),
            prefix,
            class
        ));
        self.indent += 1;
    }

    /// Close a group element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Build the final SVG string for a square canvas of `size` pixels
    pub fn build(self, size: u32) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{size}" height="{size}" viewBox="0 0 {size} {size}">"#
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// Render a stamp layout to an SVG string
pub fn render_svg(boundary: &BoundarySpec, layout: &StampLayout, config: &SvgConfig) -> String {
    let mut builder = SvgBuilder::new(config.clone());
    let ink = boundary.ink();
    let color = ink.to_hex();
    let opacity = if ink.a < 255 {
        format!(r#" opacity="{}""#, num(ink.a as f64 / 255.0))
    } else {
        String::new()
    };

    let center = boundary.center();
    let extent = boundary.outer_extent();
    let border_styles = format!(
        r#" fill="none" stroke="{}" stroke-width="{}"{}"#,
        color,
        num(boundary.border_width_px()),
        opacity
    );
    match boundary.shape() {
        Shape::Circle => builder.add_circle("border", center.x, center.y, extent, &border_styles),
        Shape::Square => builder.add_rect(
            "border",
            center.x - extent,
            center.y - extent,
            extent * 2.0,
            extent * 2.0,
            &border_styles,
        ),
    }

    if config.guides {
        render_guides(&mut builder, boundary, layout);
    }

    if !layout.is_empty() {
        let family = config
            .font_family
            .as_ref()
            .map(|f| format!(r#" font-family="{}""#, escape_xml(f)))
            .unwrap_or_default();
        let glyph_styles = format!(
            r#" font-size="{}" fill="{}"{}{}"#,
            num(layout.glyph_size),
            color,
            opacity,
            family
        );

        builder.start_group("glyphs");
        for placement in layout.placements.iter().filter(|p| !p.ch.is_whitespace()) {
            builder.add_glyph(
                placement.ch,
                placement.center_x,
                placement.center_y,
                &glyph_styles,
            );
        }
        builder.end_group();
    }

    builder.build(boundary.canvas_size())
}

fn render_guides(builder: &mut SvgBuilder, boundary: &BoundarySpec, layout: &StampLayout) {
    let center = boundary.center();
    let safe = boundary.safe_extent();
    let styles = r##" fill="none" stroke="#3c3c64" stroke-opacity="0.6" stroke-width="1""##;

    builder.start_group("overlay");
    builder.add_line("guide", center.x - safe, center.y, center.x + safe, center.y, styles);
    builder.add_line("guide", center.x, center.y - safe, center.x, center.y + safe, styles);
    for placement in &layout.placements {
        let cell = placement.cell_box(&layout.cell);
        builder.add_rect("cell", cell.x, cell.y, cell.width, cell.height, styles);
    }
    builder.end_group();
}

/// Format a coordinate with at most three decimals
fn num(value: f64) -> String {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    format!("{}", rounded)
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::{compute, LayoutConfig};

    #[test]
    fn test_num_rounding() {
        assert_eq!(num(1.0), "1");
        assert_eq!(num(1.23456), "1.235");
        assert_eq!(num(-0.0001), "0");
    }

    #[test]
    fn test_escape_xml() {
        assert_eq!(escape_xml("<a&b>"), "&lt;a&amp;b&gt;");
        assert_eq!(escape_xml("\"'"), "&quot;&apos;");
    }

    #[test]
    fn test_render_circle_stamp() {
        let boundary = BoundarySpec::circle(1000).unwrap();
        let layout = compute("합격단체", &boundary, &LayoutConfig::default()).unwrap();
        let svg = render_svg(&boundary, &layout, &SvgConfig::default());

        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"viewBox="0 0 1000 1000""#));
        assert!(svg.contains(r#"<circle class="stamp-border" cx="500" cy="500" r="470""#));
        assert!(svg.contains(r##"stroke="#c81e1e""##));
        assert_eq!(svg.matches("<text").count(), 4);
        for ch in ['합', '격', '단', '체'] {
            assert!(svg.contains(&format!(">{ch}</text>")));
        }
        assert!(!svg.contains("stamp-guide"));
    }

    #[test]
    fn test_render_square_with_guides() {
        let boundary = BoundarySpec::square(1000).unwrap();
        let layout = compute("대한민국만", &boundary, &LayoutConfig::default()).unwrap();
        let config = SvgConfig::new().with_guides(true).with_pretty_print(false);
        let svg = render_svg(&boundary, &layout, &config);

        assert!(svg.contains(r#"<rect class="stamp-border" x="30" y="30" width="940" height="940""#));
        assert_eq!(svg.matches("stamp-guide").count(), 2);
        assert_eq!(svg.matches("stamp-cell").count(), 5);
        assert!(!svg.contains('\n'));
    }

    #[test]
    fn test_whitespace_not_emitted() {
        let boundary = BoundarySpec::circle(500).unwrap();
        let layout = compute("a b", &boundary, &LayoutConfig::default()).unwrap();
        let svg = render_svg(&boundary, &layout, &SvgConfig::default());
        assert_eq!(svg.matches("<text").count(), 2);
    }

    #[test]
    fn test_empty_layout_border_only() {
        let boundary = BoundarySpec::circle(500).unwrap();
        let layout = compute("", &boundary, &LayoutConfig::default()).unwrap();
        let svg = render_svg(&boundary, &layout, &SvgConfig::new().without_class_prefix());
        assert!(svg.contains(r#"<circle class="border""#));
        assert!(!svg.contains("<g"));
    }
}
