//! SVG preview tests

use stamp_layout::{plan, render_svg, BoundarySpec, InkColor, SvgConfig};

fn text_elements(svg: &str) -> Vec<&str> {
    svg.lines().filter(|l| l.contains("<text")).collect()
}

#[test]
fn test_preview_matches_layout() {
    let boundary = BoundarySpec::circle(1024).unwrap();
    let layout = plan("매드스탬프", &boundary).unwrap();
    let svg = render_svg(&boundary, &layout, &SvgConfig::default());

    assert!(svg.contains("<circle class=\"stamp-border\""));
    let texts = text_elements(&svg);
    assert_eq!(texts.len(), 5);
    for (line, placement) in texts.iter().zip(&layout.placements) {
        assert!(line.contains(&format!(">{}</text>", placement.ch)));
        let x = format!("x=\"{}\"", (placement.center_x * 1000.0).round() / 1000.0);
        assert!(line.contains(&x), "{line} missing {x}");
    }
}

#[test]
fn test_preview_uses_glyph_size_and_font() {
    let boundary = BoundarySpec::square(500).unwrap();
    let layout = plan("印", &boundary).unwrap();
    let config = SvgConfig::new().with_font_family("Noto Serif CJK KR");
    let svg = render_svg(&boundary, &layout, &config);

    let size = (layout.glyph_size * 1000.0).round() / 1000.0;
    assert!(svg.contains(&format!("font-size=\"{}\"", size)));
    assert!(svg.contains("font-family=\"Noto Serif CJK KR\""));
}

#[test]
fn test_preview_carries_ink() {
    let boundary = BoundarySpec::circle(200)
        .unwrap()
        .with_ink(InkColor::rgba(0, 0, 128, 128));
    let layout = plan("합격", &boundary).unwrap();
    let svg = render_svg(&boundary, &layout, &SvgConfig::default());
    assert!(svg.contains("stroke=\"#000080\""));
    assert!(svg.contains("fill=\"#000080\""));
    assert!(svg.contains("opacity=\"0.502\""));
}

#[test]
fn test_fragment_output() {
    let boundary = BoundarySpec::circle(100).unwrap();
    let layout = plan("", &boundary).unwrap();
    let svg = render_svg(&boundary, &layout, &SvgConfig::new().with_standalone(false));
    assert!(svg.starts_with("<svg"));
    assert!(svg.ends_with("</svg>"));
}
