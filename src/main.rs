//! Stamp Layout CLI
//!
//! Usage:
//!   stamp-layout [OPTIONS] <TEXT>...
//!
//! Options:
//!   --shape <circle|square>  Boundary shape
//!   --size <PX>              Canvas size in pixels
//!   --font <FILE>            TrueType/OpenType font for glyphs
//!   --plan                   Print the layout plan as JSON and exit
//!   --batch <DIR>            Render every text into DIR
//!   -h, --help               Print help

use std::collections::HashSet;
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use stamp_layout::{
    plan_with_config, render_batch, render_svg, render_with_config, render_with_lint,
    BlockGlyphs, BoundarySpec, FontGlyphs, GlyphMetricsProvider, InkTexture, Preset,
    RasterConfig, RenderConfig, Shape, SvgConfig, ThreeCharArrangement,
};

#[derive(Clone, Copy, ValueEnum)]
enum ShapeArg {
    Circle,
    Square,
}

impl From<ShapeArg> for Shape {
    fn from(arg: ShapeArg) -> Self {
        match arg {
            ShapeArg::Circle => Shape::Circle,
            ShapeArg::Square => Shape::Square,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ThreeCharArg {
    Triangle,
    Horizontal,
    Vertical,
}

impl From<ThreeCharArg> for ThreeCharArrangement {
    fn from(arg: ThreeCharArg) -> Self {
        match arg {
            ThreeCharArg::Triangle => ThreeCharArrangement::Triangle,
            ThreeCharArg::Horizontal => ThreeCharArrangement::Horizontal,
            ThreeCharArg::Vertical => ThreeCharArrangement::Vertical,
        }
    }
}

#[derive(Parser)]
#[command(name = "stamp-layout")]
#[command(about = "Lay out and render seal-style stamp images")]
struct Cli {
    /// Stamp text; several texts are allowed with --batch
    #[arg(required = true)]
    texts: Vec<String>,

    /// Boundary shape (overrides the preset)
    #[arg(long, value_enum)]
    shape: Option<ShapeArg>,

    /// Canvas size in pixels (overrides the preset)
    #[arg(long)]
    size: Option<u32>,

    /// Font file used to draw glyphs
    #[arg(long)]
    font: Option<PathBuf>,

    /// Face index inside a font collection
    #[arg(long, default_value_t = 0)]
    font_index: u32,

    /// Draw solid blocks instead of font glyphs
    #[arg(long, conflicts_with = "font")]
    block_glyphs: bool,

    /// Output PNG path
    #[arg(short, long, default_value = "stamp.png")]
    output: PathBuf,

    /// Also write an SVG preview to this path
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Print the layout plan as JSON and exit
    #[arg(long)]
    plan: bool,

    /// Preset file (TOML format)
    #[arg(short, long)]
    preset: Option<PathBuf>,

    /// Arrangement for three characters on a circle
    #[arg(long, value_enum)]
    three_char: Option<ThreeCharArg>,

    /// Apply the worn-ink texture with this seed
    #[arg(long)]
    texture_seed: Option<u64>,

    /// Draw center lines and cell outlines
    #[arg(short, long)]
    guides: bool,

    /// Report layout lint warnings
    #[arg(long)]
    lint: bool,

    /// Render every text into this directory
    #[arg(long, value_name = "DIR")]
    batch: Option<PathBuf>,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("stamp_layout=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let mut preset = match &cli.preset {
        Some(path) => Preset::from_file(path)
            .map_err(|e| format!("loading preset '{}': {}", path.display(), e))?,
        None => Preset::default(),
    };
    if let Some(shape) = cli.shape {
        preset.shape = shape.into();
    }
    if let Some(size) = cli.size {
        preset.canvas_size = size;
    }
    if let Some(arrangement) = cli.three_char {
        preset.layout.three_char = arrangement.into();
    }
    if let Some(seed) = cli.texture_seed {
        preset.texture = Some(match preset.texture {
            Some(texture) => InkTexture { seed, ..texture },
            None => InkTexture::new(seed),
        });
    }

    let boundary = preset.boundary()?;
    let config = RenderConfig::from(&preset)
        .with_raster(RasterConfig::new().with_guides(cli.guides))
        .with_lint(cli.lint);

    if cli.plan {
        let plans = cli
            .texts
            .iter()
            .map(|text| plan_with_config(text, &boundary, &config.layout))
            .collect::<Result<Vec<_>, _>>()?;
        let json = if plans.len() == 1 {
            serde_json::to_string_pretty(&plans[0])?
        } else {
            serde_json::to_string_pretty(&plans)?
        };
        println!("{}", json);
        return Ok(());
    }

    let glyphs = load_glyphs(&cli)?;

    if let Some(dir) = &cli.batch {
        return run_batch(&cli.texts, dir, &boundary, glyphs.as_ref(), &config);
    }

    let [text] = cli.texts.as_slice() else {
        return Err("multiple texts need --batch <DIR>".into());
    };

    let stamp = if cli.lint {
        let (stamp, warnings) = render_with_lint(text, &boundary, glyphs.as_ref(), &config)?;
        for warning in &warnings {
            eprintln!("lint[{}]: {}", warning.category, warning.message);
        }
        stamp
    } else {
        render_with_config(text, &boundary, glyphs.as_ref(), &config)?
    };

    stamp.save_png(&cli.output)?;
    info!(
        path = %cli.output.display(),
        rows = %stamp.layout.row_plan,
        cell_size = stamp.layout.cell.cell_size,
        "wrote stamp"
    );

    if let Some(path) = &cli.svg {
        let svg_config = SvgConfig::new().with_guides(cli.guides);
        fs::write(path, render_svg(&boundary, &stamp.layout, &svg_config))
            .map_err(|e| format!("writing '{}': {}", path.display(), e))?;
        info!(path = %path.display(), "wrote svg preview");
    }

    Ok(())
}

fn load_glyphs(cli: &Cli) -> Result<Box<dyn GlyphMetricsProvider + Sync>, Box<dyn Error>> {
    if cli.block_glyphs {
        return Ok(Box::new(BlockGlyphs));
    }
    match &cli.font {
        Some(path) => {
            let font = FontGlyphs::from_file(path, cli.font_index)
                .map_err(|e| format!("loading font '{}': {}", path.display(), e))?;
            Ok(Box::new(font))
        }
        None => Err("no font given; pass --font <FILE> or --block-glyphs".into()),
    }
}

fn run_batch(
    texts: &[String],
    dir: &Path,
    boundary: &BoundarySpec,
    glyphs: &(dyn GlyphMetricsProvider + Sync),
    config: &RenderConfig,
) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(dir)?;

    let results = render_batch(texts, boundary, glyphs, config);
    let mut used = HashSet::new();
    let mut failures = 0;

    for (text, result) in texts.iter().zip(results) {
        let stamp = match result {
            Ok(stamp) => stamp,
            Err(e) => {
                eprintln!("Error rendering '{}': {}", text, e);
                failures += 1;
                continue;
            }
        };
        let path = dir.join(batch_file_name(boundary.shape(), text, &mut used));
        stamp.save_png(&path)?;
        info!(path = %path.display(), "wrote stamp");
    }

    if failures > 0 {
        return Err(format!("{} of {} stamps failed", failures, texts.len()).into());
    }
    Ok(())
}

/// `stamp_<shape>_<n>char.png`, suffixed with a counter when `n` repeats
fn batch_file_name(shape: Shape, text: &str, used: &mut HashSet<String>) -> String {
    let stem = format!("stamp_{}_{}char", shape, text.chars().count());
    let mut name = format!("{stem}.png");
    let mut index = 2;
    while !used.insert(name.clone()) {
        name = format!("{stem}_{index}.png");
        index += 1;
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_file_names() {
        let mut used = HashSet::new();
        assert_eq!(
            batch_file_name(Shape::Square, "대한민국", &mut used),
            "stamp_square_4char.png"
        );
        assert_eq!(
            batch_file_name(Shape::Square, "가나다라", &mut used),
            "stamp_square_4char_2.png"
        );
        assert_eq!(
            batch_file_name(Shape::Circle, "합격", &mut used),
            "stamp_circle_2char.png"
        );
    }

    #[test]
    fn test_cli_parses() {
        let cli = Cli::try_parse_from([
            "stamp-layout",
            "--shape",
            "square",
            "--size",
            "512",
            "--block-glyphs",
            "--three-char",
            "vertical",
            "대한민국",
        ])
        .unwrap();
        assert!(cli.block_glyphs);
        assert_eq!(cli.size, Some(512));
        assert_eq!(cli.texts, vec!["대한민국".to_string()]);
    }
}
