//! lutgen - LUT generator command line
//!
//! Matches the colors of an image to a reference, previews the result and
//! exports the transform as `.cube`, `.3dl` and `.look` LUTs.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use image::codecs::jpeg::JpegEncoder;
use image::RgbaImage;
use lutgen_color::{compute_stats, GradingSession};
use lutgen_core::PixelBuffer;
use lutgen_export::{parse_cube, ExportBundle, ExportFormat, BUNDLE_FILE_NAME};
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

mod config;

use config::LutGenConfig;

#[derive(Parser)]
#[command(name = "lutgen")]
#[command(author, version, about = "Generate color-matching 3D LUTs from a reference image")]
#[command(long_about = "
Transfers the color statistics of a reference image onto an original image,
optionally applies tone adjustments, and exports the resulting transform as
a 3D LUT bundle.

Examples:
  lutgen generate shot.jpg look.jpg                       # writes custom-lut-pack.zip
  lutgen generate shot.jpg look.jpg --size 64 --preview preview.jpg
  lutgen generate shot.jpg look.jpg --contrast 20 --vibrance -10 -o grade.zip
  lutgen generate shot.jpg look.jpg --format 3dl --lut-out grade.3dl
  lutgen stats shot.jpg
  lutgen apply shot.jpg grade.cube -o graded.png
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a LUT from an original and a reference image
    #[command(visible_alias = "g")]
    Generate(GenerateArgs),

    /// Print per-channel color statistics as JSON
    Stats(StatsArgs),

    /// Apply an existing .cube LUT to an image
    Apply(ApplyArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Image to be recolored
    original: PathBuf,

    /// Image whose colors are matched
    reference: PathBuf,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Points per LUT axis
    #[arg(short, long)]
    size: Option<usize>,

    #[arg(long, allow_hyphen_values = true)]
    brightness: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    contrast: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    saturation: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    temperature: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    tint: Option<i32>,
    #[arg(long, allow_hyphen_values = true)]
    vibrance: Option<i32>,

    /// Creator name written into file headers
    #[arg(long)]
    creator: Option<String>,

    /// Write the adjusted preview image here
    #[arg(short, long)]
    preview: Option<PathBuf>,

    /// Zip bundle output path
    #[arg(short, long, default_value = BUNDLE_FILE_NAME)]
    output: PathBuf,

    /// Also write a single LUT file in this format (cube, 3dl, look)
    #[arg(short, long, requires = "lut_out")]
    format: Option<ExportFormat>,

    /// Output path for --format
    #[arg(long)]
    lut_out: Option<PathBuf>,
}

#[derive(Args)]
struct StatsArgs {
    image: PathBuf,
}

#[derive(Args)]
struct ApplyArgs {
    image: PathBuf,

    /// .cube LUT file
    lut: PathBuf,

    /// Output image path
    #[arg(short, long)]
    output: PathBuf,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder().with_env_filter(filter).finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Generate(args) => run_generate(args),
        Commands::Stats(args) => run_stats(args),
        Commands::Apply(args) => run_apply(args),
    }
}

/// Layer command-line flags over the loaded configuration.
fn apply_overrides(config: &mut LutGenConfig, args: &GenerateArgs) {
    if let Some(size) = args.size {
        config.lut_size = size;
    }
    let adj = &mut config.adjustments;
    let sliders = [
        (&mut adj.brightness, args.brightness),
        (&mut adj.contrast, args.contrast),
        (&mut adj.saturation, args.saturation),
        (&mut adj.temperature, args.temperature),
        (&mut adj.tint, args.tint),
        (&mut adj.vibrance, args.vibrance),
    ];
    for (slot, value) in sliders {
        if let Some(v) = value {
            *slot = v;
        }
    }
    if let Some(creator) = &args.creator {
        config.export.creator = creator.clone();
    }
}

fn run_generate(args: GenerateArgs) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => LutGenConfig::load(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => LutGenConfig::default(),
    };
    apply_overrides(&mut config, &args);
    config.validate()?;

    let original = load_image(&args.original)?;
    let reference = load_image(&args.reference)?;

    let mut session = GradingSession::process(&original, &reference, config.lut_size)?;
    let preview = if config.adjustments.is_identity() {
        session.preview()
    } else {
        session.set_adjustments(config.adjustments)?
    };

    if let Some(path) = &args.preview {
        save_image(&preview, path, config.preview_quality)?;
        info!(path = %path.display(), "Preview written");
    }

    let bundle = ExportBundle::new(session.lut(), config.export.clone());
    bundle
        .write_zip(&args.output)
        .with_context(|| format!("Failed to write {}", args.output.display()))?;

    if let (Some(format), Some(path)) = (args.format, &args.lut_out) {
        let text = bundle.render(format)?;
        std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(%format, path = %path.display(), "LUT written");
    }

    Ok(())
}

fn run_stats(args: StatsArgs) -> Result<()> {
    let image = load_image(&args.image)?;
    let stats = compute_stats(&image)?;
    println!("{}", serde_json::to_string_pretty(&stats)?);
    Ok(())
}

fn run_apply(args: ApplyArgs) -> Result<()> {
    let image = load_image(&args.image)?;
    let text = std::fs::read_to_string(&args.lut)
        .with_context(|| format!("Failed to read {}", args.lut.display()))?;
    let lut = parse_cube(&text).with_context(|| format!("Invalid LUT {}", args.lut.display()))?;
    info!(size = lut.size(), "Applying LUT");
    let graded = lut.apply_to_image(&image);
    save_image(&graded, &args.output, config::DEFAULT_PREVIEW_QUALITY)
}

/// Decode any supported image file into an RGBA8 buffer.
fn load_image(path: &Path) -> Result<PixelBuffer> {
    let decoded = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgba8();
    let (width, height) = decoded.dimensions();
    Ok(PixelBuffer::from_rgba8(width, height, decoded.into_raw())?)
}

/// Encode a buffer to disk. JPEG output drops alpha and uses `quality`;
/// other formats are chosen from the file extension.
fn save_image(buffer: &PixelBuffer, path: &Path, quality: u8) -> Result<()> {
    let rgba = RgbaImage::from_raw(buffer.width(), buffer.height(), buffer.as_bytes().to_vec())
        .context("Pixel buffer does not match its dimensions")?;

    let is_jpeg = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("jpg") || e.eq_ignore_ascii_case("jpeg"))
        .unwrap_or(false);

    if is_jpeg {
        let rgb = image::DynamicImage::ImageRgba8(rgba).to_rgb8();
        let file = std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?;
        let mut writer = std::io::BufWriter::new(file);
        JpegEncoder::new_with_quality(&mut writer, quality).encode_image(&rgb)?;
    } else {
        rgba.save(path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_generate(extra: &[&str]) -> GenerateArgs {
        let mut argv = vec!["lutgen", "generate", "a.png", "b.png"];
        argv.extend_from_slice(extra);
        match Cli::try_parse_from(argv).unwrap().command {
            Commands::Generate(args) => args,
            _ => panic!("expected generate"),
        }
    }

    #[test]
    fn test_cli_defaults() {
        let args = parse_generate(&[]);
        assert_eq!(args.output, PathBuf::from("custom-lut-pack.zip"));
        assert!(args.size.is_none());
        assert!(args.format.is_none());
    }

    #[test]
    fn test_negative_slider_values() {
        let args = parse_generate(&["--contrast", "-40", "--tint", "15"]);
        assert_eq!(args.contrast, Some(-40));
        assert_eq!(args.tint, Some(15));
    }

    #[test]
    fn test_overrides_layer_on_config() {
        let mut config = LutGenConfig::default();
        config.adjustments.vibrance = 30;
        config.adjustments.brightness = 10;

        let args = parse_generate(&["--size", "64", "--brightness", "-5", "--creator", "Me"]);
        apply_overrides(&mut config, &args);

        assert_eq!(config.lut_size, 64);
        assert_eq!(config.adjustments.brightness, -5);
        // Untouched by flags
        assert_eq!(config.adjustments.vibrance, 30);
        assert_eq!(config.export.creator, "Me");
    }

    #[test]
    fn test_format_requires_lut_out() {
        let argv = ["lutgen", "generate", "a.png", "b.png", "--format", "cube"];
        assert!(Cli::try_parse_from(argv).is_err());
        let args = parse_generate(&["--format", ".3dl", "--lut-out", "x.3dl"]);
        assert_eq!(args.format, Some(ExportFormat::ThreeDl));
    }

    #[test]
    fn test_image_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pattern.png");
        let buffer = PixelBuffer::test_pattern(32, 4);
        save_image(&buffer, &path, 95).unwrap();
        assert_eq!(load_image(&path).unwrap(), buffer);
    }

    #[test]
    fn test_jpeg_preview_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("preview.jpg");
        save_image(&PixelBuffer::gradient(16, 16), &path, 90).unwrap();
        let loaded = load_image(&path).unwrap();
        assert_eq!((loaded.width(), loaded.height()), (16, 16));
    }
}
