use clap::Parser;
use std::path::PathBuf;

use iconfit::{CanvasSize, Color, ResampleFilter};

#[derive(Parser, Debug)]
#[command(
    name = "iconfit",
    version,
    about = "Trim, fit and center images into square icons"
)]
pub struct CliArgs {
    /// Source image (single-source mode)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Destination file; repeat for several outputs. Format follows the extension
    #[arg(short, long = "output")]
    pub outputs: Vec<PathBuf>,

    /// Write the web-app icon pair (pwa-icon.png 512, apple-touch-icon.png 180) into this directory
    #[arg(long, conflicts_with = "outputs")]
    pub web_app_dir: Option<PathBuf>,

    /// Input directory containing source images (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory for batch processing (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Batch mode: keep going after an image fails instead of stopping at the first error
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// JSON file with normalization parameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Canvas size: a single side (512) or WxH (512x384). Default 512
    #[arg(long)]
    pub size: Option<CanvasSize>,

    /// Background color: #rrggbb, #rrggbbaa, r,g,b or black/white. Default black
    #[arg(long)]
    pub background: Option<Color>,

    /// Trim gain applied to each channel difference before the bias
    #[arg(long)]
    pub gain: Option<f32>,

    /// Trim bias subtracted after the gain
    #[arg(long, conflicts_with = "tolerance")]
    pub bias: Option<f32>,

    /// Shorthand for gain 1 and bias N: channel differences up to N are background
    #[arg(long)]
    pub tolerance: Option<u8>,

    /// Fit the whole source without trimming background padding
    #[arg(long, default_value_t = false)]
    pub no_trim: bool,

    /// Resampling filter (lanczos3, catmull-rom, mitchell, bilinear, area)
    #[arg(long, value_enum)]
    pub filter: Option<ResampleFilter>,

    /// JPEG quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: Option<u8>,

    /// Write a JSON report of the run to this file (single-source and web-app modes)
    #[arg(long, conflicts_with_all = ["input_dir", "batch"])]
    pub report: Option<PathBuf>,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
