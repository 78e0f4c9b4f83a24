use clap::Parser;
use std::path::PathBuf;

use svgpng::{DEFAULT_DESTINATION, DEFAULT_SOURCE, FitMode};

#[derive(Parser, Debug)]
#[command(name = "svgpng", version, about = "Rasterize SVG icons to PNG")]
pub struct CliArgs {
    /// Input SVG file (single file mode)
    #[arg(short, long, default_value = DEFAULT_SOURCE)]
    pub input: PathBuf,

    /// Output PNG file (single file mode); overwritten if it exists
    #[arg(short, long, default_value = DEFAULT_DESTINATION)]
    pub output: PathBuf,

    /// Input directory containing SVG files (batch mode)
    #[arg(long)]
    pub input_dir: Option<PathBuf>,

    /// Output directory for batch conversion (batch mode)
    #[arg(long)]
    pub output_dir: Option<PathBuf>,

    /// Batch mode: continue with the remaining files when one fails
    #[arg(long, default_value_t = false)]
    pub batch: bool,

    /// JSON file with conversion parameters; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output size. Options:
    /// - Exact: "1024x1024" or "1024" for a square
    /// - One side: "512x" or "x512" (other side follows the aspect ratio)
    /// - Original: "original" (document size times --scale)
    /// Defaults to 1024x1024.
    #[arg(long)]
    pub size: Option<String>,

    /// How the drawing is placed when the output aspect ratio differs
    #[arg(long, value_enum)]
    pub fit: Option<FitMode>,

    /// Scale factor applied with --size original
    #[arg(long)]
    pub scale: Option<f32>,

    /// Resolution for physical units (mm, in, pt)
    #[arg(long)]
    pub dpi: Option<f32>,

    /// Background color (#rgb, #rrggbb, #rrggbbaa, white, black, transparent)
    #[arg(long)]
    pub background: Option<String>,

    /// Invert the colors of the drawing
    #[arg(long, default_value_t = false)]
    pub negate_colors: bool,

    /// Write a JSON metadata sidecar next to each PNG
    #[arg(long, default_value_t = false)]
    pub sidecar: bool,

    /// Enable logging
    #[arg(long, default_value_t = false)]
    pub log: bool,
}
