//! `slidesplit` CLI - Split two-slides-per-page PDFs into one slide per page

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use slidesplit::SplitConfig;

#[derive(Parser)]
#[command(name = "slidesplit")]
#[command(about = "Split PDF pages holding two stacked slides into one slide per page")]
#[command(version)]
struct Cli {
    /// Verbose logging (debug level)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file (default: ~/.config/slidesplit/config.toml)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Detector and splitter overrides shared by `split` and `detect`.
#[derive(Args, Debug, Default)]
pub struct TuningArgs {
    /// Rasterization zoom for both axes
    #[arg(long)]
    zoom: Option<f32>,

    /// Horizontal rasterization zoom (overrides --zoom)
    #[arg(long)]
    zoom_x: Option<f32>,

    /// Vertical rasterization zoom (overrides --zoom)
    #[arg(long)]
    zoom_y: Option<f32>,

    /// Luminance (0-255) at or below which a pixel is treated as slide border
    #[arg(short, long)]
    threshold: Option<u8>,

    /// Minimum candidate area in raster pixels
    #[arg(long)]
    min_area: Option<u64>,

    /// Slides to extract per page, top first
    #[arg(short = 'n', long)]
    regions: Option<usize>,
}

impl TuningArgs {
    fn apply(&self, config: &mut SplitConfig) {
        let detector = &mut config.detector;
        if let Some(zoom) = self.zoom {
            detector.zoom_x = zoom;
            detector.zoom_y = zoom;
        }
        if let Some(zoom_x) = self.zoom_x {
            detector.zoom_x = zoom_x;
        }
        if let Some(zoom_y) = self.zoom_y {
            detector.zoom_y = zoom_y;
        }
        if let Some(threshold) = self.threshold {
            detector.threshold = threshold;
        }
        if let Some(min_area) = self.min_area {
            detector.min_area = min_area;
        }
        if let Some(regions) = self.regions {
            config.splitter.regions_per_page = regions;
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Split a PDF so every detected slide gets its own page
    Split {
        /// Input PDF
        input: PathBuf,

        /// Output PDF (default: <input>_slides.pdf next to the input)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Suppress the progress display
        #[arg(short, long)]
        quiet: bool,

        /// Print the split report as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print the slide regions found on each page without writing anything
    Detect {
        /// Input PDF
        input: PathBuf,

        /// Only this page (1-based)
        #[arg(short, long)]
        page: Option<usize>,

        /// Print regions as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        tuning: TuningArgs,
    },

    /// Print the effective configuration as TOML
    Config {
        #[command(flatten)]
        tuning: TuningArgs,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = SplitConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Split {
            input,
            output,
            quiet,
            json,
            tuning,
        } => {
            tuning.apply(&mut config);
            config.validate()?;
            cmd::split::cmd_split(&input, output, &config, quiet, json)?;
        }
        Commands::Detect {
            input,
            page,
            json,
            tuning,
        } => {
            tuning.apply(&mut config);
            config.validate()?;
            cmd::detect::cmd_detect(&input, page, &config, json)?;
        }
        Commands::Config { tuning } => {
            tuning.apply(&mut config);
            config.validate()?;
            cmd::config::cmd_config(&config, cli.config.as_deref())?;
        }
    }

    Ok(())
}

/// Logs go to stderr; `RUST_LOG` wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "slidesplit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
