//! `slidesplit` - Split two-slides-per-page handouts into one slide per page
//!
//! # Features
//!
//! - **Region detection**: rasterize a page, threshold dark borders, trace
//!   outermost contours and keep slide-sized boxes, top first
//! - **Resolution independence**: boxes are mapped back to native page units,
//!   so crops are exact regardless of the rasterization zoom
//! - **Lossless crops**: output pages reuse the source page content as a
//!   Form XObject; nothing is re-encoded as an image
//! - **Tunable**: zoom, threshold, area floor and slides per page come from
//!   `~/.config/slidesplit/config.toml` or CLI flags
//!
//! # Example
//!
//! ```rust,no_run
//! use slidesplit::{process_document, SplitConfig};
//!
//! fn main() -> anyhow::Result<()> {
//!     let config = SplitConfig::load(None)?;
//!     let (path, report) = process_document(
//!         "handout.pdf".as_ref(),
//!         Some("slides.pdf".as_ref()),
//!         &config,
//!         |p| eprintln!("{:.0}%", p * 100.0),
//!     )?;
//!     println!("{} slides written to {}", report.output_pages, path.display());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod detect;
pub mod document;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod splitter;

pub use config::{DetectorConfig, SplitConfig, SplitterConfig};
pub use detect::{select_top_regions, RegionDetector};
pub use document::{OutputDocument, PdfLayout, PdfWriter, SourceDocument};
pub use error::{Result, SplitError};
pub use geometry::{CandidateBox, PageSize, PdfBox, Rotation, SlideRegion};
pub use raster::RasterImage;
pub use splitter::{process_document, save_output, PageSplitter, SplitReport};

/// Version of slidesplit
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
