//! Document I/O seams.
//!
//! The split pipeline only needs a handful of services from a document
//! library: page count and size, rasterizing a page, allocating an output
//! page, and copying a clipped region of a source page into it.
//!
//! | Service | Trait | PDF implementation |
//! |---------|-------|--------------------|
//! | page count, page size | [`SourceDocument`] | [`PdfLayout`] (lopdf) |
//! | rasterize at zoom | [`SourceDocument`] | [`render::PdfSource`] (pdfium, feature `pdf`) |
//! | new page, copy region, save | [`OutputDocument`] | [`PdfWriter`] (lopdf) |

pub mod layout;
#[cfg(feature = "pdf")]
pub mod render;
pub mod writer;

use std::path::Path;

use crate::error::Result;
use crate::geometry::{PageSize, SlideRegion};
use crate::raster::RasterImage;

pub use layout::PdfLayout;
pub use writer::PdfWriter;

/// A read-only paged input.
pub trait SourceDocument {
    fn page_count(&self) -> usize;

    /// Native size of page `index` (0-based) as displayed, rotation applied.
    fn page_size(&self, index: usize) -> Result<PageSize>;

    /// Rasterize page `index` upright so the raster covers exactly the page
    /// rectangle, scaled by `zoom_x` horizontally and `zoom_y` vertically.
    fn render_page(&self, index: usize, zoom_x: f32, zoom_y: f32) -> Result<RasterImage>;
}

/// An append-only paged output.
pub trait OutputDocument {
    /// Append a blank page of exactly `size`; returns its 0-based index.
    fn new_page(&mut self, size: PageSize) -> Result<usize>;

    /// Fill output page `page` with the content of `clip` on source page
    /// `source_page`. `clip` is in the source page's displayed coordinates
    /// and is scaled to cover the whole output page, upright.
    fn show_region(&mut self, page: usize, source_page: usize, clip: &SlideRegion) -> Result<()>;

    fn page_count(&self) -> usize;

    /// Finalize and persist to `path`.
    fn save(&mut self, path: &Path) -> Result<()>;
}
