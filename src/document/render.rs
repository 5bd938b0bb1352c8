//! Page rasterization via `pdfium-render` (Chromium's PDF library).
//!
//! pdfium is bound at runtime: first a library next to the executable's
//! working directory, then the system library. Page geometry still comes from
//! [`PdfLayout`] so region coordinates and output composition share one view
//! of the page boxes. pdfium draws a page as displayed, `/Rotate` applied,
//! which is the orientation [`PdfLayout::page_size`] reports.

use std::path::Path;

use pdfium_render::prelude::*;

use super::layout::PdfLayout;
use super::SourceDocument;
use crate::error::{Result, SplitError};
use crate::geometry::PageSize;
use crate::raster::RasterImage;

/// A bound pdfium library.
pub struct PdfiumRasterizer {
    pdfium: Pdfium,
}

impl PdfiumRasterizer {
    /// Bind pdfium from `./` or the system library path.
    ///
    /// # Errors
    ///
    /// [`SplitError::RendererUnavailable`] if no pdfium library can be loaded.
    pub fn bind() -> Result<Self> {
        let bindings = Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path("./"))
            .or_else(|_| Pdfium::bind_to_system_library())
            .map_err(|e| SplitError::RendererUnavailable(format!("failed to bind pdfium: {e}")))?;
        Ok(Self {
            pdfium: Pdfium::new(bindings),
        })
    }

    /// Open `path` for both rendering and layout.
    pub fn open<'a>(&'a self, path: &Path) -> Result<PdfSource<'a>> {
        let layout = PdfLayout::open(path)?;
        let rendered = self
            .pdfium
            .load_pdf_from_file(path, None)
            .map_err(|e| SplitError::Input {
                path: path.to_path_buf(),
                reason: format!("pdfium: {e}"),
            })?;
        let rendered_pages = rendered.pages().len() as usize;
        if rendered_pages != layout.page_count() {
            return Err(SplitError::Input {
                path: path.to_path_buf(),
                reason: format!(
                    "page tree mismatch: pdfium sees {rendered_pages} pages, parser sees {}",
                    layout.page_count()
                ),
            });
        }
        Ok(PdfSource { layout, rendered })
    }
}

/// A PDF opened for detection.
pub struct PdfSource<'a> {
    layout: PdfLayout,
    rendered: PdfDocument<'a>,
}

impl PdfSource<'_> {
    pub fn layout(&self) -> &PdfLayout {
        &self.layout
    }
}

impl SourceDocument for PdfSource<'_> {
    fn page_count(&self) -> usize {
        self.layout.page_count()
    }

    fn page_size(&self, index: usize) -> Result<PageSize> {
        self.layout.page_size(index)
    }

    fn render_page(&self, index: usize, zoom_x: f32, zoom_y: f32) -> Result<RasterImage> {
        let render_err = |reason: String| SplitError::Render {
            page: index,
            reason,
        };
        // Displayed size, so both axes scale by their own zoom without skew.
        let size = self.layout.page_size(index)?;
        let page_index = u16::try_from(index)
            .map_err(|_| render_err("page index exceeds renderer limit".into()))?;
        let page = self
            .rendered
            .pages()
            .get(page_index)
            .map_err(|e| render_err(e.to_string()))?;

        let target_width = (size.width * f64::from(zoom_x)).round().max(1.0) as i32;
        let target_height = (size.height * f64::from(zoom_y)).round().max(1.0) as i32;
        let bitmap = page
            .render_with_config(
                &PdfRenderConfig::new()
                    .set_target_width(target_width)
                    .set_target_height(target_height)
                    .render_form_data(true)
                    .render_annotations(true),
            )
            .map_err(|e| render_err(e.to_string()))?;

        let raster = RasterImage::new(bitmap.as_image().to_rgb8());
        tracing::trace!(
            "Rendered page {} at {}x{} px",
            index + 1,
            raster.width(),
            raster.height()
        );
        Ok(raster)
    }
}
