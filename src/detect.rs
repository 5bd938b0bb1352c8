//! Slide region detection.
//!
//! # Pipeline
//!
//! ```text
//! page → raster (zoom) → luminance → inverted threshold → external contours
//!      → bounding boxes → area filter → sort by top y → rescale to page units
//! ```
//!
//! Only outermost contours count: a bordered slide yields one box no matter
//! how much dark content it holds inside. Ordering is a stable sort on the
//! top edge alone, so boxes sharing a top y keep contour discovery order.

use image::GrayImage;
use imageproc::contours::{find_contours, Contour};

use crate::config::DetectorConfig;
use crate::document::SourceDocument;
use crate::error::Result;
use crate::geometry::{CandidateBox, PageSize, SlideRegion};
use crate::raster::{binarize_inverted, RasterImage};

/// Finds slide-shaped dark rectangles on rendered pages.
#[derive(Debug, Clone, Default)]
pub struct RegionDetector {
    config: DetectorConfig,
}

impl RegionDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Detect regions on page `index` of `source`, top first, in page units.
    ///
    /// An empty result is not an error; it just means nothing slide-sized
    /// was found.
    pub fn detect<S: SourceDocument + ?Sized>(
        &self,
        source: &S,
        index: usize,
    ) -> Result<Vec<SlideRegion>> {
        let page = source.page_size(index)?;
        let raster = source.render_page(index, self.config.zoom_x, self.config.zoom_y)?;
        let regions = self.detect_in_raster(&raster, page);
        tracing::debug!(
            "Page {}: {} region(s) in {}x{} px raster",
            index + 1,
            regions.len(),
            raster.width(),
            raster.height()
        );
        Ok(regions)
    }

    /// Detect on an already-rendered page that covers exactly `page`.
    pub fn detect_in_raster(&self, raster: &RasterImage, page: PageSize) -> Vec<SlideRegion> {
        if raster.width() == 0 || raster.height() == 0 {
            return Vec::new();
        }
        self.candidate_boxes(raster)
            .iter()
            .map(|b| b.to_region(raster.width(), raster.height(), page))
            .collect()
    }

    /// Filtered, ordered candidate boxes in raster pixels.
    pub fn candidate_boxes(&self, raster: &RasterImage) -> Vec<CandidateBox> {
        let binary = binarize_inverted(&raster.luminance(), self.config.threshold);
        let mut boxes: Vec<CandidateBox> = external_bounding_boxes(&binary)
            .into_iter()
            .filter(|b| b.area() >= self.config.min_area)
            .collect();
        // Stable: equal tops keep discovery order.
        boxes.sort_by_key(|b| b.y);
        boxes
    }
}

/// Bounding boxes of the outermost contours of the non-zero pixels in
/// `binary`, in discovery (raster scan) order.
pub fn external_bounding_boxes(binary: &GrayImage) -> Vec<CandidateBox> {
    let contours: Vec<Contour<u32>> = find_contours(binary);
    contours
        .iter()
        .filter(|c| c.parent.is_none())
        .filter_map(bounding_box)
        .collect()
}

/// Inclusive pixel extent of a contour, so a single pixel is 1x1.
fn bounding_box(contour: &Contour<u32>) -> Option<CandidateBox> {
    let first = contour.points.first()?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);
    for p in &contour.points[1..] {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }
    Some(CandidateBox::new(
        min_x,
        min_y,
        max_x - min_x + 1,
        max_y - min_y + 1,
    ))
}

/// Take the first `count` regions in detector order, or `None` if the page
/// has fewer than `count`.
pub fn select_top_regions(regions: &[SlideRegion], count: usize) -> Option<&[SlideRegion]> {
    regions.get(..count)
}
