//! In-memory document doubles shared by the integration tests.
//!
//! `SyntheticSource` draws black-bordered boxes on a white raster at whatever
//! zoom the detector asks for; `RecordingOutput` remembers every page it is
//! asked to create.

#![allow(dead_code)]

use std::path::Path;

use image::Rgb;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect;
use slidesplit::{OutputDocument, PageSize, RasterImage, Result, SlideRegion, SourceDocument};

/// A box in native page units: (x, y, width, height).
pub type NativeBox = (f64, f64, f64, f64);

/// A5-ish page used across scenarios.
pub const PAGE: PageSize = PageSize {
    width: 150.0,
    height: 200.0,
};

/// Two 100 x 75 boxes stacked vertically; 400 x 300 px each at zoom 4.
pub const TWO_SLIDES: [NativeBox; 2] = [(25.0, 12.5, 100.0, 75.0), (25.0, 112.5, 100.0, 75.0)];

pub struct SyntheticSource {
    pub size: PageSize,
    pub pages: Vec<Vec<NativeBox>>,
}

impl SyntheticSource {
    pub fn new(pages: Vec<Vec<NativeBox>>) -> Self {
        Self { size: PAGE, pages }
    }
}

impl SourceDocument for SyntheticSource {
    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn page_size(&self, _index: usize) -> Result<PageSize> {
        Ok(self.size)
    }

    fn render_page(&self, index: usize, zoom_x: f32, zoom_y: f32) -> Result<RasterImage> {
        Ok(draw_frames(self.size, &self.pages[index], zoom_x, zoom_y))
    }
}

/// A white raster of `size` at the given zoom with a three-pixel black frame,
/// like a printed slide border, around each box.
pub fn draw_frames(size: PageSize, boxes: &[NativeBox], zoom_x: f32, zoom_y: f32) -> RasterImage {
    let (zx, zy) = (f64::from(zoom_x), f64::from(zoom_y));
    let width = (size.width * zx).round() as u32;
    let height = (size.height * zy).round() as u32;
    let mut raster = RasterImage::blank(width, height);
    for &(x, y, w, h) in boxes {
        let (left, top) = ((x * zx).round() as i32, (y * zy).round() as i32);
        let (w, h) = ((w * zx).round() as u32, (h * zy).round() as u32);
        for inset in 0..3u32 {
            let at = inset as i32;
            let rect = Rect::at(left + at, top + at).of_size(w - 2 * inset, h - 2 * inset);
            draw_hollow_rect_mut(raster.pixels_mut(), rect, Rgb([0, 0, 0]));
        }
    }
    raster
}

/// One page as the splitter asked for it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecordedPage {
    pub size: PageSize,
    pub source_page: Option<usize>,
    pub clip: Option<SlideRegion>,
}

#[derive(Default)]
pub struct RecordingOutput {
    pub pages: Vec<RecordedPage>,
    pub saved: bool,
}

impl OutputDocument for RecordingOutput {
    fn new_page(&mut self, size: PageSize) -> Result<usize> {
        self.pages.push(RecordedPage {
            size,
            source_page: None,
            clip: None,
        });
        Ok(self.pages.len() - 1)
    }

    fn show_region(&mut self, page: usize, source_page: usize, clip: &SlideRegion) -> Result<()> {
        let recorded = &mut self.pages[page];
        recorded.source_page = Some(source_page);
        recorded.clip = Some(*clip);
        Ok(())
    }

    fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn save(&mut self, _path: &Path) -> Result<()> {
        self.saved = true;
        Ok(())
    }
}

pub fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-6
}
