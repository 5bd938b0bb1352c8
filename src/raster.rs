//! Rendered page pixels and the two pixel transforms the detector needs.

use image::{GrayImage, Luma, RgbImage};

/// A rendered page: 3 channels, 8 bits each, row-major.
#[derive(Debug, Clone)]
pub struct RasterImage {
    pixels: RgbImage,
}

impl RasterImage {
    pub fn new(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Wrap a packed RGB buffer. Returns `None` if the length does not match.
    pub fn from_raw(width: u32, height: u32, rgb: Vec<u8>) -> Option<Self> {
        RgbImage::from_raw(width, height, rgb).map(Self::new)
    }

    /// A white raster, the colour of an empty page.
    pub fn blank(width: u32, height: u32) -> Self {
        Self::new(RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255])))
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn pixels(&self) -> &RgbImage {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut RgbImage {
        &mut self.pixels
    }

    /// Single-channel luminance with ITU-R BT.601 weights applied in R, G, B
    /// channel order: red 0.299, green 0.587, blue 0.114.
    ///
    /// Fixed-point with 14 fractional bits, rounding to nearest. Saturated
    /// blue (29) is therefore dark enough to count as a border at the default
    /// threshold while saturated red (76) is not.
    pub fn luminance(&self) -> GrayImage {
        const R: u32 = 4899;
        const G: u32 = 9617;
        const B: u32 = 1868;
        const HALF: u32 = 1 << 13;

        let (width, height) = self.pixels.dimensions();
        let mut gray = GrayImage::new(width, height);
        for (src, dst) in self.pixels.pixels().zip(gray.pixels_mut()) {
            let [r, g, b] = src.0;
            let y = (u32::from(r) * R + u32::from(g) * G + u32::from(b) * B + HALF) >> 14;
            *dst = Luma([y.min(255) as u8]);
        }
        gray
    }
}

/// Inverted global threshold.
///
/// Pixels at or below `level` become foreground (255), everything brighter
/// becomes background (0). Dark slide borders end up as the foreground.
pub fn binarize_inverted(gray: &GrayImage, level: u8) -> GrayImage {
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (src, dst) in gray.pixels().zip(out.pixels_mut()) {
        *dst = Luma([if src.0[0] > level { 0 } else { 255 }]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn from_raw_rejects_short_buffer() {
        assert!(RasterImage::from_raw(2, 2, vec![0; 11]).is_none());
        assert!(RasterImage::from_raw(2, 2, vec![0; 12]).is_some());
    }

    #[test]
    fn luminance_of_primaries() {
        let mut img = RgbImage::new(4, 1);
        img.put_pixel(0, 0, Rgb([255, 255, 255]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        img.put_pixel(2, 0, Rgb([0, 255, 0]));
        img.put_pixel(3, 0, Rgb([0, 0, 255]));
        let gray = RasterImage::new(img).luminance();
        assert_eq!(gray.get_pixel(0, 0).0[0], 255);
        assert_eq!(gray.get_pixel(1, 0).0[0], 76);
        assert_eq!(gray.get_pixel(2, 0).0[0], 150);
        assert_eq!(gray.get_pixel(3, 0).0[0], 29);
    }

    #[test]
    fn saturated_blue_is_foreground_and_red_is_not() {
        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([0, 0, 255]));
        img.put_pixel(1, 0, Rgb([255, 0, 0]));
        let bin = binarize_inverted(&RasterImage::new(img).luminance(), 50);
        assert_eq!(bin.get_pixel(0, 0).0[0], 255);
        assert_eq!(bin.get_pixel(1, 0).0[0], 0);
    }

    #[test]
    fn binarize_boundary_is_inclusive() {
        let mut gray = GrayImage::new(3, 1);
        gray.put_pixel(0, 0, Luma([49]));
        gray.put_pixel(1, 0, Luma([50]));
        gray.put_pixel(2, 0, Luma([51]));
        let bin = binarize_inverted(&gray, 50);
        assert_eq!(bin.get_pixel(0, 0).0[0], 255);
        assert_eq!(bin.get_pixel(1, 0).0[0], 255);
        assert_eq!(bin.get_pixel(2, 0).0[0], 0);
    }

    #[test]
    fn blank_raster_has_no_foreground() {
        let raster = RasterImage::blank(16, 16);
        let bin = binarize_inverted(&raster.luminance(), 50);
        assert!(bin.pixels().all(|p| p.0[0] == 0));
    }
}
