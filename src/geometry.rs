//! Rectangles in the two coordinate spaces the pipeline moves between.
//!
//! ```text
//! raster pixels (CandidateBox)
//!     ──rescale──▶ page units (SlideRegion)
//!     ──unrotate + flip──▶ PDF user space (PdfBox)
//! ```
//!
//! Raster and page coordinates describe the page as displayed, `/Rotate`
//! applied, with a top-left origin and y growing down. PDF user space has its
//! origin at the bottom-left of the unrotated page box.

use serde::Serialize;

/// Native dimensions of a page in document units (PDF points).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned bounding rectangle of one contour, in raster pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CandidateBox {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl CandidateBox {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Pixel area. Widened so large rasters cannot overflow.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// Linearly rescale into page units for a raster of `raster_width` x
    /// `raster_height` pixels covering exactly `page`.
    pub fn to_region(&self, raster_width: u32, raster_height: u32, page: PageSize) -> SlideRegion {
        let sx = page.width / f64::from(raster_width);
        let sy = page.height / f64::from(raster_height);
        SlideRegion {
            x: f64::from(self.x) * sx,
            y: f64::from(self.y) * sy,
            width: f64::from(self.width) * sx,
            height: f64::from(self.height) * sy,
        }
    }
}

/// One detected slide, in page units of the displayed page with a top-left
/// origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SlideRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SlideRegion {
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    pub fn size(&self) -> PageSize {
        PageSize::new(self.width, self.height)
    }

    /// Whether the region lies inside a page of the given size, allowing
    /// `epsilon` of floating-point slack on the far edges.
    pub fn is_within(&self, page: PageSize, epsilon: f64) -> bool {
        self.x >= 0.0
            && self.y >= 0.0
            && self.right() <= page.width + epsilon
            && self.bottom() <= page.height + epsilon
    }
}

/// A rectangle in PDF user space: `(x0, y0)` bottom-left, `(x1, y1)` top-right.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PdfBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl PdfBox {
    /// Build from two arbitrary corners; PDF arrays need not be normalized.
    pub fn from_corners(ax: f64, ay: f64, bx: f64, by: f64) -> Self {
        Self {
            x0: ax.min(bx),
            y0: ay.min(by),
            x1: ax.max(bx),
            y1: ay.max(by),
        }
    }

    pub fn width(&self) -> f64 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    pub fn size(&self) -> PageSize {
        PageSize::new(self.width(), self.height())
    }

    /// Size of the page as displayed with `rotation` applied.
    pub fn display_size(&self, rotation: Rotation) -> PageSize {
        if rotation.swaps_axes() {
            PageSize::new(self.height(), self.width())
        } else {
            self.size()
        }
    }

    /// Map a region of the displayed page into PDF user space.
    ///
    /// `region` is measured from the top-left corner of this box as it
    /// appears after turning it clockwise by `rotation`.
    pub fn region_to_user_space(&self, region: &SlideRegion, rotation: Rotation) -> PdfBox {
        let (u0, u1, v0, v1) = (region.x, region.right(), region.y, region.bottom());
        let (ax, ay, bx, by) = match rotation {
            Rotation::None => (self.x0 + u0, self.y1 - v1, self.x0 + u1, self.y1 - v0),
            Rotation::Quarter => (self.x0 + v0, self.y0 + u0, self.x0 + v1, self.y0 + u1),
            Rotation::Half => (self.x1 - u1, self.y0 + v0, self.x1 - u0, self.y0 + v1),
            Rotation::ThreeQuarter => (self.x1 - v1, self.y1 - u1, self.x1 - v0, self.y1 - u0),
        };
        PdfBox::from_corners(ax, ay, bx, by)
    }
}

/// Clockwise page rotation from a page's `/Rotate` entry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    /// Normalize a `/Rotate` value. Negative angles count counter-clockwise;
    /// values that are not a multiple of 90 are invalid and read as none.
    pub fn from_degrees(degrees: i64) -> Self {
        match degrees.rem_euclid(360) {
            90 => Self::Quarter,
            180 => Self::Half,
            270 => Self::ThreeQuarter,
            _ => Self::None,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Self::None => 0,
            Self::Quarter => 90,
            Self::Half => 180,
            Self::ThreeQuarter => 270,
        }
    }

    /// Whether the displayed page is the stored page turned on its side.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Self::Quarter | Self::ThreeQuarter)
    }

    /// The `cm` matrix `[a b c d e f]` that draws the user-space rectangle
    /// `clip` upright on an output page, scaled by `sx` and `sy` along the
    /// output axes, with the clip's displayed top-left corner at the top-left
    /// of the output page.
    pub fn placement_matrix(self, clip: &PdfBox, sx: f64, sy: f64) -> [f64; 6] {
        match self {
            Self::None => [sx, 0.0, 0.0, sy, -sx * clip.x0, -sy * clip.y0],
            Self::Quarter => [0.0, -sy, sx, 0.0, -sx * clip.y0, sy * clip.x1],
            Self::Half => [-sx, 0.0, 0.0, -sy, sx * clip.x1, sy * clip.y1],
            Self::ThreeQuarter => [0.0, sy, -sx, 0.0, sx * clip.y1, -sy * clip.x0],
        }
    }
}
