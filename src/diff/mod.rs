pub mod contour;
pub mod draw;
pub mod engine;
pub mod mask;

use image::Rgb;

use crate::page::Page;

pub use engine::difference;

/// Components whose traced border encloses less than this area are noise.
pub const MIN_CONTOUR_AREA: f64 = 10.0;

/// Inward margin applied to a region before the background check.
pub const BACKGROUND_MARGIN: u32 = 20;

/// Number of fill-and-reextract rounds used to merge neighbouring regions.
pub const MERGE_ROUNDS: usize = 2;

/// Outward margin applied to every drawn rectangle.
pub const EXTEND_MARGIN: i64 = 1;

/// Line width value meaning "draw the rectangle filled".
pub const FILLED: i32 = -1;

/// Per-call configuration of the diff engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiffConfig {
    pub line_color: Rgb<u8>,
    /// Stroke width in pixels, or [`FILLED`].
    pub line_width: i32,
    pub background_color: Rgb<u8>,
    /// Drop regions whose interior is entirely `background_color`.
    pub ignore_background_rects: bool,
}

impl Default for DiffConfig {
    fn default() -> Self {
        DiffConfig {
            line_color: Rgb([255, 85, 0]),
            line_width: 2,
            background_color: Rgb([255, 255, 255]),
            ignore_background_rects: true,
        }
    }
}

/// Output of [`difference`]: one image per side.
///
/// Both pages are annotated 3-channel copies of the inputs, except when the
/// inputs differ in shape, in which case they are the inputs verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffResult {
    pub left: Page,
    pub right: Page,
}

/// Axis-aligned bounding box of a connected component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Region {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Region {
    /// Rectangle with inclusive corners `(x - m, y - m)` and
    /// `(x + width + m, y + height + m)`.
    pub fn outset(&self, margin: i64) -> draw::Rect {
        draw::Rect {
            left: self.x as i64 - margin,
            top: self.y as i64 - margin,
            right: (self.x + self.width) as i64 + margin,
            bottom: (self.y + self.height) as i64 + margin,
        }
    }
}
