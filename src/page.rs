// Raster page: one slide or one frame of a paged document.

use std::borrow::Cow;

use image::{DynamicImage, GrayImage, RgbImage};

/// A single rasterized page.
///
/// Pages are either single-channel (luma) or three-channel (RGB). Once a page
/// has been produced by a [`PageSource`](crate::source::PageSource) its
/// dimensions never change; the diff engine only ever borrows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    Gray(GrayImage),
    Rgb(RgbImage),
}

impl Page {
    /// Convert a decoded image into a page.
    ///
    /// Luma formats (with or without alpha, any bit depth) become
    /// single-channel pages; everything else becomes RGB. Alpha is dropped.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        match image {
            DynamicImage::ImageLuma8(gray) => Page::Gray(gray),
            img @ (DynamicImage::ImageLumaA8(_)
            | DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)) => Page::Gray(img.to_luma8()),
            DynamicImage::ImageRgb8(rgb) => Page::Rgb(rgb),
            other => Page::Rgb(other.to_rgb8()),
        }
    }

    pub fn width(&self) -> u32 {
        match self {
            Page::Gray(img) => img.width(),
            Page::Rgb(img) => img.width(),
        }
    }

    pub fn height(&self) -> u32 {
        match self {
            Page::Gray(img) => img.height(),
            Page::Rgb(img) => img.height(),
        }
    }

    /// Number of color channels: 1 or 3.
    pub fn channels(&self) -> u8 {
        match self {
            Page::Gray(_) => 1,
            Page::Rgb(_) => 3,
        }
    }

    /// `(height, width, channels)`, the shape compared by the diff engine.
    pub fn shape(&self) -> (u32, u32, u8) {
        (self.height(), self.width(), self.channels())
    }

    /// Borrow the page as RGB, replicating the luma channel when necessary.
    pub fn to_rgb(&self) -> Cow<'_, RgbImage> {
        match self {
            Page::Rgb(img) => Cow::Borrowed(img),
            Page::Gray(img) => Cow::Owned(DynamicImage::ImageLuma8(img.clone()).to_rgb8()),
        }
    }

    pub fn into_dynamic(self) -> DynamicImage {
        match self {
            Page::Gray(img) => DynamicImage::ImageLuma8(img),
            Page::Rgb(img) => DynamicImage::ImageRgb8(img),
        }
    }
}

impl From<RgbImage> for Page {
    fn from(img: RgbImage) -> Self {
        Page::Rgb(img)
    }
}

impl From<GrayImage> for Page {
    fn from(img: GrayImage) -> Self {
        Page::Gray(img)
    }
}
