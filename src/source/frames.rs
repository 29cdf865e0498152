// Multi-frame raster images: every TIFF directory is a page. Other raster
// formats decode as a single page.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba};
use tiff::ColorType;
use tiff::decoder::{Decoder, DecodingResult};
use tracing::debug;

use super::{LoadOptions, PageSource, fit_within};
use crate::error::{Result, RevviewError};
use crate::page::Page;

pub struct FrameImageSource {
    path: PathBuf,
    is_tiff: bool,
    total: u32,
    options: LoadOptions,
    pages: Vec<Page>,
}

impl FrameImageSource {
    /// Open `path` and count its frames without decoding pixel data.
    pub fn open(path: &Path, options: LoadOptions) -> Result<Self> {
        let is_tiff = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("tif") || e.eq_ignore_ascii_case("tiff"));

        let total = if is_tiff {
            let mut decoder = open_tiff(path)?;
            let mut count = 1;
            while decoder.more_images() {
                decoder.next_image()?;
                count += 1;
            }
            count
        } else {
            1
        };

        Ok(Self {
            path: path.to_path_buf(),
            is_tiff,
            total,
            options,
            pages: Vec::new(),
        })
    }
}

impl PageSource for FrameImageSource {
    fn total(&self) -> u32 {
        self.total
    }

    fn load_pages(&mut self, progress: &mut dyn FnMut(u32)) -> Result<()> {
        let mut pages = Vec::with_capacity(self.total as usize);

        if self.is_tiff {
            let mut decoder = open_tiff(&self.path)?;
            for i in 1..=self.total {
                if i > 1 {
                    decoder.next_image()?;
                }
                let frame = decode_frame(&mut decoder)?;
                pages.push(Page::from_dynamic(fit_within(frame, self.options.max_page_size)));
                progress(i);
            }
        } else {
            let image = image::open(&self.path)?;
            pages.push(Page::from_dynamic(fit_within(image, self.options.max_page_size)));
            progress(1);
        }

        debug!(path = %self.path.display(), pages = pages.len(), "frames loaded");
        self.pages = pages;
        Ok(())
    }

    fn get_page(&self, index: u32) -> Option<&Page> {
        let i = index.checked_sub(1)?;
        self.pages.get(i as usize)
    }
}

fn open_tiff(path: &Path) -> Result<Decoder<BufReader<File>>> {
    let file = File::open(path)?;
    Ok(Decoder::new(BufReader::new(file))?)
}

fn decode_frame(decoder: &mut Decoder<BufReader<File>>) -> Result<DynamicImage> {
    let (width, height) = decoder.dimensions()?;
    let color = decoder.colortype()?;
    let data = decoder.read_image()?;

    let mismatch = || {
        RevviewError::decode(format!(
            "TIFF frame data does not match {width}x{height} {color:?}"
        ))
    };

    let image = match (color, data) {
        (ColorType::Gray(8), DecodingResult::U8(buf)) => {
            DynamicImage::ImageLuma8(GrayImage::from_raw(width, height, buf).ok_or_else(mismatch)?)
        }
        (ColorType::Gray(1), DecodingResult::U8(buf)) => {
            DynamicImage::ImageLuma8(unpack_bilevel(width, height, &buf).ok_or_else(mismatch)?)
        }
        (ColorType::Gray(16), DecodingResult::U16(buf)) => DynamicImage::ImageLuma16(
            ImageBuffer::<Luma<u16>, _>::from_raw(width, height, buf).ok_or_else(mismatch)?,
        ),
        (ColorType::RGB(8), DecodingResult::U8(buf)) => {
            DynamicImage::ImageRgb8(RgbImage::from_raw(width, height, buf).ok_or_else(mismatch)?)
        }
        (ColorType::RGB(16), DecodingResult::U16(buf)) => DynamicImage::ImageRgb16(
            ImageBuffer::<Rgb<u16>, _>::from_raw(width, height, buf).ok_or_else(mismatch)?,
        ),
        (ColorType::RGBA(8), DecodingResult::U8(buf)) => DynamicImage::ImageRgba8(
            ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, buf).ok_or_else(mismatch)?,
        ),
        (ColorType::RGBA(16), DecodingResult::U16(buf)) => DynamicImage::ImageRgba16(
            ImageBuffer::<Rgba<u16>, _>::from_raw(width, height, buf).ok_or_else(mismatch)?,
        ),
        (other, _) => {
            return Err(RevviewError::unsupported_format(format!(
                "TIFF color type {other:?} is not supported"
            )));
        }
    };
    Ok(image)
}

/// Expand 1-bit rows (MSB first, each row padded to a whole byte) into an
/// 8-bit image with set bits as white.
fn unpack_bilevel(width: u32, height: u32, packed: &[u8]) -> Option<GrayImage> {
    let stride = width.div_ceil(8) as usize;
    if packed.len() < stride * height as usize {
        return None;
    }
    Some(GrayImage::from_fn(width, height, |x, y| {
        let byte = packed[y as usize * stride + x as usize / 8];
        let bit = (byte >> (7 - (x % 8))) & 1;
        Luma([if bit == 1 { 255 } else { 0 }])
    }))
}
