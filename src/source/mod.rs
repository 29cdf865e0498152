pub mod frames;
#[cfg(feature = "pdf")]
pub mod pdf;
pub mod slides;

use std::path::Path;

use image::DynamicImage;
use image::imageops::FilterType;

use crate::error::{Result, RevviewError};
use crate::page::Page;

/// Ordered, 1-indexed sequence of raster pages.
///
/// Loaded pages are immutable, so sources can be shared across the threads
/// that diff independent page pairs.
pub trait PageSource: Send + Sync {
    /// Number of pages, known as soon as the source is opened.
    fn total(&self) -> u32;

    /// Decode every page, calling `progress(i)` for `i = 1..=total` in order.
    fn load_pages(&mut self, progress: &mut dyn FnMut(u32)) -> Result<()>;

    /// Page `index` (1-based), or `None` when out of range or not loaded yet.
    fn get_page(&self, index: u32) -> Option<&Page>;
}

/// Options applied while decoding pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadOptions {
    /// Pages larger than this `(width, height)` are downscaled to fit.
    pub max_page_size: (u32, u32),
    /// Resolution for rendered (vector) documents.
    pub dpi: u32,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            max_page_size: (1920, 1080),
            dpi: 150,
        }
    }
}

/// The kinds of document a page source can be opened from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Slides exported as one image per slide into a folder.
    PresentationExport,
    /// A multi-frame raster image (TIFF), or a single-frame raster image.
    MultiFrameImage,
    /// A PDF document rendered with pdfium.
    #[cfg(feature = "pdf")]
    PdfDocument,
}

const PRESENTATION_EXTENSIONS: &[&str] = &["ppt", "pptx"];
const MULTI_FRAME_EXTENSIONS: &[&str] = &["tif", "tiff"];
pub(crate) const RASTER_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "webp"];

impl SourceKind {
    /// Determine the kind from a path: directories are slide exports,
    /// files are classified by extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        if path.is_dir() {
            return Ok(SourceKind::PresentationExport);
        }

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .unwrap_or_default();

        match ext.as_str() {
            e if PRESENTATION_EXTENSIONS.contains(&e) => Ok(SourceKind::PresentationExport),
            e if MULTI_FRAME_EXTENSIONS.contains(&e) || RASTER_EXTENSIONS.contains(&e) => {
                Ok(SourceKind::MultiFrameImage)
            }
            #[cfg(feature = "pdf")]
            "pdf" => Ok(SourceKind::PdfDocument),
            _ => Err(RevviewError::unsupported_format(format!(
                "'{}' is not a supported document type",
                path.display()
            ))),
        }
    }

    /// File extensions accepted by [`from_path`](Self::from_path).
    pub fn supported_extensions() -> Vec<&'static str> {
        let mut exts: Vec<&'static str> = PRESENTATION_EXTENSIONS
            .iter()
            .chain(MULTI_FRAME_EXTENSIONS)
            .chain(RASTER_EXTENSIONS)
            .copied()
            .collect();
        if cfg!(feature = "pdf") {
            exts.push("pdf");
        }
        exts
    }
}

/// Open a document as a page source. Pages are not decoded until
/// [`PageSource::load_pages`] is called.
///
/// # Errors
/// - `SourceNotFound` if `path` does not exist
/// - `UnsupportedFormat` if the document type is not recognised
pub fn open_source(path: &Path, options: LoadOptions) -> Result<Box<dyn PageSource>> {
    if !path.exists() {
        return Err(RevviewError::source_not_found(format!(
            "{} does not exist",
            path.display()
        )));
    }

    let source: Box<dyn PageSource> = match SourceKind::from_path(path)? {
        SourceKind::PresentationExport => Box::new(slides::SlideExportSource::open(path, options)?),
        SourceKind::MultiFrameImage => Box::new(frames::FrameImageSource::open(path, options)?),
        #[cfg(feature = "pdf")]
        SourceKind::PdfDocument => Box::new(pdf::PdfSource::open(path, options)?),
    };
    Ok(source)
}

/// Downscale `image` to fit within `(max_width, max_height)`, keeping its
/// aspect ratio. Images that already fit are returned untouched.
pub fn fit_within(image: DynamicImage, (max_width, max_height): (u32, u32)) -> DynamicImage {
    let (width, height) = (image.width(), image.height());
    if width <= max_width && height <= max_height {
        return image;
    }
    let ratio = f64::min(
        max_height as f64 / height as f64,
        max_width as f64 / width as f64,
    );
    let new_width = ((width as f64 * ratio).round() as u32).max(1);
    let new_height = ((height as f64 * ratio).round() as u32).max(1);
    image.resize_exact(new_width, new_height, FilterType::Triangle)
}

/// Page source over pages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    pages: Vec<Page>,
}

impl MemorySource {
    pub fn new(pages: Vec<Page>) -> Self {
        Self { pages }
    }
}

impl PageSource for MemorySource {
    fn total(&self) -> u32 {
        self.pages.len() as u32
    }

    fn load_pages(&mut self, progress: &mut dyn FnMut(u32)) -> Result<()> {
        for i in 1..=self.total() {
            progress(i);
        }
        Ok(())
    }

    fn get_page(&self, index: u32) -> Option<&Page> {
        let i = index.checked_sub(1)?;
        self.pages.get(i as usize)
    }
}
