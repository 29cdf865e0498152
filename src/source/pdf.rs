// PDF documents rendered page by page with pdfium.

use std::path::{Path, PathBuf};

use super::{LoadOptions, PageSource, fit_within};
use crate::error::Result;
use crate::page::Page;
use crate::render::pdfium;

pub struct PdfSource {
    path: PathBuf,
    total: u32,
    options: LoadOptions,
    pages: Vec<Page>,
}

impl PdfSource {
    pub fn open(path: &Path, options: LoadOptions) -> Result<Self> {
        Ok(Self {
            path: path.to_path_buf(),
            total: pdfium::page_count(path)?,
            options,
            pages: Vec::new(),
        })
    }
}

impl PageSource for PdfSource {
    fn total(&self) -> u32 {
        self.total
    }

    fn load_pages(&mut self, progress: &mut dyn FnMut(u32)) -> Result<()> {
        let images = pdfium::render_pages(&self.path, self.options.dpi, progress)?;
        self.pages = images
            .into_iter()
            .map(|img| Page::from_dynamic(fit_within(img, self.options.max_page_size)))
            .collect();
        Ok(())
    }

    fn get_page(&self, index: u32) -> Option<&Page> {
        let i = index.checked_sub(1)?;
        self.pages.get(i as usize)
    }
}
