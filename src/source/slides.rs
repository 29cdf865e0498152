// Presentation decks exported as one image file per slide.
//
// Presentation software exports "all slides as images" into a folder named
// after the deck (`deck.pptx` -> `deck/Slide1.PNG`, `deck/Slide2.PNG`, ...).
// The deck path or the folder path can be opened; slides are ordered by
// digit-aware file name comparison.

use std::cmp::Ordering;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{LoadOptions, PageSource, RASTER_EXTENSIONS, fit_within};
use crate::error::{Result, RevviewError};
use crate::page::Page;

pub struct SlideExportSource {
    files: Vec<PathBuf>,
    options: LoadOptions,
    pages: Vec<Page>,
}

impl SlideExportSource {
    pub fn open(path: &Path, options: LoadOptions) -> Result<Self> {
        let dir = export_dir(path)?;

        let mut files = Vec::new();
        for entry in std::fs::read_dir(&dir)? {
            let entry_path = entry?.path();
            if entry_path.is_file() && has_raster_extension(&entry_path) {
                files.push(entry_path);
            }
        }
        files.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));

        debug!(dir = %dir.display(), slides = files.len(), "slide export opened");
        Ok(Self {
            files,
            options,
            pages: Vec::new(),
        })
    }
}

impl PageSource for SlideExportSource {
    fn total(&self) -> u32 {
        self.files.len() as u32
    }

    fn load_pages(&mut self, progress: &mut dyn FnMut(u32)) -> Result<()> {
        let mut pages = Vec::with_capacity(self.files.len());
        for (i, file) in self.files.iter().enumerate() {
            let image = image::open(file)?;
            pages.push(Page::from_dynamic(fit_within(image, self.options.max_page_size)));
            progress(i as u32 + 1);
        }
        self.pages = pages;
        Ok(())
    }

    fn get_page(&self, index: u32) -> Option<&Page> {
        let i = index.checked_sub(1)?;
        self.pages.get(i as usize)
    }
}

/// Resolve the folder holding the exported slides.
fn export_dir(path: &Path) -> Result<PathBuf> {
    if path.is_dir() {
        return Ok(path.to_path_buf());
    }
    let dir = path.with_extension("");
    if dir.is_dir() {
        Ok(dir)
    } else {
        Err(RevviewError::source_not_found(format!(
            "slide export folder {} not found for {}",
            dir.display(),
            path.display()
        )))
    }
}

fn has_raster_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| RASTER_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// Compare strings treating runs of ASCII digits as numbers.
pub(crate) fn natural_cmp(a: &str, b: &str) -> Ordering {
    let (mut a, mut b) = (a, b);
    loop {
        match (a.chars().next(), b.chars().next()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(ca), Some(cb)) if ca.is_ascii_digit() && cb.is_ascii_digit() => {
                let (na, rest_a) = split_digits(a);
                let (nb, rest_b) = split_digits(b);
                let na_trim = na.trim_start_matches('0');
                let nb_trim = nb.trim_start_matches('0');
                let ord = na_trim
                    .len()
                    .cmp(&nb_trim.len())
                    .then_with(|| na_trim.cmp(nb_trim))
                    .then_with(|| na.len().cmp(&nb.len()));
                if ord != Ordering::Equal {
                    return ord;
                }
                a = rest_a;
                b = rest_b;
            }
            (Some(ca), Some(cb)) => {
                if ca != cb {
                    return ca.cmp(&cb);
                }
                a = &a[ca.len_utf8()..];
                b = &b[cb.len_utf8()..];
            }
        }
    }
}

fn split_digits(s: &str) -> (&str, &str) {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    s.split_at(end)
}
