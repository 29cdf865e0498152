// pdfium-render wrapper: PDF document -> DynamicImage per page (in-memory only)

use std::path::{Path, PathBuf};

use image::DynamicImage;
use pdfium_render::prelude::*;

/// Resolves the path to the pdfium shared library.
///
/// Search order:
/// 1. `PDFIUM_DYNAMIC_LIB_PATH` environment variable
/// 2. `vendor/pdfium/lib/` relative to the project root (for development)
fn resolve_pdfium_lib_path() -> crate::error::Result<PathBuf> {
    if let Ok(path) = std::env::var("PDFIUM_DYNAMIC_LIB_PATH") {
        let p = PathBuf::from(&path);
        if p.exists() {
            return Ok(p);
        }
        return Err(crate::error::RevviewError::render(format!(
            "PDFIUM_DYNAMIC_LIB_PATH is set to '{}' but the path does not exist",
            path
        )));
    }

    if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
        let vendor_path = PathBuf::from(&manifest_dir).join("vendor/pdfium/lib");
        if vendor_path.exists() {
            return Ok(vendor_path);
        }
    }

    Err(crate::error::RevviewError::render(
        "pdfium library not found: set PDFIUM_DYNAMIC_LIB_PATH or place libpdfium.so in vendor/pdfium/lib/",
    ))
}

/// Creates a new Pdfium instance by dynamically loading the shared library.
fn create_pdfium() -> crate::error::Result<Pdfium> {
    let lib_path = resolve_pdfium_lib_path()?;
    let lib_path_str = lib_path.to_str().ok_or_else(|| {
        crate::error::RevviewError::render("pdfium library path contains non-UTF-8 characters")
    })?;
    let bindings =
        Pdfium::bind_to_library(Pdfium::pdfium_platform_library_name_at_path(lib_path_str))?;
    Ok(Pdfium::new(bindings))
}

/// Number of pages in the PDF at `pdf_path`.
pub fn page_count(pdf_path: &Path) -> crate::error::Result<u32> {
    let pdfium = create_pdfium()?;
    let document = pdfium.load_pdf_from_file(pdf_path, None)?;
    Ok(document.pages().len() as u32)
}

/// Renders every page of a PDF at the given DPI.
///
/// The document is opened once; `progress(i)` is called after page `i`
/// (1-based) has been rendered. No intermediate files are created.
///
/// # Errors
/// Returns `RevviewError::RenderError` if `dpi` is 0, the pdfium library cannot be
/// initialized, the file cannot be opened, or a page fails to render.
pub fn render_pages(
    pdf_path: &Path,
    dpi: u32,
    progress: &mut dyn FnMut(u32),
) -> crate::error::Result<Vec<DynamicImage>> {
    if dpi == 0 {
        return Err(crate::error::RevviewError::render("dpi must be positive"));
    }
    let pdfium = create_pdfium()?;
    let document = pdfium.load_pdf_from_file(pdf_path, None)?;

    let mut images = Vec::new();
    for (i, page) in document.pages().iter().enumerate() {
        // PDF default user unit: 1 point = 1/72 inch
        let width_px = (page.width().value * dpi as f32 / 72.0).round() as i32;
        let height_px = (page.height().value * dpi as f32 / 72.0).round() as i32;

        let config = PdfRenderConfig::new()
            .set_target_width(width_px)
            .set_target_height(height_px);

        let bitmap = page.render_with_config(&config)?;
        images.push(bitmap.as_image());
        progress(i as u32 + 1);
    }

    Ok(images)
}
