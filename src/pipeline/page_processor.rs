// ページ単位処理: 差分検出 → 注釈付き画像の書き出し

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::diff::{DiffConfig, difference};
use crate::error::RevviewError;
use crate::page::Page;

/// Result of writing one page pair.
#[derive(Debug, Clone)]
pub struct ProcessedPair {
    pub page_number: u32,
    pub left_output: Option<PathBuf>,
    pub right_output: Option<PathBuf>,
    /// Both pages existed and had the same shape.
    pub compared: bool,
}

/// Output file for one side of one page: `page_0007_left.png`.
pub fn output_path(output_dir: &Path, page_number: u32, side: &str) -> PathBuf {
    output_dir.join(format!("page_{page_number:04}_{side}.png"))
}

/// Diff one page pair and write the annotated images.
///
/// A page missing on one side is written unannotated for the side that has
/// it. Pages of different shape are written as they are.
pub fn process_pair(
    page_number: u32,
    left: Option<&Page>,
    right: Option<&Page>,
    config: &DiffConfig,
    output_dir: &Path,
) -> crate::error::Result<ProcessedPair> {
    let (left_out, right_out, compared) = match (left, right) {
        (Some(l), Some(r)) => {
            let compared = l.shape() == r.shape();
            let result = difference(l, r, config);
            (Some(result.left), Some(result.right), compared)
        }
        (l, r) => (l.cloned(), r.cloned(), false),
    };

    let left_output = left_out
        .map(|page| write_page(page, &output_path(output_dir, page_number, "left")))
        .transpose()?;
    let right_output = right_out
        .map(|page| write_page(page, &output_path(output_dir, page_number, "right")))
        .transpose()?;

    debug!(page = page_number, compared, "page pair written");
    Ok(ProcessedPair {
        page_number,
        left_output,
        right_output,
        compared,
    })
}

fn write_page(page: Page, path: &Path) -> crate::error::Result<PathBuf> {
    page.into_dynamic()
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| RevviewError::encode(format!("Failed to write {}: {e}", path.display())))?;
    Ok(path.to_path_buf())
}
