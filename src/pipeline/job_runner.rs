// ジョブ単位: 左右ドキュメント読込 -> 並列ページ比較 -> 注釈付き画像出力

use std::path::PathBuf;

use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::diff::DiffConfig;
use crate::error::RevviewError;
use crate::pipeline::page_processor::{ProcessedPair, process_pair};
use crate::source::{LoadOptions, PageSource, open_source};

/// Configuration for a single job.
#[derive(Debug, Clone)]
pub struct JobConfig {
    pub left: PathBuf,
    pub right: PathBuf,
    pub output_dir: PathBuf,
    /// 1-based pages to compare; `None` compares every page.
    pub pages: Option<Vec<u32>>,
    pub diff: DiffConfig,
    pub load: LoadOptions,
    /// Worker threads for page comparison; 0 uses the global rayon pool.
    pub parallel_workers: usize,
}

/// Result of processing a single job.
#[derive(Debug, Clone)]
pub struct JobResult {
    pub left: PathBuf,
    pub right: PathBuf,
    pub output_dir: PathBuf,
    /// Page pairs run through the diff engine with matching shapes.
    pub pages_compared: usize,
    /// Pages present in only one of the documents.
    pub pages_unpaired: usize,
    /// Page pairs passed through because their sizes differ.
    pub pages_mismatched: usize,
    pub pairs: Vec<ProcessedPair>,
}

/// Run a single comparison job.
///
/// Phase A: open and decode both documents (sequential)
/// Phase B: diff and write page pairs (rayon parallel)
pub fn run_job(config: &JobConfig) -> crate::error::Result<JobResult> {
    // --- Phase A: load both sides ---
    let left = load_source(&config.left, config.load)?;
    let right = load_source(&config.right, config.load)?;

    let last_page = left.total().max(right.total());
    let pages: Vec<u32> = match &config.pages {
        Some(pages) => {
            if let Some(&out_of_range) = pages.iter().find(|&&p| p > last_page) {
                return Err(RevviewError::config(format!(
                    "page {} out of range (documents have {} and {} pages)",
                    out_of_range,
                    left.total(),
                    right.total()
                )));
            }
            pages.clone()
        }
        None => (1..=last_page).collect(),
    };

    std::fs::create_dir_all(&config.output_dir)?;

    // --- Phase B: diff page pairs in parallel ---
    let process = || -> Vec<crate::error::Result<ProcessedPair>> {
        pages
            .par_iter()
            .map(|&p| {
                process_pair(
                    p,
                    left.get_page(p),
                    right.get_page(p),
                    &config.diff,
                    &config.output_dir,
                )
            })
            .collect()
    };

    let results = if config.parallel_workers > 0 {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(config.parallel_workers)
            .build()
            .map_err(|e| RevviewError::config(format!("Failed to build thread pool: {e}")))?;
        pool.install(process)
    } else {
        process()
    };

    let mut pairs = Vec::with_capacity(results.len());
    for result in results {
        pairs.push(result?);
    }
    pairs.sort_by_key(|p| p.page_number);

    let pages_unpaired = pairs
        .iter()
        .filter(|p| p.left_output.is_none() || p.right_output.is_none())
        .count();
    let pages_compared = pairs.iter().filter(|p| p.compared).count();
    let pages_mismatched = pairs.len() - pages_unpaired - pages_compared;
    if pages_unpaired > 0 {
        warn!(
            pages_unpaired,
            left_total = left.total(),
            right_total = right.total(),
            "documents have different page counts"
        );
    }

    info!(
        left = %config.left.display(),
        right = %config.right.display(),
        pages_compared,
        "job finished"
    );

    Ok(JobResult {
        left: config.left.clone(),
        right: config.right.clone(),
        output_dir: config.output_dir.clone(),
        pages_compared,
        pages_unpaired,
        pages_mismatched,
        pairs,
    })
}

/// Open a document and decode all of its pages.
fn load_source(
    path: &std::path::Path,
    options: LoadOptions,
) -> crate::error::Result<Box<dyn PageSource>> {
    let mut source = open_source(path, options)?;
    let total = source.total();
    source.load_pages(&mut |i| debug!(path = %path.display(), page = i, total, "page loaded"))?;
    Ok(source)
}
