use std::path::{Path, PathBuf};
use std::process::ExitCode;

use revview::config::job::JobFile;
use revview::config::merged::MergedConfig;
use revview::config::{self};
use revview::pipeline::job_runner::JobConfig;
use revview::pipeline::orchestrator::run_all_jobs;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.is_empty() || args.iter().any(|a| a == "--help" || a == "-h") {
        eprintln!("Usage: revview <jobs.yaml>...");
        eprintln!("  Compare paged documents page by page and write annotated images.");
        eprintln!("  Set RUST_LOG (e.g. RUST_LOG=revview=debug) for detailed logs.");
        return if args.is_empty() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        };
    }

    if args.iter().any(|a| a == "--version" || a == "-V") {
        eprintln!("revview {}", env!("CARGO_PKG_VERSION"));
        return ExitCode::SUCCESS;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("revview=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut job_configs: Vec<JobConfig> = Vec::new();

    for job_file_arg in &args {
        let job_file_path = Path::new(job_file_arg);

        // Load settings from the same directory as the job file.
        let settings = match config::load_settings_for_job(job_file_path) {
            Ok(s) => s,
            Err(e) => {
                eprintln!("ERROR: Failed to load settings for {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let yaml_content = match std::fs::read_to_string(job_file_path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("ERROR: Failed to read job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        let job_file: JobFile = match serde_yml::from_str(&yaml_content) {
            Ok(jf) => jf,
            Err(e) => {
                eprintln!("ERROR: Failed to parse job file {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }
        };

        // Resolve job file directory for relative paths.
        let job_dir = job_file_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf();

        for job in &job_file.jobs {
            let merged = MergedConfig::new(&settings, job);
            if let Err(e) = merged.validate() {
                eprintln!("ERROR: Invalid job in {job_file_arg}: {e}");
                return ExitCode::FAILURE;
            }

            job_configs.push(JobConfig {
                left: resolve_path(&job_dir, &job.left),
                right: resolve_path(&job_dir, &job.right),
                output_dir: resolve_path(&job_dir, &job.output),
                pages: job.pages.clone(),
                diff: merged.diff,
                load: merged.load,
                parallel_workers: merged.parallel_workers,
            });
        }
    }

    let results = run_all_jobs(&job_configs);

    let mut has_error = false;
    for (i, result) in results.iter().enumerate() {
        match result {
            Ok(job_result) => {
                eprintln!(
                    "OK: {} | {} -> {} ({} pages compared, {} unpaired, {} size mismatch)",
                    job_result.left.display(),
                    job_result.right.display(),
                    job_result.output_dir.display(),
                    job_result.pages_compared,
                    job_result.pages_unpaired,
                    job_result.pages_mismatched
                );
            }
            Err(e) => {
                eprintln!(
                    "ERROR: {} | {}: {e}",
                    job_configs[i].left.display(),
                    job_configs[i].right.display()
                );
                has_error = true;
            }
        }
    }

    if has_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

/// Resolve a potentially relative path against a base directory.
/// If the path is already absolute, return it as-is.
fn resolve_path(base_dir: &Path, path: &str) -> PathBuf {
    let p = Path::new(path);
    if p.is_absolute() {
        p.to_path_buf()
    } else {
        base_dir.join(p)
    }
}
