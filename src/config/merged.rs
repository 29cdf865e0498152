use super::job::Job;
use super::settings::{Settings, validate_line_width};
use crate::diff::DiffConfig;
use crate::source::LoadOptions;

#[derive(Debug, Clone)]
pub struct MergedConfig {
    pub diff: DiffConfig,
    pub load: LoadOptions,
    pub parallel_workers: usize,
}

impl MergedConfig {
    /// JobのOption値がSomeならJobの値を、NoneならSettingsの値を使用する。
    pub fn new(settings: &Settings, job: &Job) -> Self {
        let mut diff = settings.diff_config();
        if let Some(color) = job.line_color {
            diff.line_color = image::Rgb(color);
        }
        if let Some(width) = job.line_width {
            diff.line_width = width;
        }
        if let Some(color) = job.bg_color {
            diff.background_color = image::Rgb(color);
        }
        if let Some(ignore) = job.ignore_bg_rect {
            diff.ignore_background_rects = ignore;
        }

        let mut load = settings.load_options();
        if let Some(dpi) = job.dpi {
            load.dpi = dpi;
        }

        MergedConfig {
            diff,
            load,
            parallel_workers: settings.parallel_workers,
        }
    }

    /// Job側の上書き値を検証する。
    pub fn validate(&self) -> crate::error::Result<()> {
        validate_line_width(self.diff.line_width)?;
        if self.load.dpi == 0 {
            return Err(crate::error::RevviewError::config("dpi must be positive"));
        }
        Ok(())
    }
}
