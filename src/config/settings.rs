use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::diff::{DiffConfig, FILLED};
use crate::source::LoadOptions;

/// Persisted viewer settings.
///
/// `apply_legacy` and `last_folder` belong to the desktop viewer and are only
/// carried through so that a settings file survives a read/write round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub line_color: [u8; 3],
    pub line_width: i32,
    pub ignore_bg_rect: bool,
    pub bg_color: [u8; 3],
    pub apply_legacy: bool,
    pub last_folder: PathBuf,
    pub dpi: u32,
    pub max_page_width: u32,
    pub max_page_height: u32,
    pub parallel_workers: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            line_color: [255, 85, 0],
            line_width: 2,
            ignore_bg_rect: true,
            bg_color: [255, 255, 255],
            apply_legacy: false,
            last_folder: PathBuf::from("."),
            dpi: 150,
            max_page_width: 1920,
            max_page_height: 1080,
            parallel_workers: 0,
        }
    }
}

impl Settings {
    pub fn from_yaml(yaml: &str) -> crate::error::Result<Self> {
        let settings: Self = serde_yml::from_str(yaml).map_err(|e| {
            crate::error::RevviewError::config(format!("Failed to parse settings YAML: {e}"))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn from_json(json: &str) -> crate::error::Result<Self> {
        let settings: Self = serde_json::from_str(json).map_err(|e| {
            crate::error::RevviewError::config(format!("Failed to parse settings JSON: {e}"))
        })?;
        settings.validate()?;
        Ok(settings)
    }

    /// `.json` files (and the extension-less viewer settings file) are read
    /// as JSON; everything else as YAML.
    pub fn from_file(path: &Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml" | "yml") => Self::from_yaml(&content),
            _ => Self::from_json(&content),
        }
    }

    /// Write the settings as pretty-printed JSON, creating parent folders.
    pub fn write_json(&self, path: &Path) -> crate::error::Result<()> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Read the settings file, or write and return the defaults if it is
    /// missing or unreadable.
    pub fn initialize(path: &Path) -> crate::error::Result<Self> {
        if path.is_file() {
            match Self::from_file(path) {
                Ok(settings) => return Ok(settings),
                Err(e) => warn!(path = %path.display(), error = %e, "resetting settings file"),
            }
        }
        let settings = Self::default();
        settings.write_json(path)?;
        Ok(settings)
    }

    pub fn validate(&self) -> crate::error::Result<()> {
        validate_line_width(self.line_width)?;
        if self.max_page_width == 0 || self.max_page_height == 0 {
            return Err(crate::error::RevviewError::config(format!(
                "max page size must be positive, got {}x{}",
                self.max_page_width, self.max_page_height
            )));
        }
        if self.dpi == 0 {
            return Err(crate::error::RevviewError::config("dpi must be positive"));
        }
        Ok(())
    }

    pub fn diff_config(&self) -> DiffConfig {
        DiffConfig {
            line_color: image::Rgb(self.line_color),
            line_width: self.line_width,
            background_color: image::Rgb(self.bg_color),
            ignore_background_rects: self.ignore_bg_rect,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            max_page_size: (self.max_page_width, self.max_page_height),
            dpi: self.dpi,
        }
    }
}

/// Line widths are at least 1, or [`FILLED`].
pub fn validate_line_width(line_width: i32) -> crate::error::Result<()> {
    if line_width >= 1 || line_width == FILLED {
        Ok(())
    } else {
        Err(crate::error::RevviewError::config(format!(
            "line_width must be >= 1 or {FILLED} (filled), got {line_width}"
        )))
    }
}
