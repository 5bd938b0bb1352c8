//! Tunables loaded from `~/.config/slidesplit/config.toml`.
//!
//! The detector constants are empirical and tuned to one visual style of
//! handout, so they live here rather than in code.
//!
//! ```toml
//! [detector]
//! zoom_x = 4.0
//! zoom_y = 4.0
//! threshold = 50
//! min_area = 80000
//!
//! [splitter]
//! regions_per_page = 2
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, SplitError};

/// Default horizontal and vertical rasterization zoom.
pub const DEFAULT_ZOOM: f32 = 4.0;
/// Default binarization level on a 0-255 scale.
pub const DEFAULT_THRESHOLD: u8 = 50;
/// Default pixel-area floor for a candidate box.
pub const DEFAULT_MIN_AREA: u64 = 80_000;
/// Default number of regions taken from each page.
pub const DEFAULT_REGIONS_PER_PAGE: usize = 2;

/// Region detector settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DetectorConfig {
    /// Horizontal zoom applied when rasterizing a page.
    pub zoom_x: f32,
    /// Vertical zoom applied when rasterizing a page.
    pub zoom_y: f32,
    /// Luminance at or below which a pixel counts as foreground.
    pub threshold: u8,
    /// Candidates with a smaller pixel area are discarded.
    pub min_area: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            zoom_x: DEFAULT_ZOOM,
            zoom_y: DEFAULT_ZOOM,
            threshold: DEFAULT_THRESHOLD,
            min_area: DEFAULT_MIN_AREA,
        }
    }
}

/// Page splitter settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitterConfig {
    /// How many regions, top first, become output pages. Pages with fewer
    /// detected regions are skipped.
    pub regions_per_page: usize,
}

impl Default for SplitterConfig {
    fn default() -> Self {
        Self {
            regions_per_page: DEFAULT_REGIONS_PER_PAGE,
        }
    }
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SplitConfig {
    pub detector: DetectorConfig,
    pub splitter: SplitterConfig,
}

impl SplitConfig {
    /// Load from an explicit path, else the user config file if it exists,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is found but cannot be read, parsed, or
    /// fails [`SplitConfig::validate`]. An explicit path that does not exist
    /// is an error; a missing user config file is not.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let path = config_path();
                if path.exists() {
                    Self::from_file(&path)?
                } else {
                    Self::default()
                }
            }
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file without validating it.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            SplitError::Config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml(&content)
            .map_err(|e| SplitError::Config(format!("{} in {}", e, path.display())))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SplitError::Config(format!("invalid TOML: {e}")))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| SplitError::Config(e.to_string()))
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let d = &self.detector;
        for (name, zoom) in [("zoom_x", d.zoom_x), ("zoom_y", d.zoom_y)] {
            if !zoom.is_finite() || zoom <= 0.0 {
                return Err(SplitError::Config(format!(
                    "detector.{name} must be a positive number, got {zoom}"
                )));
            }
        }
        if self.splitter.regions_per_page == 0 {
            return Err(SplitError::Config(
                "splitter.regions_per_page must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Return the path to the user config file.
pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("slidesplit")
        .join("config.toml")
}
