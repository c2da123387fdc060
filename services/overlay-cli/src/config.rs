//! Session configuration loaded from an optional YAML file.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use compositor::{CompositeConfig, Resample};
use radar_common::{time::DEFAULT_ARCHIVE_BASE_URL, MAX_ZOOM};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const DEFAULT_TILE_URL_TEMPLATE: &str =
    "https://tile.gbif.org/4326/omt/{z}/{x}/{y}@4x.png?style=osm-bright";

/// Root configuration. Every field is optional in the file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayConfig {
    /// Zoom level used for every cell in the session.
    pub zoom: u32,
    pub tint: TintColor,
    pub tint_alpha: f32,
    pub resample: Resample,
    pub tile_url_template: String,
    pub archive_base_url: String,
    pub data_dirs: DataDirs,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        let composite = CompositeConfig::default();
        Self {
            zoom: 8,
            tint: TintColor::from(composite.tint),
            tint_alpha: composite.tint_alpha,
            resample: composite.filter,
            tile_url_template: DEFAULT_TILE_URL_TEMPLATE.to_string(),
            archive_base_url: DEFAULT_ARCHIVE_BASE_URL.to_string(),
            data_dirs: DataDirs::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TintColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl From<[u8; 3]> for TintColor {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

/// Local directories for fetched and produced files.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataDirs {
    pub radar: PathBuf,
    pub tiles: PathBuf,
    pub output: PathBuf,
    pub meta: PathBuf,
}

impl Default for DataDirs {
    fn default() -> Self {
        Self {
            radar: PathBuf::from("data/nexrad-data"),
            tiles: PathBuf::from("data/map-data"),
            output: PathBuf::from("data/output"),
            meta: PathBuf::from("data/meta-data"),
        }
    }
}

impl OverlayConfig {
    /// Load configuration from a YAML file.
    ///
    /// No path, or a path that does not exist, yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        if !path.exists() {
            warn!(path = %path.display(), "Config file not found, using defaults");
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        info!(path = %path.display(), zoom = config.zoom, "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate YAML text.
    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: OverlayConfig = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.zoom > MAX_ZOOM {
            bail!("zoom {} exceeds the maximum of {}", self.zoom, MAX_ZOOM);
        }
        if let Err(e) = self.composite_config().validate() {
            bail!(e);
        }
        for placeholder in ["{z}", "{x}", "{y}"] {
            if !self.tile_url_template.contains(placeholder) {
                bail!(
                    "tile_url_template '{}' is missing {}",
                    self.tile_url_template,
                    placeholder
                );
            }
        }
        Ok(())
    }

    /// Parameters for the compositor.
    pub fn composite_config(&self) -> CompositeConfig {
        CompositeConfig {
            tint: [self.tint.r, self.tint.g, self.tint.b],
            tint_alpha: self.tint_alpha,
            filter: self.resample,
        }
    }
}
