//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use vxl_map::{CHUNK_SIZE, CoordSystem, Layout};

use crate::error::ConfigError;

/// Name of the config file inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

const APP_NAME: &str = "vxl-tool";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Map dimensions used when decoding or creating maps.
    pub map: MapConfig,
    /// Streaming writer settings.
    pub stream: StreamConfig,
    /// Logging settings.
    pub debug: DebugConfig,
}

/// Map dimensions and storage settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MapConfig {
    /// Voxel count along x.
    pub width: u32,
    /// Voxel count along y.
    pub height: u32,
    /// Voxel count along z.
    pub depth: u32,
    /// Storage tile edge length in columns.
    pub chunk_size: u32,
    /// Guess width, height and depth from the data instead of using the
    /// values above.
    pub guess_size: bool,
    /// Axis convention for coordinates given on the command line.
    pub coords: CoordSystem,
}

/// Streaming writer settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StreamConfig {
    /// Maximum bytes produced per stream read.
    pub quota: usize,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g. "debug", "info,vxl_map=trace").
    pub log_level: String,
    /// Directory for JSON log files in debug builds.
    pub log_dir: Option<PathBuf>,
}

impl Default for MapConfig {
    fn default() -> Self {
        let classic = Layout::classic();
        Self {
            width: classic.width,
            height: classic.height,
            depth: classic.depth,
            chunk_size: CHUNK_SIZE,
            guess_size: true,
            coords: CoordSystem::Voxlap,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self { quota: 8192 }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_dir: None,
        }
    }
}

impl MapConfig {
    /// The configured layout, validated.
    pub fn layout(&self) -> Result<Layout, ConfigError> {
        let layout =
            Layout::new(self.width, self.height, self.depth).with_chunk_size(self.chunk_size);
        layout.validate().map_err(ConfigError::InvalidMap)?;
        Ok(layout)
    }
}

// --- Load / Save ---

impl Config {
    /// Platform config directory for the tool (e.g. `~/.config/vxl-tool`).
    pub fn default_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_NAME))
            .ok_or(ConfigError::NoConfigDir)
    }

    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(|source| ConfigError::Read {
                    path: config_path.clone(),
                    source,
                })?;
            let config: Config = ron::from_str(&contents).map_err(|source| ConfigError::Parse {
                path: config_path.clone(),
                source,
            })?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(|source| ConfigError::Write {
            path: config_dir.to_path_buf(),
            source,
        })?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(&config_path, serialized).map_err(|source| ConfigError::Write {
            path: config_path,
            source,
        })
    }
}
