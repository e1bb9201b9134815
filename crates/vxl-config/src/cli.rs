//! Command-line overrides for configuration values.

use std::path::PathBuf;

use clap::Args;

use crate::Config;

/// Flags that override settings loaded from `config.ron`.
#[derive(Args, Debug, Default, Clone)]
pub struct CliOverrides {
    /// Map width in voxels (disables size guessing).
    #[arg(long, global = true)]
    pub width: Option<u32>,

    /// Map height in voxels (disables size guessing).
    #[arg(long, global = true)]
    pub height: Option<u32>,

    /// Map depth in voxels (disables size guessing).
    #[arg(long, global = true)]
    pub depth: Option<u32>,

    /// Storage tile edge length in columns.
    #[arg(long, global = true)]
    pub chunk_size: Option<u32>,

    /// Maximum bytes per stream read.
    #[arg(long, global = true)]
    pub quota: Option<usize>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliOverrides) {
        let explicit_size = args.width.is_some() || args.height.is_some() || args.depth.is_some();
        if let Some(w) = args.width {
            self.map.width = w;
        }
        if let Some(h) = args.height {
            self.map.height = h;
        }
        if let Some(d) = args.depth {
            self.map.depth = d;
        }
        if explicit_size {
            self.map.guess_size = false;
        }
        if let Some(size) = args.chunk_size {
            self.map.chunk_size = size;
        }
        if let Some(quota) = args.quota {
            self.stream.quota = quota;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliOverrides {
            depth: Some(128),
            quota: Some(1400),
            ..Default::default()
        };
        config.apply_cli_overrides(&args);
        assert_eq!(config.map.depth, 128);
        assert_eq!(config.stream.quota, 1400);
        assert!(!config.map.guess_size, "explicit size disables guessing");
        // Non-overridden fields retain defaults
        assert_eq!(config.map.width, 512);
        assert_eq!(config.debug.log_level, "info");
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliOverrides::default());
        assert_eq!(config, original);
    }
}
