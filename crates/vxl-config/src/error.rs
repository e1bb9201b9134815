//! Configuration error types.

use std::io;
use std::path::PathBuf;

/// Errors that can occur when loading, saving, or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file.
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Failed to write the config file or create its directory.
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        /// File or directory that could not be written.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The config file is not valid RON.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// File that failed to parse.
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] ron::Error),

    /// The configured map dimensions cannot be represented.
    #[error("invalid map settings: {0}")]
    InvalidMap(#[source] vxl_map::VxlError),

    /// The OS exposes no configuration directory.
    #[error("could not determine the configuration directory")]
    NoConfigDir,
}
