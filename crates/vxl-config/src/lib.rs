//! Configuration for the VXL tools.
//!
//! Settings persist to disk as a RON file, can be overridden from the command
//! line via clap, and stay forward/backward compatible through
//! `#[serde(default)]`.

mod cli;
mod config;
mod error;

pub use cli::CliOverrides;
pub use config::{CONFIG_FILE, Config, DebugConfig, MapConfig, StreamConfig};
pub use error::ConfigError;
