//! Structured logging for the VXL tools.
//!
//! Console output goes through `tracing-subscriber` with uptime timestamps
//! and module paths. Debug builds can additionally write JSON lines to a log
//! directory. `RUST_LOG` takes precedence over the configured level.

use std::path::Path;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use vxl_config::DebugConfig;

/// Filter used when neither `RUST_LOG` nor the config names a level.
pub const DEFAULT_FILTER: &str = "info";

/// Name of the JSON log file inside the log directory.
pub const LOG_FILE: &str = "vxl.log";

/// Initialize the global tracing subscriber.
///
/// `debug_build` enables the JSON file layer when `config.log_dir` is set.
/// Calling this more than once keeps the first subscriber.
///
/// ```no_run
/// use vxl_config::Config;
///
/// let config = Config::default();
/// vxl_log::init_logging(&config.debug, cfg!(debug_assertions));
/// ```
pub fn init_logging(config: &DebugConfig, debug_build: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| configured_filter(&config.log_level));

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = config.log_dir.as_deref()
        && let Some(log_file) = open_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();
        let _ = subscriber.with(file_layer).try_init();
        return;
    }

    let _ = subscriber.try_init();
}

/// Builds the filter for a configured level, falling back to
/// [`DEFAULT_FILTER`] when the level is empty.
pub fn configured_filter(level: &str) -> EnvFilter {
    if level.trim().is_empty() {
        EnvFilter::new(DEFAULT_FILTER)
    } else {
        EnvFilter::new(level)
    }
}

fn open_log_file(log_dir: &Path) -> Option<std::fs::File> {
    std::fs::create_dir_all(log_dir).ok()?;
    std::fs::File::create(log_dir.join(LOG_FILE)).ok()
}
