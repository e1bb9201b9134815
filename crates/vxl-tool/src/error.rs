use std::io;
use std::path::PathBuf;

use vxl_config::ConfigError;
use vxl_map::VxlError;

/// Errors that end a tool run.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Map(#[from] VxlError),

    #[error("{}: {source}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to format report: {0}")]
    Json(#[from] serde_json::Error),
}

impl ToolError {
    pub fn file(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| Self::File { path, source }
    }
}
