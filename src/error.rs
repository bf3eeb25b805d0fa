//! Error types for the catalog library.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// The metadata document was not valid JSON, or had no usable content.
    #[error("failed to parse metadata: {0}")]
    Parse(String),

    #[error("failed to run image tool {tool:?}: {source}")]
    ToolLaunch {
        tool: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The image tool ran but exited unsuccessfully.
    #[error("image tool exited with code {code}: {stderr}")]
    ToolExecution { code: i32, stderr: String },

    #[error("thumbnail output is not a valid image: {0}")]
    Thumbnail(#[source] image::ImageError),

    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("no photograph with signature {0}")]
    NotFound(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Parse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
