use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    /// The item has no usable path, so there is nowhere to put the file.
    #[error("item has no path to save metadata next to")]
    MissingPath,
    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("save cancelled")]
    Cancelled,
    #[error("write task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

impl SaveError {
    /// Configuration errors are not worth retrying until the item changes.
    pub fn is_configuration(&self) -> bool {
        matches!(self, SaveError::MissingPath)
    }
}
