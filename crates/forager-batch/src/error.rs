use std::path::PathBuf;

use forager_core::search::SearchError;
use forager_data::DataLoadError;

/// Errors that can occur while running a batch of economies.
#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    /// Loading the blueprints or the config file failed.
    #[error(transparent)]
    Data(#[from] DataLoadError),

    /// Searching one blueprint failed.
    #[error("blueprint {id}: {source}")]
    Search { id: u32, source: SearchError },

    /// The requested blueprint is not in the file.
    #[error("blueprint {id} not found in {file}")]
    BlueprintNotFound { id: u32, file: PathBuf },

    /// The command line could not be understood.
    #[error("{0}")]
    Usage(String),

    /// Writing the JSON report failed.
    #[error("serialization error: {detail}")]
    Serialization { detail: String },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
