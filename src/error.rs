//! Error types for any2csv

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for any2csv operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("No Zip file provided? {}", .0.display())]
    NotAnArchive(PathBuf),

    #[error("Failed to decode record {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: prost::DecodeError,
    },

    #[error("Couldn't find Object type information - aborting specific type extraction")]
    MissingObjectType,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type alias for any2csv operations
pub type Result<T> = std::result::Result<T, Error>;
