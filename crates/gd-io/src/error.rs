//! Input-loading error type.

use std::path::PathBuf;

use thiserror::Error;

use gd_core::GdError;
use gd_demand::DemandError;

/// Errors produced while reading input tables.  All are fatal.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("required input file {} does not exist", .0.display())]
    MissingFile(PathBuf),

    #[error("{file}: missing required column {column:?}")]
    MissingColumn { file: &'static str, column: &'static str },

    #[error("{file}, row {row}: invalid {column} value {value:?}")]
    InvalidValue { file: &'static str, row: usize, column: String, value: String },

    #[error("{file}, row {row}: {source}")]
    Geometry { file: &'static str, row: usize, source: GdError },

    #[error("cannot open {}: {source}", path.display())]
    Io { path: PathBuf, source: std::io::Error },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Demand(#[from] DemandError),
}

pub type LoadResult<T> = Result<T, LoadError>;

/// Open `path` for reading, naming the file on failure.
pub(crate) fn open(path: &std::path::Path) -> LoadResult<std::fs::File> {
    std::fs::File::open(path).map_err(|source| LoadError::Io { path: path.to_path_buf(), source })
}
