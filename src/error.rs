//! Error type for listing operations.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a listing run.
///
/// Anything recoverable (attribute queries, unreadable subdirectories,
/// missing paths in absolute-path mode) is reported as a warning instead.
#[derive(Error, Debug)]
pub enum ListingError {
    /// The requested root directory could not be opened or read.
    #[error("cannot read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A wildcard pattern could not be compiled.
    #[error("invalid pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    /// Options that cannot be combined.
    #[error("{0}")]
    Conflict(String),

    /// Writing to the output sink failed.
    #[error("error writing output: {0}")]
    Output(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, ListingError>;
