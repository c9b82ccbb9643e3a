//! Error types for the media organizer

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for media organizer operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the media organizer
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Walking the source tree failed. Fatal for the whole run.
    #[error("Failed to scan {path}: {source}")]
    ScanFailed {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// The file could not be stated at all.
    #[error("Failed to extract capture date from {path}: {source}")]
    DateExtractionFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Duplicate check failed for {path}: {message}")]
    DuplicateCheckFailed { path: PathBuf, message: String },

    #[error("Failed to copy {from} to {to}: {source}")]
    CopyFailed {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("File hash computation failed for {path}: {message}")]
    HashComputation { path: PathBuf, message: String },

    #[error("Failed to read EXIF data from {path}: {message}")]
    ExifRead { path: PathBuf, message: String },
}

/// Coarse classification of [`Error`], used by callers that only need to
/// distinguish fatal from per-file failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    ScanFailed,
    DateExtractionFailed,
    DuplicateCheckFailed,
    CopyFailed,
    Other,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::ScanFailed { .. } => ErrorKind::ScanFailed,
            Error::DateExtractionFailed { .. } => ErrorKind::DateExtractionFailed,
            Error::DuplicateCheckFailed { .. } => ErrorKind::DuplicateCheckFailed,
            Error::CopyFailed { .. } => ErrorKind::CopyFailed,
            Error::Io(_) | Error::HashComputation { .. } | Error::ExifRead { .. } => {
                ErrorKind::Other
            }
        }
    }

    /// Whether this error aborts the whole run rather than a single file
    pub fn is_fatal(&self) -> bool {
        self.kind() == ErrorKind::ScanFailed
    }
}
