//! Media Organizer - copy photos and videos into a dated folder layout
//!
//! This library provides the organizing pipeline:
//! - Recursive scanning with extension-based classification
//! - Capture dates from EXIF metadata, falling back to modification time
//! - Canonical `YYYY/MM/MM-DD` target paths with `name(N).ext` renaming
//! - Duplicate detection by name or MD5 content hash
//! - Buffered copying with a per-run directory cache
//! - Run statistics, a plain-text run log and a line-mode runner

pub mod cli;
pub mod config;
pub mod copy;
pub mod duplicate;
pub mod error;
pub mod hash;
pub mod i18n;
pub mod media;
pub mod output;
pub mod planner;
pub mod process;
pub mod run_log;
pub mod runner;
pub mod scan;
pub mod stats;
pub mod time;

#[cfg(test)]
mod test_support;

pub use cli::Cli;
pub use config::{Config, ConfigError, DuplicateDetection, DuplicateStrategy, LogLevel};
pub use error::{Error, ErrorKind, Result};
pub use i18n::{Language, Messages};
pub use media::{MediaFile, MediaKind};
pub use process::{CancelFlag, Outcome, ProcessRecord, Processor};
pub use run_log::RunLog;
pub use runner::LineRunner;
pub use stats::RunStatistics;
