//! Target path derivation
//!
//! Layout: `target/YYYY/MM/MM-DD/<file name>`, with `name(N).ext` used for
//! collisions under the rename strategy.

use chrono::{Datelike, NaiveDateTime};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Derives canonical and collision-free target paths under one target root
#[derive(Debug, Clone)]
pub struct PathPlanner {
    target_dir: PathBuf,
}

impl PathPlanner {
    pub fn new<P: AsRef<Path>>(target_dir: P) -> Self {
        Self {
            target_dir: target_dir.as_ref().to_path_buf(),
        }
    }

    /// Directory that holds every file captured on `date`
    pub fn day_dir(&self, date: &NaiveDateTime) -> PathBuf {
        let year = format!("{:04}", date.year());
        let month = format!("{:02}", date.month());
        let month_day = format!("{:02}-{:02}", date.month(), date.day());

        self.target_dir.join(year).join(month).join(month_day)
    }

    /// Pure function of target root, capture date and file name.
    ///
    /// The file name is joined as is, so non-UTF-8 names survive unchanged.
    pub fn canonical_target<N: AsRef<OsStr>>(&self, date: &NaiveDateTime, file_name: N) -> PathBuf {
        self.day_dir(date).join(file_name.as_ref())
    }

    /// First free path among `name.ext`, `name(1).ext`, `name(2).ext`, ...
    ///
    /// The probe has no upper bound.
    pub fn unique_target<N: AsRef<OsStr>>(&self, date: &NaiveDateTime, file_name: N) -> PathBuf {
        let file_name = file_name.as_ref();
        let canonical = self.canonical_target(date, file_name);
        if !is_occupied(&canonical) {
            return canonical;
        }

        let dir = self.day_dir(date);
        let (stem, ext) = split_extension(file_name);

        let mut counter: u64 = 1;
        loop {
            let candidate = dir.join(numbered_name(stem, ext, counter));
            if !is_occupied(&candidate) {
                debug!(?candidate, attempts = counter, "Resolved name collision");
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Whether something already exists at `path`.
///
/// Only a definite "not found" counts as free; other stat errors are
/// treated as occupied.
pub fn is_occupied(path: &Path) -> bool {
    match fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != ErrorKind::NotFound,
    }
}

/// Split `name` at its last dot. A leading dot does not start an extension.
fn split_extension(name: &OsStr) -> (&OsStr, Option<&OsStr>) {
    let path = Path::new(name);
    match (path.file_stem(), path.extension()) {
        (Some(stem), Some(ext)) => (stem, Some(ext)),
        _ => (name, None),
    }
}

/// `stem(N).ext`
fn numbered_name(stem: &OsStr, ext: Option<&OsStr>, counter: u64) -> OsString {
    let mut name = stem.to_os_string();
    name.push(format!("({counter})"));
    if let Some(ext) = ext {
        name.push(".");
        name.push(ext);
    }
    name
}
