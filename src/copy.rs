//! Directory creation cache and buffered file copy

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Copy buffer size (64KB)
pub const COPY_BUFFER_SIZE: usize = 64 * 1024;

/// Directories known to exist during the current run.
///
/// Only grows; a fresh cache is created with every processor.
#[derive(Debug, Default)]
pub struct DirectoryCache {
    dirs: HashSet<PathBuf>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, dir: &Path) -> bool {
        self.dirs.contains(dir)
    }

    pub fn insert(&mut self, dir: PathBuf) {
        self.dirs.insert(dir);
    }

    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Create `dir` (and parents) unless it is already cached
    pub fn ensure(&mut self, dir: &Path) -> std::io::Result<()> {
        if self.contains(dir) {
            return Ok(());
        }
        fs::create_dir_all(dir)?;
        trace!(?dir, "Created directory");
        self.insert(dir.to_path_buf());
        Ok(())
    }
}

/// Copy `source` to `dest` byte for byte, creating the destination
/// directory through `dirs` when needed.
///
/// The destination is created or truncated. If copying fails after the
/// destination was created, the partial file is removed. When `dest`
/// already is `source` (same file through any path), nothing is written.
pub fn copy_file(source: &Path, dest: &Path, dirs: &mut DirectoryCache) -> Result<()> {
    let copy_error = |e: std::io::Error| Error::CopyFailed {
        from: source.to_path_buf(),
        to: dest.to_path_buf(),
        source: e,
    };

    if let Some(parent) = dest.parent() {
        dirs.ensure(parent).map_err(copy_error)?;
    }

    if is_same_file(source, dest) {
        debug!(?source, ?dest, "Source and destination are the same file, not copying");
        return Ok(());
    }

    let src_file = File::open(source).map_err(copy_error)?;
    let dest_file = File::create(dest).map_err(copy_error)?;

    if let Err(e) = copy_contents(src_file, dest_file) {
        if let Err(remove_err) = fs::remove_file(dest) {
            warn!(?dest, error = %remove_err, "Failed to remove partial destination file");
        }
        return Err(copy_error(e));
    }

    trace!(?source, ?dest, "Copied file");
    Ok(())
}

/// Whether both paths resolve to the same existing file
fn is_same_file(source: &Path, dest: &Path) -> bool {
    match (fs::canonicalize(source), fs::canonicalize(dest)) {
        (Ok(source), Ok(dest)) => source == dest,
        _ => false,
    }
}

fn copy_contents(src_file: File, dest_file: File) -> std::io::Result<()> {
    let mut reader = BufReader::with_capacity(COPY_BUFFER_SIZE, src_file);
    let mut writer = BufWriter::with_capacity(COPY_BUFFER_SIZE, dest_file);

    let mut buffer = vec![0u8; COPY_BUFFER_SIZE];
    loop {
        let bytes_read = reader.read(&mut buffer)?;
        if bytes_read == 0 {
            break;
        }
        writer.write_all(&buffer[..bytes_read])?;
    }

    writer.flush()
}
