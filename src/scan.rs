//! Recursive source-tree scanner

use crate::error::{Error, Result};
use crate::media::{MediaFile, classify};
use std::path::{Path, PathBuf};
use tracing::{debug, info, trace};
use walkdir::WalkDir;

/// Walks a source directory and collects every supported media file
#[derive(Debug, Clone)]
pub struct Scanner {
    source_dir: PathBuf,
}

impl Scanner {
    pub fn new<P: AsRef<Path>>(source_dir: P) -> Self {
        Self {
            source_dir: source_dir.as_ref().to_path_buf(),
        }
    }

    /// Walk the whole tree and return the supported files in walk order.
    ///
    /// Any walk error (permission denied, broken symlink, missing root)
    /// aborts the scan; partial results are discarded.
    pub fn scan(&self) -> Result<Vec<MediaFile>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(&self.source_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| self.scan_error(e))?;

            if !entry.file_type().is_file() {
                continue;
            }

            let path = entry.path();
            let Some(kind) = classify(path) else {
                trace!(?path, "Ignoring unsupported file");
                continue;
            };

            let size = entry.metadata().map_err(|e| self.scan_error(e))?.len();
            files.push(MediaFile::new(path.to_path_buf(), kind, size));
        }

        info!(
            source = %self.source_dir.display(),
            count = files.len(),
            "Scan complete"
        );
        debug!(?files, "Scanned media files");

        Ok(files)
    }

    fn scan_error(&self, source: walkdir::Error) -> Error {
        let path = source
            .path()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.source_dir.clone());
        Error::ScanFailed { path, source }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::media::MediaKind;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_scan_recursive_and_filtered() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("2023").join("trip");
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("a.jpg"), b"photo").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();
        fs::write(nested.join("b.MP4"), b"video bytes").unwrap();
        fs::write(nested.join("c.heic"), b"heic").unwrap();
        fs::create_dir_all(dir.path().join("folder.jpg")).unwrap();

        let files = Scanner::new(dir.path()).scan().unwrap();
        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();

        assert_eq!(names, vec!["b.MP4", "c.heic", "a.jpg"]);
        assert_eq!(files[0].kind, MediaKind::Video);
        assert_eq!(files[0].size, 11);
        assert_eq!(files[1].kind, MediaKind::Photo);
        assert_eq!(files[2].path, dir.path().join("a.jpg"));
    }

    #[test]
    fn test_scan_empty_directory() {
        let dir = TempDir::new().unwrap();
        let files = Scanner::new(dir.path()).scan().unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = Scanner::new(dir.path().join("missing")).scan().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScanFailed);
        assert!(err.is_fatal());
    }

    #[cfg(unix)]
    #[test]
    fn test_scan_broken_symlink_is_fatal() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a.jpg"), b"photo").unwrap();
        std::os::unix::fs::symlink(dir.path().join("gone.jpg"), dir.path().join("link.jpg"))
            .unwrap();

        let err = Scanner::new(dir.path()).scan().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ScanFailed);
    }
}
