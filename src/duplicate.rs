//! Duplicate detection against the canonical target path

use crate::config::DuplicateDetection;
use crate::error::{Error, Result};
use crate::hash::compute_content_hash;
use crate::media::MediaFile;
use crate::planner::is_occupied;
use tracing::debug;

/// Decides whether a file's target path already holds the same logical file
#[derive(Debug, Clone, Copy)]
pub struct DuplicateDetector {
    detection: DuplicateDetection,
}

impl DuplicateDetector {
    pub fn new(detection: DuplicateDetection) -> Self {
        Self { detection }
    }

    /// Check `file.target_path` for a duplicate.
    ///
    /// A file without a target path, or whose target does not exist, is
    /// never a duplicate. Under content-hash detection the source hash is
    /// cached on `file`.
    pub fn is_duplicate(&self, file: &mut MediaFile) -> Result<bool> {
        let Some(target) = file.target_path.clone() else {
            return Ok(false);
        };

        if !is_occupied(&target) {
            return Ok(false);
        }

        match self.detection {
            DuplicateDetection::ByName => {
                debug!(?target, "Target already exists (by name)");
                Ok(true)
            }
            DuplicateDetection::ByContentHash => {
                let source_hash = match &file.content_hash {
                    Some(hash) => hash.clone(),
                    None => {
                        let hash = compute_content_hash(&file.path)
                            .map_err(|e| check_failed(file, e))?;
                        file.content_hash = Some(hash.clone());
                        hash
                    }
                };

                let target_hash =
                    compute_content_hash(&target).map_err(|e| check_failed(file, e))?;

                let duplicate = source_hash == target_hash;
                debug!(?target, duplicate, "Compared content hashes");
                Ok(duplicate)
            }
        }
    }
}

fn check_failed(file: &MediaFile, source: Error) -> Error {
    Error::DuplicateCheckFailed {
        path: file.path.clone(),
        message: source.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::media::MediaKind;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn media_file(source: &Path, target: &Path) -> MediaFile {
        let mut file = MediaFile::new(source.to_path_buf(), MediaKind::Photo, 0);
        file.target_path = Some(target.to_path_buf());
        file
    }

    #[test]
    fn test_missing_target_is_not_duplicate() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.jpg");
        fs::write(&source, b"abc").unwrap();
        let mut file = media_file(&source, &dir.path().join("out").join("a.jpg"));

        for detection in [DuplicateDetection::ByName, DuplicateDetection::ByContentHash] {
            assert!(!DuplicateDetector::new(detection).is_duplicate(&mut file).unwrap());
        }
        // Short-circuit means nothing was hashed
        assert!(file.content_hash.is_none());
    }

    #[test]
    fn test_by_name_ignores_content() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.jpg");
        let target = dir.path().join("b.jpg");
        fs::write(&source, b"one").unwrap();
        fs::write(&target, b"completely different").unwrap();

        let mut file = media_file(&source, &target);
        assert!(DuplicateDetector::new(DuplicateDetection::ByName).is_duplicate(&mut file).unwrap());
        assert!(file.content_hash.is_none());
    }

    #[test]
    fn test_by_content_hash_identical() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("a.jpg");
        let target = dir.path().join("b.jpg");
        fs::write(&source, b"same bytes").unwrap();
        fs::write(&target, b"same bytes").unwrap();

        let mut file = media_file(&source, &target);
        let detector = DuplicateDetector::new(DuplicateDetection::ByContentHash);
        assert!(detector.is_duplicate(&mut file).unwrap());
        assert!(file.content_hash.is_some());
    }

    #[test]
    fn test_by_content_hash_different() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("photo.jpg");
        let target = dir.path().join("out").join("photo.jpg");
        fs::create_dir_all(target.parent().unwrap()).unwrap();
        fs::write(&source, b"new shot").unwrap();
        fs::write(&target, b"old shot").unwrap();

        let mut file = media_file(&source, &target);
        let detector = DuplicateDetector::new(DuplicateDetection::ByContentHash);
        assert!(!detector.is_duplicate(&mut file).unwrap());
    }

    #[test]
    fn test_cached_hash_is_reused() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("b.jpg");
        fs::write(&target, b"same bytes").unwrap();

        // Source no longer readable, but its hash is already known
        let mut file = media_file(&dir.path().join("gone.jpg"), &target);
        file.content_hash = Some(compute_content_hash(&target).unwrap());

        let detector = DuplicateDetector::new(DuplicateDetection::ByContentHash);
        assert!(detector.is_duplicate(&mut file).unwrap());
    }

    #[test]
    fn test_hash_failure_is_reported() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("b.jpg");
        fs::write(&target, b"bytes").unwrap();

        let mut file = media_file(&dir.path().join("gone.jpg"), &target);
        let err = DuplicateDetector::new(DuplicateDetection::ByContentHash)
            .is_duplicate(&mut file)
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateCheckFailed);
    }
}
