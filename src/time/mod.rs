//! Capture date extraction
//!
//! Photos try embedded EXIF metadata first and fall back to the file's
//! modification time. Videos always use the modification time. A missing
//! or undecodable EXIF block is not an error; only a file that cannot be
//! stated at all fails.

pub mod exif;

use crate::error::{Error, Result};
use crate::media::{MediaFile, MediaKind};
use chrono::{DateTime, Local, NaiveDateTime};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Source of the extracted timestamp
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeSource {
    /// Extracted from EXIF metadata
    Exif,
    /// From file system modification time
    FileSystem,
}

/// Result of timestamp extraction
#[derive(Debug, Clone)]
pub struct ExtractedTime {
    /// Local wall-clock capture time
    pub timestamp: NaiveDateTime,
    pub source: TimeSource,
}

/// Derives capture dates. Stateless; one instance is shared by a whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, file: &MediaFile) -> Result<ExtractedTime> {
        let path = file.path.as_path();

        if file.kind == MediaKind::Photo {
            match exif::extract_exif_time(path) {
                Ok(timestamp) => {
                    debug!(?path, %timestamp, "Extracted time from EXIF");
                    return Ok(ExtractedTime {
                        timestamp,
                        source: TimeSource::Exif,
                    });
                }
                Err(e) => {
                    debug!(?path, error = %e, "No usable EXIF time, using modification time");
                }
            }
        }

        Ok(ExtractedTime {
            timestamp: modification_time(path)?,
            source: TimeSource::FileSystem,
        })
    }

    /// Convenience wrapper returning only the timestamp
    pub fn extract_date(&self, file: &MediaFile) -> Result<NaiveDateTime> {
        self.extract(file).map(|t| t.timestamp)
    }
}

/// File system modification time as local wall-clock time
pub fn modification_time(path: &Path) -> Result<NaiveDateTime> {
    let modified = fs::metadata(path)
        .and_then(|m| m.modified())
        .map_err(|source| Error::DateExtractionFailed {
            path: path.to_path_buf(),
            source,
        })?;

    let datetime: DateTime<Local> = modified.into();
    Ok(datetime.naive_local())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::test_support::{noon, write_with_mtime};
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_photo_without_exif_falls_back_to_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("photo.jpg");
        write_with_mtime(&path, b"not really a jpeg", noon(2024, 3, 15));

        let file = MediaFile::new(path, MediaKind::Photo, 17);
        let extracted = DateExtractor::new().extract(&file).unwrap();

        assert_eq!(extracted.timestamp, noon(2024, 3, 15));
        assert_eq!(extracted.source, TimeSource::FileSystem);
    }

    #[test]
    fn test_photo_with_exif_uses_exif() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("exif.jpg");
        write_with_mtime(
            &path,
            &super::exif::tests::jpeg_with_datetime("2021:07:04 09:15:30"),
            noon(2024, 3, 15),
        );

        let file = MediaFile::new(path, MediaKind::Photo, 0);
        let extracted = DateExtractor::new().extract(&file).unwrap();

        assert_eq!(extracted.source, TimeSource::Exif);
        assert_eq!(extracted.timestamp.to_string(), "2021-07-04 09:15:30");
    }

    #[test]
    fn test_video_always_uses_mtime() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("clip.mp4");
        // Even a payload that looks like EXIF is ignored for videos
        write_with_mtime(
            &path,
            &super::exif::tests::jpeg_with_datetime("2021:07:04 09:15:30"),
            noon(2024, 5, 20),
        );

        let file = MediaFile::new(path, MediaKind::Video, 0);
        let extracted = DateExtractor::new().extract(&file).unwrap();

        assert_eq!(extracted.timestamp, noon(2024, 5, 20));
        assert_eq!(extracted.source, TimeSource::FileSystem);
    }

    #[test]
    fn test_missing_file_fails() {
        let file = MediaFile::new(PathBuf::from("/definitely/not/here.jpg"), MediaKind::Photo, 0);
        let err = DateExtractor::new().extract_date(&file).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DateExtractionFailed);
    }

    #[test]
    fn test_modification_time_is_local() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("a.png");
        write_with_mtime(&path, b"x", noon(2023, 12, 31));
        assert_eq!(modification_time(&path).unwrap(), noon(2023, 12, 31));
    }
}
