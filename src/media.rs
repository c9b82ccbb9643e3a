//! Media classification and the per-file record carried through the pipeline

use chrono::NaiveDateTime;
use serde::Serialize;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};

/// Photo extensions (lower-case, without the leading dot)
pub const PHOTO_EXTENSIONS: &[&str] = &["arw", "jpg", "jpeg", "png", "heic", "gif", "bmp", "raw"];

/// Video extensions (lower-case, without the leading dot)
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "avi", "mkv", "flv", "wmv"];

/// Coarse media kind of a supported file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Photo,
    Video,
}

impl MediaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Photo => "photo",
            MediaKind::Video => "video",
        }
    }
}

/// Classify a path by its lower-cased extension.
///
/// Returns `None` for anything that is neither a photo nor a video; such
/// files are silently excluded from a scan.
pub fn classify(path: &Path) -> Option<MediaKind> {
    let ext = path.extension()?.to_str()?.to_lowercase();

    if PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Photo)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Some(MediaKind::Video)
    } else {
        None
    }
}

/// A media file discovered by the scanner.
///
/// `capture_date`, `target_path` and `content_hash` start empty and are
/// filled in while the file moves through the processor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MediaFile {
    /// Full source path
    pub path: PathBuf,
    /// File name for display; lossy for non-UTF-8 names
    pub name: String,
    pub kind: MediaKind,
    /// Size in bytes at scan time
    pub size: u64,
    pub capture_date: Option<NaiveDateTime>,
    /// Hex MD5 of the source content, computed only for content-hash detection
    pub content_hash: Option<String>,
    pub target_path: Option<PathBuf>,
}

impl MediaFile {
    pub fn new(path: PathBuf, kind: MediaKind, size: u64) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            path,
            name,
            kind,
            size,
            capture_date: None,
            content_hash: None,
            target_path: None,
        }
    }

    /// Original file name, byte for byte, as used in the target layout
    pub fn file_name(&self) -> &OsStr {
        self.path.file_name().unwrap_or_default()
    }
}
