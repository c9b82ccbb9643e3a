//! MD5 content digests for duplicate detection
//!
//! Files are streamed through a fixed buffer, so memory use does not grow
//! with file size.

use crate::error::{Error, Result};
use md5::{Digest, Md5};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::trace;

/// Read buffer size used while hashing (64KB)
const HASH_BUFFER_SIZE: usize = 64 * 1024;

/// Compute the lower-case hex MD5 of a file's full content
pub fn compute_content_hash(path: &Path) -> Result<String> {
    let hash_error = |e: std::io::Error| Error::HashComputation {
        path: path.to_path_buf(),
        message: e.to_string(),
    };

    let mut file = File::open(path).map_err(hash_error)?;
    let mut hasher = Md5::new();
    let mut buffer = vec![0u8; HASH_BUFFER_SIZE];

    loop {
        let count = file.read(&mut buffer).map_err(hash_error)?;
        if count == 0 {
            break;
        }
        hasher.update(&buffer[..count]);
    }

    let hash = format!("{:x}", hasher.finalize());
    trace!(?path, %hash, "Computed content hash");
    Ok(hash)
}
