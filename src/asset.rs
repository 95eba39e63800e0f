//! Bounded reads of asset files

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use crate::error::fs::read_failed;
use crate::error::{PackError, Result};

/// Default per-file ceiling: 16 MiB
pub const DEFAULT_MAX_FILE_SIZE: u64 = 16 * 1024 * 1024;

/// One input file, loaded and named, ready to be emitted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Path relative to the walk root
    pub relative: PathBuf,
    /// Identifier of the generated array
    pub identifier: String,
    pub bytes: Vec<u8>,
}

/// Read a whole file, failing once more than `limit` bytes have been seen.
///
/// The limit is checked against the metadata length up front and again
/// against the bytes actually read, since pipes and devices report no size.
pub fn read_bounded(path: &Path, limit: u64) -> Result<Vec<u8>> {
    let file = File::open(path).map_err(|e| read_failed(path, e))?;

    let reported = file.metadata().map_err(|e| read_failed(path, e))?.len();
    if reported > limit {
        return Err(too_large(path, reported, limit));
    }

    let mut bytes = Vec::with_capacity(usize::try_from(reported).unwrap_or(0));
    BufReader::new(file)
        .take(limit.saturating_add(1))
        .read_to_end(&mut bytes)
        .map_err(|e| read_failed(path, e))?;

    let read = bytes.len() as u64;
    if read > limit {
        return Err(too_large(path, read, limit));
    }

    Ok(bytes)
}

fn too_large(path: &Path, size: u64, limit: u64) -> PackError {
    PackError::FileTooLarge {
        path: path.display().to_string(),
        size,
        limit,
    }
}
