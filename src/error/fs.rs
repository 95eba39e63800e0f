//! File system errors

use std::path::Path;

use super::PackError;

/// Creates a file read error
pub fn read_failed(path: &Path, reason: impl ToString) -> PackError {
    PackError::FileReadFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates a directory listing error
pub fn walk_failed(path: &Path, reason: impl ToString) -> PackError {
    PackError::WalkFailed {
        path: path.display().to_string(),
        reason: reason.to_string(),
    }
}

/// Creates an output staging or publishing error
pub fn write_failed(path: &str, reason: impl ToString) -> PackError {
    PackError::OutputWriteFailed {
        path: path.to_string(),
        reason: reason.to_string(),
    }
}
