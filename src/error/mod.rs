//! Error types and handling for pack-assets
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! Constructor helpers are grouped by error domain:
//! - [`fs`]: root resolution, directory walking, file reads and output staging
//! - [`naming`]: identifier sanitization and collisions

pub mod fs;
pub mod naming;


use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for pack-assets operations
#[derive(Error, Diagnostic, Debug)]
pub enum PackError {
    // Root resolution errors
    #[error("Root directory not found: {path}")]
    #[diagnostic(
        code(pack_assets::root::not_found),
        help("Pass the directory that contains the assets to embed")
    )]
    RootNotFound { path: String },

    #[error("Root is not a directory: {path}")]
    #[diagnostic(code(pack_assets::root::not_directory))]
    RootNotDirectory { path: String },

    // Traversal and read errors
    #[error("Failed to list directory: {path}: {reason}")]
    #[diagnostic(code(pack_assets::fs::walk_failed))]
    WalkFailed { path: String, reason: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(pack_assets::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("File too large: {path} is {size} bytes, limit is {limit} bytes")]
    #[diagnostic(
        code(pack_assets::fs::too_large),
        help("Raise the ceiling with --max-file-size or PACK_ASSETS_MAX_FILE_SIZE")
    )]
    FileTooLarge { path: String, size: u64, limit: u64 },

    // Naming errors
    #[error("Cannot derive an identifier from '{name}' ({path})")]
    #[diagnostic(
        code(pack_assets::naming::invalid_identifier),
        help("Names must contain at least one ASCII letter or digit")
    )]
    InvalidIdentifier { name: String, path: String },

    #[error("Invalid namespace prefix: '{prefix}'")]
    #[diagnostic(
        code(pack_assets::naming::invalid_prefix),
        help("Use one or more identifiers separated by '::', e.g. cnc or game::data")
    )]
    InvalidNamespacePrefix { prefix: String },

    #[error("Duplicate identifier '{identifier}' in {scope}: {first} and {second}")]
    #[diagnostic(
        code(pack_assets::naming::duplicate),
        help("Rename one of the entries so their sanitized names differ")
    )]
    DuplicateIdentifier {
        scope: String,
        identifier: String,
        first: String,
        second: String,
    },

    // Output errors
    #[error("Failed to write output: {path}: {reason}")]
    #[diagnostic(code(pack_assets::output::write_failed))]
    OutputWriteFailed { path: String, reason: String },

    #[error("Generated output is out of date: {path}")]
    #[diagnostic(
        code(pack_assets::output::out_of_date),
        help("Run pack-assets without --check to regenerate the file")
    )]
    OutputOutOfDate { path: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(pack_assets::fs::io_error))]
    IoError {
        message: String,
        #[source]
        source: Option<std::io::Error>,
    },
}

impl From<std::io::Error> for PackError {
    fn from(err: std::io::Error) -> Self {
        PackError::IoError {
            message: err.to_string(),
            source: Some(err),
        }
    }
}

impl From<walkdir::Error> for PackError {
    fn from(err: walkdir::Error) -> Self {
        let path = err.path().map(Path::to_path_buf).unwrap_or_default();
        fs::walk_failed(&path, err)
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, PackError>;
