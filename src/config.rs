//! Validated run configuration
//!
//! Built once from the parsed command line; the pipeline never looks at raw
//! arguments or the process working directory.

use std::io;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::error::{PackError, Result};
use crate::mangle::{parse_prefix, sanitize_identifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Canonical root directory
    pub root: PathBuf,
    /// `None` writes to stdout
    pub output: Option<PathBuf>,
    /// Outer namespace segments, e.g. `["cnc"]`
    pub prefix: Vec<String>,
    /// Segment used for the root directory's namespace
    pub root_name: String,
    pub max_file_size: u64,
    pub check: bool,
}

impl Config {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let root = resolve_root(&cli.root)?;
        let prefix = parse_prefix(&cli.namespace)?;

        if sanitize_identifier(&cli.root_name).as_deref() != Some(cli.root_name.as_str()) {
            return Err(PackError::InvalidIdentifier {
                name: cli.root_name.clone(),
                path: "--root-name".to_string(),
            });
        }

        Ok(Self {
            root,
            output: cli.output.clone(),
            prefix,
            root_name: cli.root_name.clone(),
            max_file_size: cli.max_file_size,
            check: cli.check,
        })
    }
}

fn resolve_root(root: &std::path::Path) -> Result<PathBuf> {
    let canonical = dunce::canonicalize(root).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => PackError::RootNotFound {
            path: root.display().to_string(),
        },
        _ => PackError::IoError {
            message: format!("{}: {e}", root.display()),
            source: Some(e),
        },
    })?;

    if !canonical.is_dir() {
        return Err(PackError::RootNotDirectory {
            path: root.display().to_string(),
        });
    }

    Ok(canonical)
}
