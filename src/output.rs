//! Staged output for generated sources
//!
//! Generated text is never written straight to its destination. Stdout output
//! is held in memory and file output goes to a temporary file in the target's
//! directory; either is published by [`StagedOutput::commit`] only once the
//! whole run has succeeded. Dropping an uncommitted stage discards it, so a
//! failed run never leaves truncated code behind.
//!
//! Check mode never stages anything: it compares generated bytes against the
//! target with [`file_matches`].
//!
//! ## Usage
//!
//! ```ignore
//! let mut output = StagedOutput::file(Path::new("assets.h"))?;
//! write_preamble(&mut output)?;
//! // ...
//! output.commit()?;
//! ```

use std::fs::{self, File};
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::error::Result;
use crate::error::fs::write_failed;

/// What [`StagedOutput::commit`] did with the staged content
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Published {
    /// Content was written to stdout
    Stdout,
    /// The target file was replaced
    Written,
    /// The target already held identical content and was left alone
    Unchanged,
}

#[derive(Debug)]
enum Stage {
    Memory(Vec<u8>),
    TempFile {
        writer: BufWriter<NamedTempFile>,
        target: PathBuf,
    },
}

/// Generated output held back until the run succeeds
#[derive(Debug)]
pub struct StagedOutput {
    stage: Stage,
}

impl StagedOutput {
    /// Stage output bound for stdout
    pub fn stdout() -> Self {
        Self {
            stage: Stage::Memory(Vec::new()),
        }
    }

    /// Stage output bound for `target` in a temporary file beside it
    pub fn file(target: &Path) -> Result<Self> {
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir).map_err(|e| write_failed(&display(target), e))?;

        Ok(Self {
            stage: Stage::TempFile {
                writer: BufWriter::new(temp),
                target: target.to_path_buf(),
            },
        })
    }

    /// Human-readable destination, for logging
    pub fn destination(&self) -> String {
        match &self.stage {
            Stage::Memory(_) => "<stdout>".to_string(),
            Stage::TempFile { target, .. } => display(target),
        }
    }

    /// Publish the staged content
    pub fn commit(self) -> Result<Published> {
        match self.stage {
            Stage::Memory(buffer) => {
                let mut stdout = io::stdout().lock();
                stdout
                    .write_all(&buffer)
                    .and_then(|()| stdout.flush())
                    .map_err(|e| write_failed("<stdout>", e))?;
                Ok(Published::Stdout)
            }
            Stage::TempFile { writer, target } => {
                let name = display(&target);
                let temp = finish(writer, &name)?;

                if same_file_contents(temp.path(), &target).map_err(|e| write_failed(&name, e))? {
                    return Ok(Published::Unchanged);
                }

                apply_permissions(temp.path(), &target).map_err(|e| write_failed(&name, e))?;
                temp.persist(&target)
                    .map_err(|e| write_failed(&name, e.error))?;
                Ok(Published::Written)
            }
        }
    }

    /// Files on disk this stage writes to: the target and its temporary file.
    ///
    /// Paths are resolved against the canonical parent directory so they
    /// compare equal to entries listed under a canonical walk root.
    pub fn paths_on_disk(&self) -> Vec<PathBuf> {
        match &self.stage {
            Stage::Memory(_) => Vec::new(),
            Stage::TempFile { writer, target } => {
                vec![resolve_target(target), resolve_target(writer.get_ref().path())]
            }
        }
    }
}

impl Write for StagedOutput {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match &mut self.stage {
            Stage::Memory(buffer) => buffer.write(buf),
            Stage::TempFile { writer, .. } => writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match &mut self.stage {
            Stage::Memory(_) => Ok(()),
            Stage::TempFile { writer, .. } => writer.flush(),
        }
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn finish(writer: BufWriter<NamedTempFile>, name: &str) -> Result<NamedTempFile> {
    let temp = writer
        .into_inner()
        .map_err(|e| write_failed(name, e.error()))?;
    temp.as_file()
        .sync_all()
        .map_err(|e| write_failed(name, e))?;
    Ok(temp)
}

/// Whether `target` already holds exactly `contents`. A missing target never matches.
pub fn file_matches(target: &Path, contents: &[u8]) -> Result<bool> {
    same_contents(contents, contents.len() as u64, target)
        .map_err(|e| write_failed(&display(target), e))
}

/// `path` with its parent directory canonicalized, or `path` unchanged when
/// the parent cannot be resolved. The file itself need not exist.
pub fn resolve_target(path: &Path) -> PathBuf {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    match (dunce::canonicalize(parent), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

fn same_file_contents(staged: &Path, existing: &Path) -> io::Result<bool> {
    let len = fs::metadata(staged)?.len();
    same_contents(BufReader::new(File::open(staged)?), len, existing)
}

/// Byte-for-byte comparison; a missing `existing` file never matches.
fn same_contents(staged: impl Read, staged_len: u64, existing: &Path) -> io::Result<bool> {
    let existing_meta = match fs::metadata(existing) {
        Ok(meta) => meta,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(false),
        Err(e) => return Err(e),
    };
    if !existing_meta.is_file() || existing_meta.len() != staged_len {
        return Ok(false);
    }

    same_bytes(staged, BufReader::new(File::open(existing)?))
}

/// Compare two streams to their ends. A stream that runs out early differs.
fn same_bytes(mut a: impl Read, mut b: impl Read) -> io::Result<bool> {
    let mut buf_a = [0u8; 8192];
    let mut buf_b = [0u8; 8192];

    loop {
        let read = a.read(&mut buf_a)?;
        if read == 0 {
            return Ok(b.read(&mut buf_b[..1])? == 0);
        }
        match b.read_exact(&mut buf_b[..read]) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => return Ok(false),
            Err(e) => return Err(e),
        }
        if buf_a[..read] != buf_b[..read] {
            return Ok(false);
        }
    }
}

/// Temp files are created owner-only; keep the target's mode, or use 0644 for new files.
fn apply_permissions(staged: &Path, target: &Path) -> io::Result<()> {
    if let Ok(meta) = fs::metadata(target) {
        return fs::set_permissions(staged, meta.permissions());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(staged, fs::Permissions::from_mode(0o644))?;
    }
    Ok(())
}
