//! Packing pipeline
//!
//! Walks the root, validates every generated name, reads each asset and emits
//! it into a staged output that is published only at the end. Check mode
//! generates into memory and compares, touching nothing on disk.

use std::io::Write;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::asset::{AssetRecord, read_bounded};
use crate::config::Config;
use crate::emit::{
    close_namespace, open_namespace, write_asset, write_empty_namespace, write_preamble,
};
use crate::error::{PackError, Result};
use crate::mangle::{mangle_file_name, mangle_namespace};
use crate::output::{Published, StagedOutput, file_matches, resolve_target};
use crate::symbols::SymbolTable;
use crate::walker::{DirectoryNode, DirectoryWalker};

/// Totals for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PackSummary {
    pub namespaces: usize,
    pub assets: usize,
    pub bytes: u64,
}

/// Generate, then publish or check, according to `config`.
pub fn run(config: &Config) -> Result<(PackSummary, Published)> {
    if config.check {
        return check(config);
    }

    let mut output = match &config.output {
        Some(path) => StagedOutput::file(path)?,
        None => StagedOutput::stdout(),
    };
    let destination = output.destination();
    let skip = output.paths_on_disk();

    let summary = generate(config, &skip, &mut output)?;

    let published = output.commit()?;
    info!(
        namespaces = summary.namespaces,
        assets = summary.assets,
        bytes = summary.bytes,
        destination = %destination,
        ?published,
        "packed assets"
    );
    Ok((summary, published))
}

fn check(config: &Config) -> Result<(PackSummary, Published)> {
    let Some(target) = &config.output else {
        return Err(PackError::OutputOutOfDate {
            path: "<stdout>".to_string(),
        });
    };
    let destination = target.display().to_string();

    let mut generated = Vec::<u8>::new();
    let summary = generate(config, &[resolve_target(target)], &mut generated)?;

    if !file_matches(target, &generated)? {
        return Err(PackError::OutputOutOfDate { path: destination });
    }
    info!(destination = %destination, "generated output is up to date");
    Ok((summary, Published::Unchanged))
}

/// Write the complete generated source for `config.root` into `out`,
/// leaving out the files in `skip`.
pub fn generate<W: Write>(
    config: &Config,
    skip: &[PathBuf],
    out: &mut W,
) -> Result<PackSummary> {
    let mut symbols = SymbolTable::new();
    let mut summary = PackSummary::default();

    write_preamble(out)?;

    for node in DirectoryWalker::new(&config.root).excluding(skip.iter().cloned()) {
        let node = node?;
        emit_directory(config, &node, &mut symbols, &mut summary, out)?;
    }

    out.flush()?;
    Ok(summary)
}

fn emit_directory<W: Write>(
    config: &Config,
    node: &DirectoryNode,
    symbols: &mut SymbolTable,
    summary: &mut PackSummary,
    out: &mut W,
) -> Result<()> {
    let relative = node.display_relative();
    let namespace = mangle_namespace(&config.prefix, &config.root_name, &relative)?;
    symbols.declare_namespace(&namespace, &relative)?;
    let scope = namespace.to_string();

    // Name every file before reading any, so collisions surface without I/O.
    let mut identifiers = Vec::with_capacity(node.files.len());
    for name in &node.files {
        let origin = node.relative.join(name).to_string_lossy().replace('\\', "/");
        let identifier = mangle_file_name(&name.to_string_lossy(), &origin)?;
        symbols.declare(&scope, &identifier, &origin)?;
        identifiers.push(identifier);
    }

    debug!(namespace = %scope, files = identifiers.len(), "emitting namespace");
    summary.namespaces += 1;

    if identifiers.is_empty() {
        return write_empty_namespace(out, &namespace);
    }

    open_namespace(out, &namespace)?;
    for (name, identifier) in node.files.iter().zip(identifiers) {
        let bytes = read_bounded(&node.path.join(name), config.max_file_size)?;
        let asset = AssetRecord {
            relative: node.relative.join(name),
            identifier,
            bytes,
        };
        debug!(
            path = %asset.relative.display(),
            identifier = %asset.identifier,
            len = asset.bytes.len(),
            "emitting asset"
        );

        write_asset(out, &asset)?;
        summary.assets += 1;
        summary.bytes += asset.bytes.len() as u64;
    }
    close_namespace(out)
}
