//! Common test utilities for pack-assets integration tests

#![allow(dead_code)]

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// A temporary asset tree for integration tests
pub struct TestTree {
    /// Temporary directory
    pub temp: TempDir,
    /// Path of the asset root (`<temp>/assets`)
    pub root: PathBuf,
}

impl TestTree {
    /// Create a new, empty asset tree
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().join("assets");
        std::fs::create_dir(&root).expect("Failed to create asset root");
        Self { temp, root }
    }

    /// Write a file below the asset root, creating parent directories
    pub fn write_file(&self, path: &str, content: &[u8]) {
        let file_path = self.root.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    /// Create a directory below the asset root
    pub fn create_dir(&self, path: &str) -> PathBuf {
        let dir = self.root.join(path);
        std::fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Path outside the asset root, suitable for `--output`
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.temp.path().join(name)
    }
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Command for the real pack-assets binary with a clean environment
pub fn pack_assets_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_pack-assets"));
    for var in [
        "PACK_ASSETS_OUTPUT",
        "PACK_ASSETS_NAMESPACE",
        "PACK_ASSETS_ROOT_NAME",
        "PACK_ASSETS_MAX_FILE_SIZE",
        "PACK_ASSETS_LOG",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Run pack-assets on `root` and return stdout, asserting success
pub fn pack_to_string(root: &Path) -> String {
    let output = pack_assets_cmd()
        .arg(root)
        .output()
        .expect("Failed to run pack-assets");
    assert!(
        output.status.success(),
        "pack-assets failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8(output.stdout).expect("Generated output must be UTF-8")
}

/// One parsed array declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedArray {
    pub name: String,
    pub declared_len: usize,
    pub bytes: Vec<u8>,
    /// Number of byte values on each value line
    pub line_counts: Vec<usize>,
}

/// Parse generated source into namespace -> arrays, in emission order.
///
/// Only understands the layout pack-assets produces.
pub fn parse_generated(text: &str) -> BTreeMap<String, Vec<ParsedArray>> {
    let mut namespaces: BTreeMap<String, Vec<ParsedArray>> = BTreeMap::new();
    let mut current_ns: Option<String> = None;
    let mut current_array: Option<ParsedArray> = None;

    for line in text.lines() {
        if let Some(rest) = line.strip_prefix("namespace ") {
            if let Some(name) = rest.strip_suffix(" { }") {
                let previous = namespaces.insert(name.to_string(), Vec::new());
                assert!(previous.is_none(), "namespace {name} emitted twice");
            } else {
                let name = rest.strip_suffix(" {").expect("namespace line");
                let previous = namespaces.insert(name.to_string(), Vec::new());
                assert!(previous.is_none(), "namespace {name} emitted twice");
                current_ns = Some(name.to_string());
            }
        } else if let Some(rest) = line.strip_prefix("\tinline constexpr std::array<std::uint8_t, ") {
            let (len, rest) = rest.split_once("> ").expect("array header");
            let name = rest.strip_suffix(" = {").expect("array header end");
            current_array = Some(ParsedArray {
                name: name.to_string(),
                declared_len: len.parse().expect("array length"),
                bytes: Vec::new(),
                line_counts: Vec::new(),
            });
        } else if let Some(values) = line.strip_prefix("\t\t") {
            let array = current_array.as_mut().expect("values outside of an array");
            let parsed: Vec<u8> = values
                .split(',')
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(|v| v.parse().expect("decimal byte"))
                .collect();
            array.line_counts.push(parsed.len());
            array.bytes.extend(parsed);
        } else if line == "\t};" {
            let array = current_array.take().expect("array close");
            let ns = current_ns.as_ref().expect("array outside of a namespace");
            namespaces.get_mut(ns).expect("known namespace").push(array);
        } else if line == "}" {
            current_ns = None;
        }
    }

    namespaces
}
