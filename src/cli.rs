//! CLI definitions using clap derive API

use clap::Parser;
use clap::builder::{Styles, styling::AnsiColor};
use std::path::PathBuf;

use crate::asset::DEFAULT_MAX_FILE_SIZE;

/// pack-assets - embed binary assets as C++ byte arrays
///
/// Walks a directory tree and emits one `std::array<std::uint8_t, N>` per file,
/// grouped into one namespace per directory.
#[derive(Parser, Debug)]
#[command(
    name = "pack-assets",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Embed a directory tree of binary assets as C++ byte arrays",
    long_about = "Converts every file below ROOT into an inline constexpr std::array of bytes, \
                  declared in a namespace derived from the file's directory. Output is written \
                  only after every file has been read and every name validated.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n    \
                  pack-assets data/ > src/generated/assets.h\n    \
                  pack-assets data/ -o src/generated/assets.h\n    \
                  pack-assets data/ -o src/generated/assets.h --check\n    \
                  pack-assets data/ --namespace game::res --root-name common"
)]
pub struct Cli {
    /// Root directory to scan
    pub root: PathBuf,

    /// Write the generated source to FILE (atomically) instead of stdout
    #[arg(long, short = 'o', value_name = "FILE", env = "PACK_ASSETS_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Outer namespace, one or more identifiers separated by '::'
    #[arg(
        long,
        short = 'n',
        value_name = "PREFIX",
        default_value = "cnc",
        env = "PACK_ASSETS_NAMESPACE"
    )]
    pub namespace: String,

    /// Namespace segment used for files directly inside ROOT
    #[arg(
        long,
        value_name = "NAME",
        default_value = "assets",
        env = "PACK_ASSETS_ROOT_NAME"
    )]
    pub root_name: String,

    /// Largest accepted asset, in bytes
    #[arg(
        long,
        value_name = "BYTES",
        default_value_t = DEFAULT_MAX_FILE_SIZE,
        env = "PACK_ASSETS_MAX_FILE_SIZE"
    )]
    pub max_file_size: u64,

    /// Verify that FILE is up to date instead of writing it
    #[arg(long, requires = "output")]
    pub check: bool,

    /// Enable verbose output
    #[arg(long, short = 'v')]
    pub verbose: bool,
}
