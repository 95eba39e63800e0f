//! C++ source emission
//!
//! Output layout:
//!
//! ```text
//! #include <array>
//! #include <cinttypes>
//! #include <cstddef>
//!
//! namespace cnc::assets {
//! 	inline constexpr std::array<std::uint8_t, 3> icon_png = {
//! 		137, 80, 78,
//! 	};
//! }
//! namespace cnc::empty { }
//! ```

use std::io::Write;

use crate::asset::AssetRecord;
use crate::error::Result;
use crate::mangle::Namespace;

/// Maximum number of byte values on one line of an array literal
pub const BYTES_PER_LINE: usize = 40;

const PREAMBLE: &str = "#include <array>\n#include <cinttypes>\n#include <cstddef>\n\n";

pub fn write_preamble<W: Write>(out: &mut W) -> Result<()> {
    out.write_all(PREAMBLE.as_bytes())?;
    Ok(())
}

/// Write a block for a directory with no files.
pub fn write_empty_namespace<W: Write>(out: &mut W, namespace: &Namespace) -> Result<()> {
    writeln!(out, "namespace {namespace} {{ }}")?;
    Ok(())
}

pub fn open_namespace<W: Write>(out: &mut W, namespace: &Namespace) -> Result<()> {
    writeln!(out, "namespace {namespace} {{")?;
    Ok(())
}

pub fn close_namespace<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "}}")?;
    Ok(())
}

/// Write the array declaration for one asset.
pub fn write_asset<W: Write>(out: &mut W, asset: &AssetRecord) -> Result<()> {
    write_array(out, &asset.identifier, &asset.bytes)
}

/// Write a fixed-size array declaration whose length equals `bytes.len()`.
pub fn write_array<W: Write>(out: &mut W, identifier: &str, bytes: &[u8]) -> Result<()> {
    writeln!(
        out,
        "\tinline constexpr std::array<std::uint8_t, {}> {identifier} = {{",
        bytes.len()
    )?;

    for line in bytes.chunks(BYTES_PER_LINE) {
        out.write_all(b"\t\t")?;
        for (i, byte) in line.iter().enumerate() {
            if i > 0 {
                out.write_all(b" ")?;
            }
            write!(out, "{byte},")?;
        }
        out.write_all(b"\n")?;
    }

    out.write_all(b"\t};\n")?;
    Ok(())
}
