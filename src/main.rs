//! pack-assets - embed binary assets in C++ sources
//!
//! Walks a directory tree and emits every file as an `inline constexpr
//! std::array<std::uint8_t, N>`, one namespace per directory, so a program can
//! ship its assets without reading files at runtime.

use clap::Parser;
use miette::Diagnostic;

mod asset;
mod cli;
mod config;
mod emit;
mod error;
mod logging;
mod mangle;
mod output;
mod pipeline;
mod symbols;
mod walker;

use cli::Cli;
use config::Config;
use error::{PackError, Result};

fn run(cli: &Cli) -> Result<()> {
    let config = Config::from_cli(cli)?;
    pipeline::run(&config)?;
    Ok(())
}

fn report(err: &PackError) {
    eprintln!("Error: {err}");
    if let Some(help) = err.help() {
        eprintln!("  help: {help}");
    }
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        report(&e);
        std::process::exit(1);
    }
}
