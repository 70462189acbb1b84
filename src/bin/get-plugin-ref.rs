//! # get-plugin-ref
//!
//! Binary entry point for the `get-plugin-ref` tool:
//!
//! ```text
//! get-plugin-ref <org> <repo> <credential> [<core-version>]
//! ```
//!
//! Prints `refs/heads/<branch>` for the plugin branch to build. Argument
//! parsing and command logic live in the `core_branch` library; this binary
//! only parses arguments and reports errors.

use anyhow::Result;
use clap::Parser;
use core_branch::cli::PluginRefCli;

fn main() -> Result<()> {
    let cli = PluginRefCli::parse();
    cli.execute()
}
