//! # get-core-version
//!
//! Binary entry point for the `get-core-version` tool:
//!
//! ```text
//! get-core-version <ref>
//! ```
//!
//! Prints the core version encoded in a `refs/heads/release/<version>` ref,
//! or an empty line.

use anyhow::Result;
use clap::Parser;
use core_branch::cli::CoreVersionCli;

fn main() -> Result<()> {
    let cli = CoreVersionCli::parse();
    cli.execute()
}
