//! # Core Version Command Implementation
//!
//! This module implements `get-core-version`, which turns the ref a CI job is
//! building (e.g. `refs/heads/release/2.3`) into the core version to resolve
//! plugin branches against (`2.3`).
//!
//! Refs that are not core release branches print an empty line and still
//! exit successfully. The output can be fed straight into `get-plugin-ref`,
//! which treats an empty core version as absent.

use anyhow::Result;
use clap::Args;
use log::info;

use crate::refs::extract_core_version;

#[derive(Args, Debug)]
pub struct CoreVersionArgs {
    /// Fully-qualified branch ref, e.g. `refs/heads/release/2.3`
    #[arg(value_name = "REF")]
    pub reference: String,
}

/// Computes the line `get-core-version` prints.
pub fn run(args: &CoreVersionArgs) -> String {
    match extract_core_version(&args.reference) {
        Some(version) => version,
        None => {
            info!("{} is not a core release branch ref", args.reference);
            String::new()
        }
    }
}

/// Execute the `get-core-version` command.
pub fn execute(args: CoreVersionArgs) -> Result<()> {
    println!("{}", run(&args));
    Ok(())
}
