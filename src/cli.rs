//! CLI argument parsing and logging setup for the `get-plugin-ref` and
//! `get-core-version` binaries.
//!
//! Both tools print exactly one line on stdout. Logging goes to stderr, so it
//! never mixes with the result a CI script captures.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;

use crate::commands;

/// Print the ref of the plugin branch to build against a core version
///
/// Prints `refs/heads/<branch>` for the newest release branch matching the
/// core version, falling back to the repository's primary branch (`main`,
/// then `master`). Prints an empty line if neither exists.
#[derive(Parser, Debug)]
#[command(name = "get-plugin-ref")]
#[command(version)]
pub struct PluginRefCli {
    #[command(flatten)]
    pub args: commands::plugin_ref::PluginRefArgs,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,
}

impl PluginRefCli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level);
        commands::plugin_ref::execute(self.args)
    }
}

/// Print the core version encoded in a release branch ref
///
/// Prints `<version>` for refs of the form `refs/heads/release/<version>`,
/// and an empty line for anything else.
#[derive(Parser, Debug)]
#[command(name = "get-core-version")]
#[command(version)]
pub struct CoreVersionCli {
    #[command(flatten)]
    pub args: commands::core_version::CoreVersionArgs,

    /// Set log level (off, error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    pub log_level: LevelFilter,
}

impl CoreVersionCli {
    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        init_logging(self.log_level);
        commands::core_version::execute(self.args)
    }
}

/// Initializes `env_logger` on stderr at `level`.
///
/// `RUST_LOG`, when set, takes precedence. Calling this more than once is
/// harmless.
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env(env_logger::Env::default())
        .target(env_logger::Target::Stderr)
        .format_timestamp(None)
        .try_init();
}
