//! # CLI Command Implementations
//!
//! This module contains the implementation behind each command-line tool.
//!
//! ## Structure
//!
//! Each command module contains:
//! - An `Args` struct that defines the command-specific arguments and options,
//!   derived using `clap`.
//! - A `run` function that computes the line to print, without printing it.
//! - An `execute` function that calls `run` and writes the result to stdout.

pub mod core_version;
pub mod plugin_ref;
