//! # Core Branch Library
//!
//! This library answers two questions CI pipelines ask about a family of
//! plugin repositories that track a shared core library:
//!
//! - Given a core version, which branch of a plugin repository should be
//!   built against it?
//! - What is a repository's primary integration branch when no
//!   version-specific branch applies?
//!
//! It is used by the `get-plugin-ref` and `get-core-version` command-line
//! tools, but can be embedded in other tooling as well.
//!
//! ## Quick Example
//!
//! ```
//! use core_branch::directory::{Credential, MemoryDirectory};
//! use core_branch::primary::resolve_primary;
//! use core_branch::refs::extract_core_version;
//! use core_branch::resolver::ReleaseResolver;
//!
//! let directory = MemoryDirectory::new().with_repository(
//!     "acme",
//!     "plugin",
//!     ["develop", "master", "release/core_1.2/1.5", "release/core_1.2/1.10"],
//! );
//! let credential = Credential::anonymous();
//!
//! let core = extract_core_version("refs/heads/release/1.2").unwrap();
//! let resolver = ReleaseResolver::new(&directory);
//! let branch = resolver.resolve("acme", "plugin", &core, &credential).unwrap();
//! assert_eq!(branch.as_deref(), Some("release/core_1.2/1.10"));
//!
//! let fallback = resolve_primary(&directory, "acme", "plugin", &credential).unwrap();
//! assert_eq!(fallback.as_deref(), Some("master"));
//! ```
//!
//! ## Core Concepts
//!
//! - **Branch directory (`directory`, `github`, `git`)**: the only remote
//!   capability the library needs, listing the branch names of a repository.
//!   Implementations exist for the GitHub REST API, for `git ls-remote`, and
//!   in memory.
//! - **Versions (`version`)**: dotted numeric versions compared segment by
//!   segment, with missing segments treated as zero.
//! - **Release template (`pattern`)**: the naming convention
//!   `release/core_{core_version}/{release}` and the matcher that extracts the
//!   release number from a branch name.
//! - **Resolvers (`resolver`, `primary`)**: pick the newest release branch for
//!   a core version, or the primary branch (`main` before `master`).
//! - **Refs (`refs`)**: recover the core version from the ref being built and
//!   format branch names as `refs/heads/...`.
//!
//! ## Execution Flow
//!
//! 1.  The core version is read from the CI ref (`get-core-version`) or given
//!     directly.
//! 2.  The plugin repository's branches are listed once.
//! 3.  Branches matching the release template for that core version are
//!     compared by release number and the greatest wins.
//! 4.  If nothing matches, the primary branch is used instead.

pub mod cli;
pub mod commands;
pub mod defaults;
pub mod directory;
pub mod error;
pub mod git;
pub mod github;
pub mod pattern;
pub mod primary;
pub mod refs;
pub mod resolver;
pub mod version;

#[cfg(test)]
mod version_proptest;
