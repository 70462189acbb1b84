//! Default values for core-branch configuration.
//!
//! This module provides centralized default values used by the library and
//! the command-line tools, ensuring consistency and avoiding duplication.

/// The release-branch naming convention used by plugin repositories.
///
/// Can be overridden by the `--template` CLI flag or the
/// `CORE_BRANCH_TEMPLATE` environment variable.
pub const DEFAULT_RELEASE_TEMPLATE: &str = "release/core_{core_version}/{release}";

/// Base URL of the GitHub REST API.
///
/// Can be overridden by the `--api-url` CLI flag or the `CORE_BRANCH_API_URL`
/// environment variable, e.g. for GitHub Enterprise.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Base URL that `git ls-remote` remotes are built from.
///
/// The remote for a repository is `<base>/<org>/<repo>.git`.
pub const DEFAULT_GIT_URL: &str = "https://github.com";

/// Preferred primary branch name.
pub const MAIN_BRANCH: &str = "main";

/// Legacy primary branch name, used only when `main` does not exist.
pub const MASTER_BRANCH: &str = "master";

/// Number of branches requested per page from the GitHub API (its maximum).
pub const BRANCHES_PER_PAGE: usize = 100;

/// Maximum time to establish a connection to the remote directory.
pub const HTTP_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Maximum time for a single request, connection and transfer included.
pub const HTTP_REQUEST_TIMEOUT_SECS: u64 = 60;
