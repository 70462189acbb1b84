//! # Branch References
//!
//! CI systems expose the branch being built as a fully-qualified reference
//! such as `refs/heads/release/2.3`. This module recovers the core version
//! embedded in such a reference, and formats branch names back into
//! references.
//!
//! Extraction is two separate matches: the reference grammar
//! (`refs/heads/<branch>`) and the core branch naming convention
//! (`release/<version>`) are parsed independently, so either can change
//! without touching the other.
//!
//! The version is returned as written. It is not checked here; the consumer
//! (usually [`ReleaseResolver`](crate::resolver::ReleaseResolver)) validates it.
//!
//! ```
//! use core_branch::refs::extract_core_version;
//!
//! assert_eq!(extract_core_version("refs/heads/release/2.3").as_deref(), Some("2.3"));
//! assert_eq!(extract_core_version("refs/heads/develop"), None);
//! assert_eq!(extract_core_version("refs/tags/release/2.3"), None);
//! ```

/// Prefix of fully-qualified branch references.
pub const HEADS_PREFIX: &str = "refs/heads/";

/// Prefix of core release branches.
pub const CORE_RELEASE_PREFIX: &str = "release/";

/// Returns the branch named by a `refs/heads/<branch>` reference.
pub fn branch_from_ref(reference: &str) -> Option<&str> {
    reference
        .strip_prefix(HEADS_PREFIX)
        .filter(|branch| !branch.is_empty())
}

/// Returns the version of a core release branch named `release/<version>`.
///
/// The version is a single path component; `release/core_1.2/1.0` is a plugin
/// release branch, not a core one.
pub fn core_version_from_branch(branch: &str) -> Option<&str> {
    branch
        .strip_prefix(CORE_RELEASE_PREFIX)
        .filter(|version| !version.is_empty() && !version.contains('/'))
}

/// Recovers the core version from a fully-qualified branch reference.
pub fn extract_core_version(reference: &str) -> Option<String> {
    let branch = branch_from_ref(reference)?;
    core_version_from_branch(branch).map(|version| version.to_string())
}

/// Formats a branch name as a fully-qualified reference.
pub fn branch_ref(branch: &str) -> String {
    format!("{}{}", HEADS_PREFIX, branch)
}
