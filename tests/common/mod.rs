//! Shared test utilities for the CLI end-to-end tests.
//!
//! ## Usage
//!
//! Add `mod common;` to your test file, then use the helpers:
//!
//! ```rust,ignore
//! mod common;
//! use common::prelude::*;
//!
//! #[test]
//! fn test_example() {
//!     let mut server = mockito::Server::new();
//!     mock_branches(&mut server, "acme", "plugin", &["main"]);
//!     plugin_ref_cmd(&server).args(["acme", "plugin", "tok"]).assert().success();
//! }
//! ```

use std::path::Path;
use std::process::Command;

/// Re-export commonly used test dependencies for convenience.
pub mod prelude {
    #[allow(unused_imports)]
    pub use super::{
        core_version_cmd, git_available, mock_branches, mock_owner, plugin_ref_cmd, LocalRemote,
    };
    pub use assert_cmd::cargo::cargo_bin_cmd;
    pub use predicates::prelude::*;
}

/// Environment variables the tools read; cleared so the host cannot leak
/// configuration into a test.
const TOOL_ENV: &[&str] = &[
    "CORE_BRANCH_BACKEND",
    "CORE_BRANCH_API_URL",
    "CORE_BRANCH_GIT_URL",
    "CORE_BRANCH_TEMPLATE",
    "RUST_LOG",
];

fn clean(mut cmd: assert_cmd::Command) -> assert_cmd::Command {
    for var in TOOL_ENV {
        cmd.env_remove(var);
    }
    cmd
}

/// A `get-core-version` command with a clean environment.
#[allow(dead_code)]
pub fn core_version_cmd() -> assert_cmd::Command {
    clean(assert_cmd::cargo::cargo_bin_cmd!("get-core-version"))
}

/// A `get-plugin-ref` command pointed at a mock GitHub API server.
#[allow(dead_code)]
pub fn plugin_ref_cmd(server: &mockito::ServerGuard) -> assert_cmd::Command {
    let mut cmd = clean(assert_cmd::cargo::cargo_bin_cmd!("get-plugin-ref"));
    cmd.arg("--api-url").arg(server.url());
    cmd
}

/// Serves `branches` as the single page listing of `org/repo`.
#[allow(dead_code)]
pub fn mock_branches(
    server: &mut mockito::ServerGuard,
    org: &str,
    repo: &str,
    branches: &[&str],
) -> mockito::Mock {
    let body: Vec<serde_json::Value> = branches
        .iter()
        .map(|name| serde_json::json!({ "name": name, "protected": false }))
        .collect();
    server
        .mock("GET", format!("/repos/{}/{}/branches", org, repo).as_str())
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(serde_json::Value::Array(body).to_string())
        .create()
}

/// Serves the owner lookup used to tell a missing organization from a
/// missing repository.
#[allow(dead_code)]
pub fn mock_owner(server: &mut mockito::ServerGuard, org: &str, exists: bool) -> mockito::Mock {
    let status = if exists { 200 } else { 404 };
    server
        .mock("GET", format!("/users/{}", org).as_str())
        .with_status(status)
        .with_body(r#"{"login":"owner"}"#)
        .create()
}

/// Returns `true` if the system `git` can be run.
#[allow(dead_code)]
pub fn git_available() -> bool {
    Command::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

/// A directory of local git repositories laid out as `<org>/<repo>.git`,
/// usable as a `--git-url` base.
#[allow(dead_code)]
pub struct LocalRemote {
    root: tempfile::TempDir,
}

#[allow(dead_code)]
impl LocalRemote {
    pub fn new() -> Self {
        Self {
            root: tempfile::TempDir::new().expect("Failed to create temp directory"),
        }
    }

    /// Creates `org/repo` whose only branches are `develop` plus `branches`.
    pub fn with_repo(self, org: &str, repo: &str, branches: &[&str]) -> Self {
        let dir = self.root.path().join(org).join(format!("{}.git", repo));
        std::fs::create_dir_all(&dir).expect("Failed to create repository directory");
        git(&dir, &["init", "--quiet"]);
        git(
            &dir,
            &[
                "-c",
                "commit.gpgsign=false",
                "commit",
                "--quiet",
                "--allow-empty",
                "-m",
                "init",
            ],
        );
        git(&dir, &["branch", "-m", "develop"]);
        for branch in branches {
            git(&dir, &["branch", branch]);
        }
        self
    }

    /// The `file://` base URL of this remote.
    pub fn url(&self) -> String {
        url::Url::from_directory_path(self.root.path())
            .expect("temp directory is absolute")
            .to_string()
    }
}

fn git(dir: &Path, args: &[&str]) {
    let status = Command::new("git")
        .args(args)
        .current_dir(dir)
        .env("GIT_AUTHOR_NAME", "test")
        .env("GIT_AUTHOR_EMAIL", "test@example.com")
        .env("GIT_COMMITTER_NAME", "test")
        .env("GIT_COMMITTER_EMAIL", "test@example.com")
        .status()
        .expect("Failed to run git");
    assert!(status.success(), "git {:?} failed", args);
}
