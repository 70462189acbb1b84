//! # Git Branch Directory
//!
//! [`GitRemoteDirectory`] lists branches with the system `git` command
//! (`git ls-remote --heads`). It needs nothing but `git` on the `PATH` and
//! works with any host git can reach, including local `file://` remotes.
//!
//! The remote for a repository is `<base>/<org>/<repo>.git`. For `http` and
//! `https` remotes a non-empty credential is sent as HTTP basic auth for the
//! user `x-access-token`, which GitHub and most hosts accept for tokens.
//! Interactive prompts are disabled, so a missing or bad credential fails
//! instead of hanging.
//!
//! Unlike the REST API, git cannot tell a missing organization from a missing
//! repository; both are reported as [`Error::RepositoryNotFound`].

use std::process::Command;

use base64::{engine::general_purpose, Engine as _};
use log::debug;
use url::Url;

use crate::defaults::DEFAULT_GIT_URL;
use crate::directory::{BranchDirectory, BranchStream, Credential};
use crate::error::{Error, Result};
use crate::refs::HEADS_PREFIX;

const TOKEN_USER: &str = "x-access-token";

/// Branch directory backed by `git ls-remote`.
#[derive(Debug, Clone)]
pub struct GitRemoteDirectory {
    base_url: String,
}

impl GitRemoteDirectory {
    /// Creates a directory whose remotes live under `base_url`
    /// (e.g. `https://github.com` or `file:///srv/git`).
    pub fn new(base_url: &str) -> Result<Self> {
        Url::parse(base_url)?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The remote URL for `org/repo`, without credentials.
    pub fn remote_url(&self, org: &str, repo: &str) -> String {
        format!("{}/{}/{}.git", self.base_url, org, repo)
    }

    /// Builds the `git ls-remote` invocation for `remote`.
    ///
    /// The credential never appears in the arguments. For http(s) remotes it
    /// is handed to git as an `http.extraHeader` through the `GIT_CONFIG_*`
    /// environment, which other users cannot read from the process list.
    fn ls_remote_command(&self, remote: &str, credential: &Credential) -> Command {
        let mut command = Command::new("git");
        command
            .args(["ls-remote", "--heads", remote])
            .env("GIT_TERMINAL_PROMPT", "0");

        if !credential.is_anonymous() && is_http(remote) {
            let token = general_purpose::STANDARD
                .encode(format!("{}:{}", TOKEN_USER, credential.expose()));
            command
                .env("GIT_CONFIG_COUNT", "1")
                .env("GIT_CONFIG_KEY_0", "http.extraHeader")
                .env("GIT_CONFIG_VALUE_0", format!("Authorization: Basic {}", token));
        }
        command
    }
}

fn is_http(remote: &str) -> bool {
    Url::parse(remote)
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

impl Default for GitRemoteDirectory {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_GIT_URL.to_string(),
        }
    }
}

impl BranchDirectory for GitRemoteDirectory {
    fn list_branches<'a>(
        &'a self,
        org: &str,
        repo: &str,
        credential: &Credential,
    ) -> Result<BranchStream<'a>> {
        let remote = self.remote_url(org, repo);
        debug!("Running git ls-remote --heads {}", remote);

        let output = self
            .ls_remote_command(&remote, credential)
            .output()
            .map_err(|e| Error::GitCommand {
                command: "ls-remote --heads".to_string(),
                url: remote.clone(),
                stderr: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = credential.redact(&String::from_utf8_lossy(&output.stderr));
            return Err(classify_failure(org, repo, &remote, stderr.trim()));
        }

        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        Ok(Box::new(parse_heads(stdout).into_iter().map(Ok)))
    }
}

/// Extracts branch names from `git ls-remote --heads` output.
///
/// Each line has the form `<hash>\trefs/heads/<branch>`.
fn parse_heads(stdout: String) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let (_, ref_name) = line.split_once('\t')?;
            ref_name
                .strip_prefix(HEADS_PREFIX)
                .map(|branch| branch.to_string())
        })
        .collect()
}

fn classify_failure(org: &str, repo: &str, remote: &str, stderr: &str) -> Error {
    let lower = stderr.to_lowercase();

    if lower.contains("authentication failed")
        || lower.contains("could not read username")
        || lower.contains("could not read password")
        || lower.contains("invalid username or password")
        || lower.contains("terminal prompts disabled")
        || lower.contains("permission denied")
    {
        return Error::Authentication {
            org: org.to_string(),
            repo: repo.to_string(),
            message: stderr.to_string(),
        };
    }

    if lower.contains("not found")
        || lower.contains("does not appear to be a git repository")
        || lower.contains("does not exist")
    {
        return Error::RepositoryNotFound {
            org: org.to_string(),
            repo: repo.to_string(),
        };
    }

    Error::GitCommand {
        command: "ls-remote --heads".to_string(),
        url: remote.to_string(),
        stderr: stderr.to_string(),
    }
}
