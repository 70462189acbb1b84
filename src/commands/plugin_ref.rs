//! # Plugin Ref Command Implementation
//!
//! This module implements `get-plugin-ref`, which picks the branch of a plugin
//! repository that a CI job should build against a given core version.
//!
//! ## Functionality
//!
//! - **Release lookup**: When a core version is given, the newest branch
//!   following the release template for that version is printed as
//!   `refs/heads/<branch>`.
//! - **Primary fallback**: Without a core version, or when no release branch
//!   matches, the repository's primary branch (`main`, else `master`) is
//!   printed instead.
//! - **No result**: If the repository has no primary branch either, an empty
//!   line is printed and the command still succeeds.
//!
//! Remote failures (unknown organization or repository, rejected credential,
//! network errors) are returned as errors and make the tool exit non-zero.
//!
//! Branches are listed through the GitHub REST API by default, or with
//! `git ls-remote` when `--backend git` is selected.

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};
use log::{info, warn};

use crate::defaults::{DEFAULT_API_URL, DEFAULT_GIT_URL, DEFAULT_RELEASE_TEMPLATE};
use crate::directory::{BranchDirectory, Credential};
use crate::git::GitRemoteDirectory;
use crate::github::GitHubDirectory;
use crate::pattern::ReleaseTemplate;
use crate::primary::resolve_primary;
use crate::refs::branch_ref;
use crate::resolver::{ReleaseResolver, TieBreak};

/// Where branch listings come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// GitHub REST API
    Github,
    /// `git ls-remote` with the system git
    Git,
}

/// Which branch wins when two carry the same release number
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TieBreakArg {
    /// The branch listed first by the remote
    FirstSeen,
    /// The lexicographically smallest branch name
    Lexical,
}

impl From<TieBreakArg> for TieBreak {
    fn from(arg: TieBreakArg) -> Self {
        match arg {
            TieBreakArg::FirstSeen => TieBreak::FirstSeen,
            TieBreakArg::Lexical => TieBreak::Lexical,
        }
    }
}

#[derive(Args, Debug)]
pub struct PluginRefArgs {
    /// Organization (or user) owning the plugin repository
    pub org: String,

    /// Plugin repository name
    pub repo: String,

    /// Access token forwarded to the remote; pass "" for anonymous access
    pub credential: String,

    /// Core version to find a release branch for, e.g. `1.2`
    ///
    /// When omitted or empty, the primary branch is printed.
    #[arg(value_name = "CORE_VERSION")]
    pub core_version: Option<String>,

    /// Backend used to list branches
    #[arg(long, value_enum, env = "CORE_BRANCH_BACKEND", default_value_t = Backend::Github)]
    pub backend: Backend,

    /// Base URL of the GitHub REST API (github backend)
    #[arg(long, value_name = "URL", env = "CORE_BRANCH_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Base URL remotes are built from as `<URL>/<org>/<repo>.git` (git backend)
    #[arg(long, value_name = "URL", env = "CORE_BRANCH_GIT_URL", default_value = DEFAULT_GIT_URL)]
    pub git_url: String,

    /// Release branch naming template
    #[arg(
        long,
        value_name = "TEMPLATE",
        env = "CORE_BRANCH_TEMPLATE",
        default_value = DEFAULT_RELEASE_TEMPLATE
    )]
    pub template: String,

    /// Policy for release branches with equal release numbers
    #[arg(long, value_enum, default_value_t = TieBreakArg::FirstSeen)]
    pub tie_break: TieBreakArg,
}

impl PluginRefArgs {
    /// The core version to resolve, if one was given.
    ///
    /// Surrounding whitespace is ignored and whitespace-only values count as
    /// absent, so the output of `get-core-version` can be passed through
    /// unchanged.
    pub fn requested_core_version(&self) -> Option<&str> {
        self.core_version
            .as_deref()
            .map(str::trim)
            .filter(|version| !version.is_empty())
    }

    /// Builds the branch directory selected by `--backend`.
    pub fn directory(&self) -> Result<Box<dyn BranchDirectory>> {
        Ok(match self.backend {
            Backend::Github => Box::new(
                GitHubDirectory::new(&self.api_url)
                    .with_context(|| format!("Invalid --api-url {}", self.api_url))?,
            ),
            Backend::Git => Box::new(
                GitRemoteDirectory::new(&self.git_url)
                    .with_context(|| format!("Invalid --git-url {}", self.git_url))?,
            ),
        })
    }
}

/// Computes the line `get-plugin-ref` prints, using `directory` to list
/// branches.
pub fn run<D: BranchDirectory + ?Sized>(args: &PluginRefArgs, directory: &D) -> Result<String> {
    let template = ReleaseTemplate::new(&args.template)?;
    let credential = Credential::new(args.credential.as_str());

    if let Some(core_version) = args.requested_core_version() {
        let resolver = ReleaseResolver::new(directory)
            .with_template(template)
            .with_tie_break(args.tie_break.into());
        let release = resolver
            .resolve(&args.org, &args.repo, core_version, &credential)
            .with_context(|| {
                format!(
                    "Failed to resolve release branch of {}/{} for core {}",
                    args.org, args.repo, core_version
                )
            })?;
        if let Some(branch) = release {
            return Ok(branch_ref(&branch));
        }
        info!(
            "Falling back to the primary branch of {}/{}",
            args.org, args.repo
        );
    }

    let primary = resolve_primary(directory, &args.org, &args.repo, &credential)
        .with_context(|| format!("Failed to resolve primary branch of {}/{}", args.org, args.repo))?;
    match primary {
        Some(branch) => Ok(branch_ref(&branch)),
        None => {
            warn!(
                "{}/{} has no release branch and no primary branch",
                args.org, args.repo
            );
            Ok(String::new())
        }
    }
}

/// Execute the `get-plugin-ref` command.
pub fn execute(args: PluginRefArgs) -> Result<()> {
    let directory = args.directory()?;
    println!("{}", run(&args, directory.as_ref())?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PluginRefCli;
    use crate::directory::MemoryDirectory;
    use crate::error::Error;
    use clap::Parser;

    fn parse(extra: &[&str]) -> PluginRefArgs {
        let mut argv = vec!["get-plugin-ref"];
        argv.extend_from_slice(extra);
        PluginRefCli::try_parse_from(argv).unwrap().args
    }

    fn plugin(branches: &[&str]) -> MemoryDirectory {
        MemoryDirectory::new().with_repository("acme", "plugin", branches.iter().copied())
    }

    #[test]
    fn test_defaults() {
        let args = parse(&["acme", "plugin", "tok"]);
        assert_eq!(args.org, "acme");
        assert_eq!(args.repo, "plugin");
        assert_eq!(args.credential, "tok");
        assert_eq!(args.core_version, None);
        assert_eq!(args.backend, Backend::Github);
        assert_eq!(args.api_url, DEFAULT_API_URL);
        assert_eq!(args.template, DEFAULT_RELEASE_TEMPLATE);
        assert_eq!(args.tie_break, TieBreakArg::FirstSeen);
    }

    #[test]
    fn test_empty_credential_is_accepted() {
        let args = parse(&["acme", "plugin", "", "1.2"]);
        assert_eq!(args.credential, "");
        assert_eq!(args.requested_core_version(), Some("1.2"));
    }

    #[test]
    fn test_blank_core_version_is_absent() {
        assert_eq!(parse(&["acme", "plugin", "tok", ""]).requested_core_version(), None);
        assert_eq!(parse(&["acme", "plugin", "tok", "  "]).requested_core_version(), None);
    }

    #[test]
    fn test_core_version_is_trimmed() {
        assert_eq!(
            parse(&["acme", "plugin", "tok", " 1.2\n"]).requested_core_version(),
            Some("1.2")
        );

        let dir = plugin(&["release/core_1.2/1.0", "main"]);
        let line = run(&parse(&["acme", "plugin", "tok", "1.2\n"]), &dir).unwrap();
        assert_eq!(line, "refs/heads/release/core_1.2/1.0");
    }

    #[test]
    fn test_release_branch() {
        let dir = plugin(&[
            "release/core_1.2/1.0",
            "release/core_1.2/1.5",
            "release/core_1.2/1.10",
            "develop",
            "master",
        ]);
        let line = run(&parse(&["acme", "plugin", "tok", "1.2"]), &dir).unwrap();
        assert_eq!(line, "refs/heads/release/core_1.2/1.10");
    }

    #[test]
    fn test_falls_back_to_primary_when_no_release() {
        let dir = plugin(&["release/core_1.2/1.0", "develop", "main"]);
        let line = run(&parse(&["acme", "plugin", "tok", "1.3"]), &dir).unwrap();
        assert_eq!(line, "refs/heads/main");
    }

    #[test]
    fn test_primary_without_core_version() {
        let dir = plugin(&["release/core_1.2/1.0", "develop", "master"]);
        let line = run(&parse(&["acme", "plugin", "tok"]), &dir).unwrap();
        assert_eq!(line, "refs/heads/master");
        assert_eq!(dir.listing_count(), 1);
    }

    #[test]
    fn test_no_result_is_empty_line() {
        let dir = plugin(&["develop", "feature-x"]);
        let line = run(&parse(&["acme", "plugin", "tok", "1.2"]), &dir).unwrap();
        assert_eq!(line, "");
    }

    #[test]
    fn test_custom_template_and_tie_break() {
        let dir = plugin(&["p/1.2/v3-b", "p/1.2/v3-a", "main"]);
        let args = parse(&[
            "--template",
            "p/{core_version}/v{release}",
            "--tie-break",
            "lexical",
            "acme",
            "plugin",
            "tok",
            "1.2",
        ]);
        assert_eq!(run(&args, &dir).unwrap(), "refs/heads/p/1.2/v3-a");
    }

    #[test]
    fn test_invalid_template_fails() {
        let dir = plugin(&["main"]);
        let args = parse(&["--template", "release/{release}", "acme", "plugin", "tok"]);
        let err = run(&args, &dir).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::InvalidTemplate { .. })
        ));
    }

    #[test]
    fn test_malformed_core_version_fails() {
        let dir = plugin(&["main"]);
        let err = run(&parse(&["acme", "plugin", "tok", "1.x"]), &dir).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::MalformedVersion { .. })
        ));
        assert_eq!(dir.listing_count(), 0);
    }

    #[test]
    fn test_remote_failure_is_error() {
        let dir = plugin(&["main"]).with_required_credential("good");
        let err = run(&parse(&["acme", "plugin", "bad", "1.2"]), &dir).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::Authentication { .. })
        ));

        let err = run(&parse(&["acme", "missing", "good"]), &dir).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<Error>(),
            Some(Error::RepositoryNotFound { .. })
        ));
    }

    #[test]
    fn test_directory_selection() {
        let args = parse(&["--backend", "git", "--git-url", "file:///srv/git", "a", "b", ""]);
        assert_eq!(args.backend, Backend::Git);
        assert!(args.directory().is_ok());

        let args = parse(&["--api-url", "not a url", "a", "b", ""]);
        let err = args.directory().err().unwrap();
        assert!(err.to_string().contains("Invalid --api-url"));
    }
}
