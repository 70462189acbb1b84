//! # Release Branch Resolution
//!
//! Given a core version, [`ReleaseResolver`] finds the branch of a plugin
//! repository that should be built against it.
//!
//! ## Process
//!
//! 1.  **Validation**: The requested core version is parsed up front, so a
//!     malformed argument fails before any remote access.
//! 2.  **Listing**: The repository's branches are enumerated once through the
//!     [`BranchDirectory`], as a lazy stream.
//! 3.  **Matching**: Each branch is tested against the release template for
//!     the requested core version. Branches that do not follow the convention
//!     are skipped, and so are branches whose release number cannot be parsed.
//! 4.  **Selection**: The candidate with the greatest release number wins.
//!     Equal release numbers are settled by the [`TieBreak`] policy.
//!
//! An empty result is not an error: callers fall back to the primary branch
//! (see [`crate::primary`]).

use log::{debug, info, warn};

use crate::directory::{BranchDirectory, Credential};
use crate::error::Result;
use crate::pattern::{ReleaseCandidate, ReleaseTemplate};
use crate::version::CoreVersion;

/// How to choose between two branches carrying the same release number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TieBreak {
    /// Keep the branch listed first.
    #[default]
    FirstSeen,
    /// Keep the lexicographically smallest branch name, independent of
    /// listing order.
    Lexical,
}

/// Resolves release branches through a branch directory.
pub struct ReleaseResolver<D> {
    directory: D,
    template: ReleaseTemplate,
    tie_break: TieBreak,
}

impl<D: BranchDirectory> ReleaseResolver<D> {
    /// Creates a resolver using the default release template and
    /// [`TieBreak::FirstSeen`].
    pub fn new(directory: D) -> Self {
        Self {
            directory,
            template: ReleaseTemplate::default(),
            tie_break: TieBreak::default(),
        }
    }

    pub fn with_template(mut self, template: ReleaseTemplate) -> Self {
        self.template = template;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    /// Returns the name of the best release branch for `core_version`, or
    /// `None` if no branch follows the convention for it.
    pub fn resolve(
        &self,
        org: &str,
        repo: &str,
        core_version: &str,
        credential: &Credential,
    ) -> Result<Option<String>> {
        Ok(self
            .resolve_candidate(org, repo, core_version, credential)?
            .map(|candidate| candidate.branch))
    }

    /// Like [`resolve`](Self::resolve), but also returns the parsed release
    /// number of the chosen branch.
    pub fn resolve_candidate(
        &self,
        org: &str,
        repo: &str,
        core_version: &str,
        credential: &Credential,
    ) -> Result<Option<ReleaseCandidate>> {
        CoreVersion::parse(core_version)?;
        let matcher = self.template.matcher(core_version)?;

        let branches = self.directory.list_branches(org, repo, credential)?;
        let mut best: Option<ReleaseCandidate> = None;

        for branch in branches {
            let branch = branch?;
            let candidate = match matcher.candidate(&branch) {
                None => continue,
                Some(Ok(candidate)) => candidate,
                Some(Err(e)) => {
                    warn!("Skipping branch {}: {}", branch, e);
                    continue;
                }
            };
            debug!(
                "Candidate {} (release {}) for core {}",
                candidate.branch, candidate.version, core_version
            );

            if self.replaces(best.as_ref(), &candidate) {
                best = Some(candidate);
            }
        }

        match &best {
            Some(candidate) => info!(
                "Selected {} for core {} in {}/{}",
                candidate.branch, core_version, org, repo
            ),
            None => info!(
                "No release branch for core {} in {}/{}",
                core_version, org, repo
            ),
        }
        Ok(best)
    }

    fn replaces(&self, best: Option<&ReleaseCandidate>, candidate: &ReleaseCandidate) -> bool {
        let Some(best) = best else {
            return true;
        };
        match candidate.version.cmp(&best.version) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => match self.tie_break {
                TieBreak::FirstSeen => false,
                TieBreak::Lexical => candidate.branch < best.branch,
            },
        }
    }
}

/// Resolves a release branch with the default template and tie-break policy.
pub fn resolve<D: BranchDirectory>(
    directory: D,
    org: &str,
    repo: &str,
    core_version: &str,
    credential: &Credential,
) -> Result<Option<String>> {
    ReleaseResolver::new(directory).resolve(org, repo, core_version, credential)
}
