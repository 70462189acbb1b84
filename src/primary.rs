//! # Primary Branch Resolution
//!
//! A repository's primary integration branch is called either `main` or, in
//! older repositories, `master`. When both exist `main` wins.
//!
//! The branch listing is scanned once. Seeing `main` ends the scan at once;
//! `master` is only returned after the whole listing has been checked for
//! `main`. Repositories with neither yield `None`.

use log::info;

use crate::defaults::{MAIN_BRANCH, MASTER_BRANCH};
use crate::directory::{BranchDirectory, Credential};
use crate::error::Result;

/// Returns the primary branch of `org/repo`, if it has one.
pub fn resolve_primary<D: BranchDirectory>(
    directory: D,
    org: &str,
    repo: &str,
    credential: &Credential,
) -> Result<Option<String>> {
    let mut has_master = false;

    for branch in directory.list_branches(org, repo, credential)? {
        let branch = branch?;
        if branch == MAIN_BRANCH {
            info!("Primary branch of {}/{} is {}", org, repo, MAIN_BRANCH);
            return Ok(Some(MAIN_BRANCH.to_string()));
        }
        if branch == MASTER_BRANCH {
            has_master = true;
        }
    }

    if has_master {
        info!("Primary branch of {}/{} is {}", org, repo, MASTER_BRANCH);
        Ok(Some(MASTER_BRANCH.to_string()))
    } else {
        info!("{}/{} has neither a main nor a master branch", org, repo);
        Ok(None)
    }
}
