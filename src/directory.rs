//! # Remote Branch Directory
//!
//! The resolvers never talk to a hosting service directly. They consume the
//! [`BranchDirectory`] trait, which can do exactly one thing: enumerate the
//! branch names of a repository, given an organization, a repository name and
//! a credential.
//!
//! ## Implementations
//!
//! - [`GitHubDirectory`](crate::github::GitHubDirectory): pages through the
//!   GitHub REST API.
//! - [`GitRemoteDirectory`](crate::git::GitRemoteDirectory): runs
//!   `git ls-remote --heads` with the system `git`.
//! - [`MemoryDirectory`]: an in-memory directory used in tests and by
//!   embedders that already hold a branch list.
//!
//! ## Streaming
//!
//! Listings are returned as a [`BranchStream`], a lazy iterator. Lookup
//! failures (unknown organization or repository, rejected credential) are
//! reported by `list_branches` itself. Errors that happen while fetching later
//! pages are yielded from the stream.

use std::collections::{HashMap, HashSet};
use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::{Error, Result};

/// A lazily evaluated sequence of branch names.
pub type BranchStream<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// A credential forwarded to the remote directory.
///
/// The value never appears in `Debug` output. An empty credential means
/// anonymous access.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// An empty credential for anonymous access.
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn is_anonymous(&self) -> bool {
        self.0.is_empty()
    }

    /// The secret itself. Only transports should call this.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Replaces every occurrence of the secret in `text` with `***`.
    pub fn redact(&self, text: &str) -> String {
        if self.0.is_empty() {
            text.to_string()
        } else {
            text.replace(&self.0, "***")
        }
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            f.write_str("Credential(<anonymous>)")
        } else {
            f.write_str("Credential(***)")
        }
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Trait for remote branch listing - allows mocking in tests
pub trait BranchDirectory: Send + Sync {
    /// Enumerates the branch names of `org/repo`.
    ///
    /// Fails with [`Error::OrganizationNotFound`], [`Error::RepositoryNotFound`]
    /// or [`Error::Authentication`] when the lookup itself is rejected.
    fn list_branches<'a>(
        &'a self,
        org: &str,
        repo: &str,
        credential: &Credential,
    ) -> Result<BranchStream<'a>>;
}

impl<D: BranchDirectory + ?Sized> BranchDirectory for &D {
    fn list_branches<'a>(
        &'a self,
        org: &str,
        repo: &str,
        credential: &Credential,
    ) -> Result<BranchStream<'a>> {
        (**self).list_branches(org, repo, credential)
    }
}

impl<D: BranchDirectory + ?Sized> BranchDirectory for Box<D> {
    fn list_branches<'a>(
        &'a self,
        org: &str,
        repo: &str,
        credential: &Credential,
    ) -> Result<BranchStream<'a>> {
        (**self).list_branches(org, repo, credential)
    }
}

/// An in-memory branch directory.
///
/// Repositories are registered with their branch names in listing order.
/// Registering a repository also registers its organization; organizations
/// without repositories can be added with [`MemoryDirectory::with_organization`].
#[derive(Debug, Default)]
pub struct MemoryDirectory {
    organizations: HashSet<String>,
    repositories: HashMap<(String, String), Vec<String>>,
    required_credential: Option<Credential>,
    listings: AtomicUsize,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an organization with no repositories.
    pub fn with_organization(mut self, org: &str) -> Self {
        self.organizations.insert(org.to_string());
        self
    }

    /// Registers a repository and its branch names, in listing order.
    pub fn with_repository<I, S>(mut self, org: &str, repo: &str, branches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.organizations.insert(org.to_string());
        self.repositories.insert(
            (org.to_string(), repo.to_string()),
            branches.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// Rejects every listing whose credential differs from `credential`.
    pub fn with_required_credential(mut self, credential: impl Into<Credential>) -> Self {
        self.required_credential = Some(credential.into());
        self
    }

    /// How many times `list_branches` has been called successfully.
    pub fn listing_count(&self) -> usize {
        self.listings.load(Ordering::SeqCst)
    }
}

impl BranchDirectory for MemoryDirectory {
    fn list_branches<'a>(
        &'a self,
        org: &str,
        repo: &str,
        credential: &Credential,
    ) -> Result<BranchStream<'a>> {
        if let Some(required) = &self.required_credential {
            if required != credential {
                return Err(Error::Authentication {
                    org: org.to_string(),
                    repo: repo.to_string(),
                    message: "credential rejected".to_string(),
                });
            }
        }

        if !self.organizations.contains(org) {
            return Err(Error::OrganizationNotFound {
                org: org.to_string(),
            });
        }

        let branches = self
            .repositories
            .get(&(org.to_string(), repo.to_string()))
            .ok_or_else(|| Error::RepositoryNotFound {
                org: org.to_string(),
                repo: repo.to_string(),
            })?;

        self.listings.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(branches.iter().cloned().map(Ok)))
    }
}
