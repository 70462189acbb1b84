//! # Error Handling
//!
//! This module defines the centralized error type for `core-branch`. It uses
//! the `thiserror` library to describe every failure the resolver can surface,
//! with enough context to print a useful message from the command-line tools.
//!
//! Errors fall into two groups:
//!
//! - **Input errors**: a malformed version string or an invalid release-branch
//!   template supplied by the caller. These are raised before any remote access.
//! - **Remote lookup errors**: unknown organization, unknown repository,
//!   rejected credential, transport failures and failing `git` invocations.
//!   These are always fatal and are never retried.
//!
//! A "no match" outcome is not an error. Resolvers report it as `Ok(None)`.
//!
//! No variant ever carries the credential used for the remote lookup.

use thiserror::Error;

/// Main error type for core-branch operations
#[derive(Error, Debug)]
pub enum Error {
    /// A version string contains a segment that is not a non-negative integer.
    #[error("Malformed version '{version}': {message}")]
    MalformedVersion { version: String, message: String },

    /// A release-branch naming template is missing a placeholder or repeats one.
    #[error("Invalid release branch template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },

    /// The organization (or user) owning the repository does not exist.
    #[error("Organization not found: {org}")]
    OrganizationNotFound { org: String },

    /// The organization exists but the repository does not, or it is not
    /// visible with the supplied credential.
    #[error("Repository not found: {org}/{repo}")]
    RepositoryNotFound { org: String, repo: String },

    /// The remote directory rejected the credential.
    #[error("Authentication failed for {org}/{repo}: {message}")]
    Authentication {
        org: String,
        repo: String,
        message: String,
    },

    /// An error occurred during a network operation.
    #[error("Network operation error: {url} - {message}")]
    Network { url: String, message: String },

    /// An error occurred while executing a Git command.
    #[error("Git command failed for {url}: {command} - {stderr}")]
    GitCommand {
        command: String,
        url: String,
        stderr: String,
    },

    /// A regular expression error, wrapped from `regex::Error`.
    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    /// A URL parsing error, wrapped from `url::ParseError`.
    #[error("URL parsing error: {0}")]
    UrlParse(#[from] url::ParseError),
}

/// A convenient type alias for `Result<T, Error>`.
pub type Result<T> = std::result::Result<T, Error>;
