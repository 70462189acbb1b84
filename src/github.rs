//! # GitHub Branch Directory
//!
//! [`GitHubDirectory`] lists branches through the GitHub REST API
//! (`GET /repos/{org}/{repo}/branches`). It works against github.com and
//! GitHub Enterprise, whose API lives under a different base URL.
//!
//! Branches are fetched one page at a time. The first page is requested
//! before `list_branches` returns, so an unknown repository or a rejected
//! credential is reported immediately. Further pages are only requested as
//! the returned stream is consumed, and the stream ends at the first page
//! shorter than the page size.
//!
//! ## Status mapping
//!
//! | Status        | Error                                                 |
//! |---------------|-------------------------------------------------------|
//! | 401, 403      | [`Error::Authentication`]                             |
//! | 404           | [`Error::OrganizationNotFound`] or [`Error::RepositoryNotFound`] |
//! | anything else | [`Error::Network`]                                    |
//!
//! GitHub answers 404 both for a missing organization and a missing
//! repository. The two are told apart with a second request for the owner
//! (`GET /users/{org}`, which also resolves organizations).

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use serde::Deserialize;
use url::Url;

use crate::defaults::{BRANCHES_PER_PAGE, HTTP_CONNECT_TIMEOUT_SECS, HTTP_REQUEST_TIMEOUT_SECS};
use crate::directory::{BranchDirectory, BranchStream, Credential};
use crate::error::{Error, Result};

const GITHUB_MEDIA_TYPE: &str = "application/vnd.github+json";
const GITHUB_API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize)]
struct BranchEntry {
    name: String,
}

#[derive(Debug, Deserialize)]
struct ApiMessage {
    message: String,
}

/// Branch directory backed by the GitHub REST API.
#[derive(Debug, Clone)]
pub struct GitHubDirectory {
    client: Client,
    api_url: Url,
    per_page: usize,
}

impl GitHubDirectory {
    /// Creates a directory for the API rooted at `api_url`
    /// (e.g. `https://api.github.com`).
    pub fn new(api_url: &str) -> Result<Self> {
        let parsed = Url::parse(api_url)?;
        if parsed.cannot_be_a_base() {
            return Err(Error::Network {
                url: api_url.to_string(),
                message: "API URL cannot be used as a base URL".to_string(),
            });
        }

        let client = Client::builder()
            .connect_timeout(Duration::from_secs(HTTP_CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .user_agent(concat!("core-branch/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| Error::Network {
                url: api_url.to_string(),
                message: format!("failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            api_url: parsed,
            per_page: BRANCHES_PER_PAGE,
        })
    }

    /// Overrides the number of branches requested per page.
    ///
    /// The API serves at most [`BRANCHES_PER_PAGE`] entries per page, so
    /// larger values are capped; a short page ends the listing.
    pub fn with_page_size(mut self, per_page: usize) -> Self {
        self.per_page = per_page.clamp(1, BRANCHES_PER_PAGE);
        self
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.api_url.clone();
        // checked in `new`
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn get(&self, url: &Url, credential: &Credential, query: &[(&str, usize)]) -> Result<Response> {
        let mut request = self
            .client
            .get(url.clone())
            .header(ACCEPT, GITHUB_MEDIA_TYPE)
            .header("X-GitHub-Api-Version", GITHUB_API_VERSION);
        if !query.is_empty() {
            request = request.query(query);
        }
        if !credential.is_anonymous() {
            request = request.bearer_auth(credential.expose());
        }
        request.send().map_err(|e| Error::Network {
            url: url.to_string(),
            message: e.to_string(),
        })
    }

    fn fetch_page(
        &self,
        org: &str,
        repo: &str,
        credential: &Credential,
        page: usize,
    ) -> Result<Vec<String>> {
        let url = self.endpoint(&["repos", org, repo, "branches"]);
        debug!("Listing branches of {}/{} (page {})", org, repo, page);

        let response = self.get(&url, credential, &[("per_page", self.per_page), ("page", page)])?;
        let status = response.status();

        if status.is_success() {
            let entries: Vec<BranchEntry> = response.json().map_err(|e| Error::Network {
                url: url.to_string(),
                message: format!("invalid branch listing: {}", e),
            })?;
            return Ok(entries.into_iter().map(|entry| entry.name).collect());
        }

        let message = api_message(response, status);
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::Authentication {
                org: org.to_string(),
                repo: repo.to_string(),
                message,
            }),
            StatusCode::NOT_FOUND => Err(self.classify_not_found(org, repo, credential)),
            _ => Err(Error::Network {
                url: url.to_string(),
                message: format!("HTTP {} - {}", status.as_u16(), message),
            }),
        }
    }

    fn classify_not_found(&self, org: &str, repo: &str, credential: &Credential) -> Error {
        let url = self.endpoint(&["users", org]);
        match self.get(&url, credential, &[]) {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => {
                Error::OrganizationNotFound {
                    org: org.to_string(),
                }
            }
            Ok(_) => Error::RepositoryNotFound {
                org: org.to_string(),
                repo: repo.to_string(),
            },
            Err(e) => {
                debug!("Owner lookup for {} failed: {}", org, e);
                Error::RepositoryNotFound {
                    org: org.to_string(),
                    repo: repo.to_string(),
                }
            }
        }
    }
}

fn api_message(response: Response, status: StatusCode) -> String {
    response
        .json::<ApiMessage>()
        .map(|body| body.message)
        .unwrap_or_else(|_| status.canonical_reason().unwrap_or("Unknown error").to_string())
}

impl BranchDirectory for GitHubDirectory {
    fn list_branches<'a>(
        &'a self,
        org: &str,
        repo: &str,
        credential: &Credential,
    ) -> Result<BranchStream<'a>> {
        let first = self.fetch_page(org, repo, credential, 1)?;
        Ok(Box::new(BranchPages {
            done: first.len() < self.per_page,
            current: first.into_iter(),
            next_page: 2,
            directory: self,
            org: org.to_string(),
            repo: repo.to_string(),
            credential: credential.clone(),
        }))
    }
}

/// Lazily pages through a branch listing.
struct BranchPages<'a> {
    directory: &'a GitHubDirectory,
    org: String,
    repo: String,
    credential: Credential,
    current: std::vec::IntoIter<String>,
    next_page: usize,
    done: bool,
}

impl Iterator for BranchPages<'_> {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(name) = self.current.next() {
                return Some(Ok(name));
            }
            if self.done {
                return None;
            }

            match self
                .directory
                .fetch_page(&self.org, &self.repo, &self.credential, self.next_page)
            {
                Ok(names) => {
                    self.done = names.len() < self.directory.per_page;
                    self.next_page += 1;
                    self.current = names.into_iter();
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e));
                }
            }
        }
    }
}
