//! # Release Branch Naming
//!
//! Plugin repositories name their release branches after both the core
//! version they build against and their own release number. The convention is
//! described by a [`ReleaseTemplate`], for example:
//!
//! ```text
//! release/core_{core_version}/{release}
//! ```
//!
//! Filling `{core_version}` with a concrete core version produces a
//! [`ReleaseMatcher`]. Applied to a branch name, the matcher either rejects it
//! or yields the text captured by `{release}`.
//!
//! Matching rules:
//!
//! - The core version is matched literally. A branch for core `1.2` does not
//!   match a request for `1.20` or `1`.
//! - The match is anchored at the start of the branch name only. Anything
//!   after the release number is ignored, so `release/core_1.2/1.0-hotfix`
//!   yields `1.0`.
//! - `{release}` captures a dotted run of ASCII digits. Whether it is a valid
//!   version is decided later by [`CoreVersion::parse`](crate::version::CoreVersion::parse).
//!
//! ## Example
//!
//! ```
//! use core_branch::pattern::ReleaseTemplate;
//!
//! let template = ReleaseTemplate::default();
//! let matcher = template.matcher("1.2").unwrap();
//!
//! assert_eq!(matcher.extract("release/core_1.2/1.10"), Some("1.10"));
//! assert_eq!(matcher.extract("release/core_1.20/1.10"), None);
//! assert_eq!(matcher.extract("develop"), None);
//! ```

use regex::Regex;

use crate::defaults::DEFAULT_RELEASE_TEMPLATE;
use crate::error::{Error, Result};
use crate::version::CoreVersion;

/// Placeholder for the caller-supplied core version.
pub const CORE_VERSION_PLACEHOLDER: &str = "{core_version}";

/// Placeholder for the plugin release number.
pub const RELEASE_PLACEHOLDER: &str = "{release}";

const RELEASE_CAPTURE: &str = r"(?P<release>[0-9]+(?:\.[0-9]+)*)";

/// A validated release-branch naming template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseTemplate {
    template: String,
    prefix: String,
    infix: String,
    suffix: String,
}

impl ReleaseTemplate {
    /// Validates a template.
    ///
    /// The template must contain `{core_version}` exactly once, followed
    /// somewhere later by `{release}` exactly once.
    pub fn new(template: &str) -> Result<Self> {
        let invalid = |message: &str| Error::InvalidTemplate {
            template: template.to_string(),
            message: message.to_string(),
        };

        let core_count = template.matches(CORE_VERSION_PLACEHOLDER).count();
        let release_count = template.matches(RELEASE_PLACEHOLDER).count();
        if core_count != 1 {
            return Err(invalid(&format!(
                "expected exactly one {} placeholder, found {}",
                CORE_VERSION_PLACEHOLDER, core_count
            )));
        }
        if release_count != 1 {
            return Err(invalid(&format!(
                "expected exactly one {} placeholder, found {}",
                RELEASE_PLACEHOLDER, release_count
            )));
        }

        let (prefix, rest) = template
            .split_once(CORE_VERSION_PLACEHOLDER)
            .ok_or_else(|| invalid("missing core version placeholder"))?;
        let (infix, suffix) = rest.split_once(RELEASE_PLACEHOLDER).ok_or_else(|| {
            invalid(&format!(
                "{} must come after {}",
                RELEASE_PLACEHOLDER, CORE_VERSION_PLACEHOLDER
            ))
        })?;

        Ok(Self {
            template: template.to_string(),
            prefix: prefix.to_string(),
            infix: infix.to_string(),
            suffix: suffix.to_string(),
        })
    }

    /// The template text as supplied.
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Compiles a matcher for one core version.
    ///
    /// A new pattern is compiled on every call; matchers for different core
    /// versions never share state.
    pub fn matcher(&self, core_version: &str) -> Result<ReleaseMatcher> {
        let pattern = format!(
            "^{}{}{}{}{}",
            regex::escape(&self.prefix),
            regex::escape(core_version),
            regex::escape(&self.infix),
            RELEASE_CAPTURE,
            regex::escape(&self.suffix),
        );
        Ok(ReleaseMatcher {
            core_version: core_version.to_string(),
            regex: Regex::new(&pattern)?,
        })
    }
}

impl Default for ReleaseTemplate {
    fn default() -> Self {
        Self {
            template: DEFAULT_RELEASE_TEMPLATE.to_string(),
            prefix: "release/core_".to_string(),
            infix: "/".to_string(),
            suffix: String::new(),
        }
    }
}

impl std::str::FromStr for ReleaseTemplate {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

/// A release-branch matcher bound to a single core version.
#[derive(Debug, Clone)]
pub struct ReleaseMatcher {
    core_version: String,
    regex: Regex,
}

impl ReleaseMatcher {
    /// The core version this matcher was built for.
    pub fn core_version(&self) -> &str {
        &self.core_version
    }

    /// Returns the release text embedded in `branch`, or `None` if the branch
    /// does not follow the naming convention for this core version.
    pub fn extract<'b>(&self, branch: &'b str) -> Option<&'b str> {
        self.regex
            .captures(branch)
            .and_then(|caps| caps.name("release"))
            .map(|m| m.as_str())
    }

    /// Matches `branch` and parses its release number.
    ///
    /// Returns `None` for non-matching branches, and `Some(Err(_))` when the
    /// branch matches but the release number cannot be parsed.
    pub fn candidate(&self, branch: &str) -> Option<Result<ReleaseCandidate>> {
        let release = self.extract(branch)?;
        Some(CoreVersion::parse(release).map(|version| ReleaseCandidate {
            branch: branch.to_string(),
            version,
        }))
    }
}

/// A branch that matched the release convention, with its parsed release
/// number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseCandidate {
    pub branch: String,
    pub version: CoreVersion,
}
