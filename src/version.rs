//! # Dotted Version Comparison
//!
//! Core versions and plugin release numbers are plain dotted sequences of
//! non-negative integers (`1.2`, `0.10.3`). They are not semantic versions:
//! there are no pre-release tags, no build metadata, and any number of
//! segments is allowed. They are only ever compared, never incremented.
//!
//! Comparison is segment by segment from the left. When one version has fewer
//! segments it is treated as if padded with zeros, so `1.2` and `1.2.0`
//! compare equal. The padding only exists for the comparison; the original
//! text is kept as written.

use std::cmp::Ordering;
use std::fmt;

use crate::error::{Error, Result};

/// A parsed dotted numeric version.
///
/// Equality follows the padded comparison, so `CoreVersion` values that
/// print differently may still be equal.
#[derive(Debug, Clone)]
pub struct CoreVersion {
    raw: String,
    segments: Vec<u64>,
}

impl CoreVersion {
    /// Parses a dotted version string.
    ///
    /// Every segment must be a non-empty run of ASCII digits. Leading zeros
    /// are accepted and carry no meaning (`01` is `1`).
    pub fn parse(input: &str) -> Result<Self> {
        if input.is_empty() {
            return Err(malformed(input, "version is empty"));
        }

        let segments = input
            .split('.')
            .map(|segment| parse_segment(input, segment))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            raw: input.to_string(),
            segments,
        })
    }

    /// The version exactly as it was written.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// The numeric segments, without padding.
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }
}

fn parse_segment(input: &str, segment: &str) -> Result<u64> {
    if segment.is_empty() {
        return Err(malformed(input, "empty segment"));
    }
    // `u64::from_str` would also accept a leading '+'
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed(
            input,
            &format!("segment '{}' is not a non-negative integer", segment),
        ));
    }
    segment.parse::<u64>().map_err(|e| {
        malformed(
            input,
            &format!("segment '{}' is out of range: {}", segment, e),
        )
    })
}

fn malformed(input: &str, message: &str) -> Error {
    Error::MalformedVersion {
        version: input.to_string(),
        message: message.to_string(),
    }
}

impl Ord for CoreVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| {
                let left = self.segments.get(i).copied().unwrap_or(0);
                let right = other.segments.get(i).copied().unwrap_or(0);
                left.cmp(&right)
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for CoreVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for CoreVersion {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoreVersion {}

impl fmt::Display for CoreVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for CoreVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Compares two dotted version strings.
///
/// Fails with [`Error::MalformedVersion`] if either side does not parse.
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    Ok(CoreVersion::parse(a)?.cmp(&CoreVersion::parse(b)?))
}
