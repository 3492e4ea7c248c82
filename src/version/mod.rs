//! Version ordering for MongoDB releases.
//!
//! This module provides a dotted numeric version type together with the
//! inclusive range and "any of" predicates the rule tables are built from.

mod range;

use anyhow::{Result, bail};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

pub use range::{DistributionMatch, VersionRange};

/// A dotted numeric version such as `4.2.18`.
///
/// Segments compare numerically from left to right. Missing trailing
/// segments count as zero, so `4.0` and `4.0.0` are equal.
#[derive(Debug, Clone)]
pub struct Version {
    segments: Vec<u64>,
}

impl Version {
    /// Parse a published release number: exactly `major.minor.patch`, no
    /// leading zeros. Download paths embed the string as given, so `4.2` or
    /// `4.2.01` must not stand in for `4.2.0` or `4.2.1`.
    pub fn parse_release(s: &str) -> Result<Self> {
        let version: Version = s.parse()?;
        if version.segments.len() != 3 {
            bail!("Invalid release version '{}': expected major.minor.patch", s);
        }
        if version.to_string() != s {
            bail!("Invalid release version '{}': leading zeros", s);
        }
        Ok(version)
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

impl FromStr for Version {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            bail!("Invalid version: empty string");
        }
        let segments = s
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    bail!("Invalid version '{}': segment '{}' is not numeric", s, part);
                }
                part.parse::<u64>()
                    .map_err(|e| anyhow::anyhow!("Invalid version '{}': {}", s, e))
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Version { segments })
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|o| o.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        f.write_str(&parts.join("."))
    }
}
