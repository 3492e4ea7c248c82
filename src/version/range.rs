use anyhow::{Context, Result, bail};
use std::fmt;

use super::Version;

/// Inclusive version bound `[min, max]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    min: Version,
    max: Version,
}

impl VersionRange {
    /// Create a range, rejecting `min > max`.
    pub fn new(min: Version, max: Version) -> Result<Self> {
        if min > max {
            bail!("Invalid version range: {} is greater than {}", min, max);
        }
        Ok(Self { min, max })
    }

    /// Parse both bounds and create the range.
    pub fn of(min: &str, max: &str) -> Result<Self> {
        let min_version = min
            .parse::<Version>()
            .with_context(|| format!("Invalid lower bound in range {}..={}", min, max))?;
        let max_version = max
            .parse::<Version>()
            .with_context(|| format!("Invalid upper bound in range {}..={}", min, max))?;
        Self::new(min_version, max_version)
    }

    pub fn min(&self) -> &Version {
        &self.min
    }

    pub fn max(&self) -> &Version {
        &self.max
    }

    pub fn contains(&self, version: &Version) -> bool {
        &self.min <= version && version <= &self.max
    }
}

impl fmt::Display for VersionRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.min == self.max {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}..={}", self.min, self.max)
        }
    }
}

/// Matches a version covered by any of its ranges.
///
/// Ranges may overlap and may leave gaps; neither is checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistributionMatch {
    ranges: Vec<VersionRange>,
}

impl DistributionMatch {
    pub fn any(ranges: impl IntoIterator<Item = VersionRange>) -> Self {
        Self {
            ranges: ranges.into_iter().collect(),
        }
    }

    pub fn ranges(&self) -> &[VersionRange] {
        &self.ranges
    }

    pub fn matches(&self, version: &Version) -> bool {
        self.ranges.iter().any(|r| r.contains(version))
    }
}

impl fmt::Display for DistributionMatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|r| r.to_string()).collect();
        f.write_str(&parts.join(", "))
    }
}
