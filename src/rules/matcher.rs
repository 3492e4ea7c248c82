use log::{debug, trace};

use crate::platform::{BitSize, CpuType, Os, OsVersion, PlatformDescriptor};
use crate::version::{DistributionMatch, Version};

/// Platform predicate: every field must match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlatformMatch {
    pub os: Os,
    pub bit_size: BitSize,
    pub cpu: CpuType,
    /// Accepted release tags; there is no "any version" wildcard
    pub os_versions: Vec<OsVersion>,
    pub versions: DistributionMatch,
}

impl PlatformMatch {
    pub fn new(
        os: Os,
        bit_size: BitSize,
        cpu: CpuType,
        os_versions: impl IntoIterator<Item = OsVersion>,
        versions: DistributionMatch,
    ) -> Self {
        Self {
            os,
            bit_size,
            cpu,
            os_versions: os_versions.into_iter().collect(),
            versions,
        }
    }

    pub fn matches(&self, descriptor: &PlatformDescriptor) -> bool {
        if descriptor.os != self.os
            || descriptor.bit_size != self.bit_size
            || descriptor.cpu != self.cpu
        {
            return false;
        }

        let os_version_accepted = descriptor
            .os_version
            .is_some_and(|v| self.os_versions.contains(&v));
        if !os_version_accepted {
            trace!("os version {:?} not accepted", descriptor.os_version);
            return false;
        }

        match Version::parse_release(&descriptor.version) {
            Ok(version) => self.versions.matches(&version),
            Err(e) => {
                debug!("Requested version is not a release, treating as unmatched: {}", e);
                false
            }
        }
    }
}
