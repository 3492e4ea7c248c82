//! Package finders
//!
//! This module provides the per-distribution rule tables and the finder
//! abstraction callers use to go from a command and a platform descriptor to
//! the artifact that has to be downloaded.

mod cache;
pub mod linux;

use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use anyhow::{Context, Result};
use log::debug;

use crate::artifact::{ArchiveType, ArtifactDescriptor, ArtifactResolver, FileSet};
use crate::command::Command;
use crate::platform::{BitSize, CpuType, Distribution, Os, OsVersion, PlatformDescriptor};
use crate::rules::{PlatformMatch, PlatformMatchRule, PlatformMatchRules};
use crate::version::{DistributionMatch, VersionRange};

pub use cache::RuleTableCache;

/// Finds the distribution package for a platform descriptor.
#[cfg_attr(test, mockall::automock)]
pub trait PackageFinder: Send + Sync {
    /// Returns `Ok(None)` if no package is published for the descriptor.
    fn package_for(&self, descriptor: &PlatformDescriptor) -> Result<Option<ArtifactDescriptor>>;
}

/// Declarative description of one rule.
///
/// Rule tables are written as static slices of these so the data stays
/// separate from the matching code.
#[derive(Debug, Clone, Copy)]
pub struct RuleSpec {
    pub os: Os,
    pub bit_size: BitSize,
    pub cpu: CpuType,
    pub os_versions: &'static [OsVersion],
    /// Inclusive `(min, max)` pairs
    pub versions: &'static [(&'static str, &'static str)],
    pub archive_type: ArchiveType,
    pub template: &'static str,
}

impl RuleSpec {
    /// A 64-bit Linux rule shipping a `.tgz`.
    pub const fn linux(
        cpu: CpuType,
        os_versions: &'static [OsVersion],
        versions: &'static [(&'static str, &'static str)],
        template: &'static str,
    ) -> Self {
        Self {
            os: Os::Linux,
            bit_size: BitSize::B64,
            cpu,
            os_versions,
            versions,
            archive_type: ArchiveType::Tgz,
            template,
        }
    }

    /// Build the rule for `command`, checking ranges and template.
    pub fn build(&self, command: Command) -> Result<PlatformMatchRule> {
        let ranges = self
            .versions
            .iter()
            .map(|(min, max)| VersionRange::of(min, max))
            .collect::<Result<Vec<_>>>()
            .with_context(|| format!("Invalid version ranges in rule for {}", self.template))?;

        let matcher = PlatformMatch::new(
            self.os,
            self.bit_size,
            self.cpu,
            self.os_versions.iter().copied(),
            DistributionMatch::any(ranges),
        );
        let resolver = ArtifactResolver::url_template(
            self.template,
            self.archive_type,
            FileSet::executable(command.command_name()),
        )?;

        Ok(PlatformMatchRule::new(matcher, resolver))
    }
}

/// Build an ordered table from rule specs, keeping their order.
pub fn build_rules(specs: &[RuleSpec], command: Command) -> Result<PlatformMatchRules> {
    specs
        .iter()
        .map(|spec| spec.build(command))
        .collect::<Result<Vec<_>>>()
        .map(PlatformMatchRules::new)
}

/// Build the rule table of a distribution, if one exists.
pub fn rules_for(
    distribution: Distribution,
    command: Command,
) -> Result<Option<PlatformMatchRules>> {
    match distribution {
        Distribution::CentosRedhat => linux::centos::rules(command).map(Some),
        Distribution::Ubuntu => linux::ubuntu::rules(command).map(Some),
        Distribution::Debian => Ok(None),
    }
}

/// A finder backed by one distribution's rule table.
#[derive(Debug, Clone)]
pub struct RuleTableFinder {
    distribution: Distribution,
    command: Command,
    rules: Arc<PlatformMatchRules>,
}

impl RuleTableFinder {
    /// Load the table from `cache`, building it on first use.
    ///
    /// Returns `Ok(None)` for distributions without a table.
    pub fn load(
        cache: &RuleTableCache,
        distribution: Distribution,
        command: Command,
    ) -> Result<Option<Self>> {
        let Some(rules) =
            cache.get_or_build(distribution, command, || rules_for(distribution, command))?
        else {
            return Ok(None);
        };
        Ok(Some(Self {
            distribution,
            command,
            rules,
        }))
    }

    pub fn distribution(&self) -> Distribution {
        self.distribution
    }

    pub fn command(&self) -> Command {
        self.command
    }

    /// The ordered rules this finder evaluates.
    pub fn rules(&self) -> &PlatformMatchRules {
        &self.rules
    }
}

impl PackageFinder for RuleTableFinder {
    fn package_for(&self, descriptor: &PlatformDescriptor) -> Result<Option<ArtifactDescriptor>> {
        self.rules.resolve(descriptor)
    }
}

/// Routes Linux descriptors to the finder of their distribution.
pub struct LinuxPackageResolver {
    command: Command,
    finders: HashMap<Distribution, Box<dyn PackageFinder>>,
}

impl LinuxPackageResolver {
    /// Create a resolver with every distribution table for `command`.
    ///
    /// All tables are built here, so data errors surface before the first
    /// lookup.
    pub fn new(command: Command, cache: &RuleTableCache) -> Result<Self> {
        let mut resolver = Self::empty(command);
        let distributions = [
            Distribution::CentosRedhat,
            Distribution::Ubuntu,
            Distribution::Debian,
        ];
        for distribution in distributions {
            if let Some(finder) = RuleTableFinder::load(cache, distribution, command)? {
                resolver.register(distribution, Box::new(finder));
            }
        }
        Ok(resolver)
    }

    /// Create a resolver without any finders.
    pub fn empty(command: Command) -> Self {
        Self {
            command,
            finders: HashMap::new(),
        }
    }

    /// Register a finder for a distribution, replacing any existing one.
    pub fn register(&mut self, distribution: Distribution, finder: Box<dyn PackageFinder>) {
        self.finders.insert(distribution, finder);
    }

    pub fn command(&self) -> Command {
        self.command
    }

    pub fn has(&self, distribution: Distribution) -> bool {
        self.finders.contains_key(&distribution)
    }
}

impl PackageFinder for LinuxPackageResolver {
    #[tracing::instrument(skip(self, descriptor), fields(command = %self.command))]
    fn package_for(&self, descriptor: &PlatformDescriptor) -> Result<Option<ArtifactDescriptor>> {
        if descriptor.os != Os::Linux {
            debug!("Not a Linux platform: {}", descriptor.os);
            return Ok(None);
        }
        let Some(os_version) = descriptor.os_version else {
            debug!("No OS version given");
            return Ok(None);
        };
        match self.finders.get(&os_version.distribution()) {
            Some(finder) => finder.package_for(descriptor),
            None => {
                debug!("No finder for {}", os_version.distribution());
                Ok(None)
            }
        }
    }
}

static DEFAULT_CACHE: LazyLock<RuleTableCache> = LazyLock::new(RuleTableCache::new);

/// Resolve the package for `command` on the described platform.
///
/// Rule tables are built once per process and shared between callers.
pub fn resolve(
    command: Command,
    descriptor: &PlatformDescriptor,
) -> Result<Option<ArtifactDescriptor>> {
    LinuxPackageResolver::new(command, &DEFAULT_CACHE)?.package_for(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::predicate::always;

    fn make_artifact(url: &str) -> ArtifactDescriptor {
        ArtifactDescriptor {
            url: url.to_string(),
            archive_type: ArchiveType::Tgz,
            file_set: FileSet::executable("mongod"),
        }
    }

    #[test]
    fn test_dispatches_by_distribution() {
        // --- Setup ---
        let mut centos = MockPackageFinder::new();
        centos
            .expect_package_for()
            .with(always())
            .times(1)
            .returning(|_| Ok(Some(make_artifact("/centos.tgz"))));
        let mut ubuntu = MockPackageFinder::new();
        ubuntu.expect_package_for().never();

        let mut resolver = LinuxPackageResolver::empty(Command::MongoD);
        resolver.register(Distribution::CentosRedhat, Box::new(centos));
        resolver.register(Distribution::Ubuntu, Box::new(ubuntu));

        // --- Execute & Verify ---
        let descriptor = PlatformDescriptor::linux(CpuType::X86, OsVersion::Redhat7, "4.2.1");
        let artifact = resolver.package_for(&descriptor).unwrap().unwrap();
        assert_eq!(artifact.url, "/centos.tgz");
    }

    #[test]
    fn test_non_linux_is_not_dispatched() {
        let mut centos = MockPackageFinder::new();
        centos.expect_package_for().never();
        let mut resolver = LinuxPackageResolver::empty(Command::MongoD);
        resolver.register(Distribution::CentosRedhat, Box::new(centos));

        let mut descriptor = PlatformDescriptor::linux(CpuType::X86, OsVersion::CentOs7, "4.2.1");
        descriptor.os = Os::Windows;
        assert_eq!(resolver.package_for(&descriptor).unwrap(), None);
    }

    #[test_log::test]
    fn test_missing_os_version_resolves_nothing() {
        let resolver = LinuxPackageResolver::empty(Command::MongoD);
        let mut descriptor = PlatformDescriptor::linux(CpuType::X86, OsVersion::CentOs7, "4.2.1");
        descriptor.os_version = None;
        assert_eq!(resolver.package_for(&descriptor).unwrap(), None);
    }

    #[test]
    fn test_finder_error_propagates() {
        let mut ubuntu = MockPackageFinder::new();
        ubuntu
            .expect_package_for()
            .returning(|_| Err(anyhow::anyhow!("broken")));
        let mut resolver = LinuxPackageResolver::empty(Command::MongoDump);
        resolver.register(Distribution::Ubuntu, Box::new(ubuntu));

        let descriptor = PlatformDescriptor::linux(CpuType::X86, OsVersion::Ubuntu1804, "4.2.1");
        assert!(resolver.package_for(&descriptor).is_err());
    }

    #[test]
    fn test_new_registers_tables_with_data() {
        let cache = RuleTableCache::new();
        let resolver = LinuxPackageResolver::new(Command::MongoD, &cache).unwrap();
        assert!(resolver.has(Distribution::CentosRedhat));
        assert!(resolver.has(Distribution::Ubuntu));
        assert!(!resolver.has(Distribution::Debian));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_debian_resolves_nothing() {
        let descriptor = PlatformDescriptor::linux(CpuType::X86, OsVersion::Debian10, "4.4.1");
        for command in Command::ALL {
            assert_eq!(resolve(*command, &descriptor).unwrap(), None);
        }
    }

    #[test]
    fn test_rule_spec_rejects_bad_range() {
        const BAD: RuleSpec = RuleSpec::linux(
            CpuType::X86,
            &[OsVersion::CentOs7],
            &[("4.0.27", "4.0.0")],
            "/linux/{version}.tgz",
        );
        let err = build_rules(&[BAD], Command::MongoD).unwrap_err();
        assert!(format!("{:#}", err).contains("greater than"));
    }

    #[test]
    fn test_rule_spec_rejects_bad_template() {
        const BAD: RuleSpec = RuleSpec::linux(
            CpuType::X86,
            &[OsVersion::CentOs7],
            &[("4.0.0", "4.0.27")],
            "/linux/{release}.tgz",
        );
        assert!(build_rules(&[BAD], Command::MongoD).is_err());
    }

    #[test]
    fn test_table_finder_exposes_rules() {
        let cache = RuleTableCache::new();
        let finder = RuleTableFinder::load(&cache, Distribution::Ubuntu, Command::MongoImport)
            .unwrap()
            .unwrap();
        assert_eq!(finder.distribution(), Distribution::Ubuntu);
        assert_eq!(finder.command(), Command::MongoImport);
        assert_eq!(finder.rules().len(), 4);
        assert!(RuleTableFinder::load(&cache, Distribution::Debian, Command::MongoD)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_distribution_without_table_loads_nothing() {
        let cache = RuleTableCache::new();
        let finder = RuleTableFinder::load(&cache, Distribution::Debian, Command::MongoD).unwrap();
        assert!(finder.is_none());
        assert!(cache.is_empty());
    }
}
