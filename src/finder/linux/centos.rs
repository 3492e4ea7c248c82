//! CentOS, Red Hat Enterprise Linux and Oracle Linux packages.
//!
//! The three distributions share binaries; MongoDB publishes them under the
//! `rhel` identifiers.

use anyhow::Result;

use crate::command::{Command, CommandCategory};
use crate::finder::{RuleSpec, build_rules};
use crate::platform::CpuType::{Arm, X86};
use crate::platform::OsVersion::{self, *};
use crate::rules::PlatformMatchRules;

const EL6: &[OsVersion] = &[CentOs6, Redhat6, Oracle6];
const EL7: &[OsVersion] = &[CentOs7, Redhat7, Oracle7];
const EL8: &[OsVersion] = &[CentOs8, Redhat8, Oracle8];

const EL6_VERSIONS: &[(&str, &str)] = &[
    ("4.4.11", "4.4.11"),
    ("4.4.0", "4.4.9"),
    ("4.2.18", "4.2.18"),
    ("4.2.5", "4.2.16"),
    ("4.2.0", "4.2.3"),
    ("4.0.0", "4.0.27"),
    ("3.6.0", "3.6.23"),
    ("3.4.9", "3.4.24"),
    ("3.4.0", "3.4.7"),
    ("3.2.0", "3.2.22"),
    ("3.0.0", "3.0.15"),
];

const EL7_VERSIONS: &[(&str, &str)] = &[
    ("5.0.5", "5.0.5"),
    ("5.0.0", "5.0.2"),
    ("4.4.11", "4.4.11"),
    ("4.4.0", "4.4.9"),
    ("4.2.18", "4.2.18"),
    ("4.2.5", "4.2.16"),
    ("4.2.0", "4.2.3"),
    ("4.0.0", "4.0.27"),
    ("3.6.0", "3.6.23"),
    ("3.4.9", "3.4.24"),
    ("3.4.0", "3.4.7"),
    ("3.2.0", "3.2.22"),
    ("3.0.0", "3.0.15"),
];

const EL8_VERSIONS: &[(&str, &str)] = &[
    ("5.0.5", "5.0.5"),
    ("5.0.0", "5.0.2"),
    ("4.4.11", "4.4.11"),
    ("4.4.0", "4.4.9"),
    ("4.2.18", "4.2.18"),
    ("4.2.5", "4.2.16"),
    ("4.2.1", "4.2.3"),
    ("4.0.14", "4.0.27"),
    ("3.6.17", "3.6.23"),
    ("3.4.24", "3.4.24"),
];

const EL8_ARM_VERSIONS: &[(&str, &str)] = &[
    ("5.0.5", "5.0.5"),
    ("5.0.0", "5.0.2"),
    ("4.4.11", "4.4.11"),
    ("4.4.4", "4.4.9"),
];

pub const SERVER_RULES: &[RuleSpec] = &[
    RuleSpec::linux(X86, EL6, EL6_VERSIONS, "/linux/mongodb-linux-x86_64-rhel62-{version}.tgz"),
    RuleSpec::linux(X86, EL7, EL7_VERSIONS, "/linux/mongodb-linux-x86_64-rhel70-{version}.tgz"),
    RuleSpec::linux(X86, EL8, EL8_VERSIONS, "/linux/mongodb-linux-x86_64-rhel80-{version}.tgz"),
    RuleSpec::linux(
        Arm,
        EL8,
        EL8_ARM_VERSIONS,
        "/linux/mongodb-linux-aarch64-rhel82-{version}.tgz",
    ),
];

pub const TOOLS_RULES: &[RuleSpec] = &[
    RuleSpec::linux(
        X86,
        EL6,
        EL6_VERSIONS,
        "/tools/db/mongodb-database-tools-rhel62-x86_64-{tools.version}.tgz",
    ),
    RuleSpec::linux(
        X86,
        EL7,
        EL7_VERSIONS,
        "/tools/db/mongodb-database-tools-rhel70-x86_64-{tools.version}.tgz",
    ),
    RuleSpec::linux(
        X86,
        EL8,
        EL8_VERSIONS,
        "/tools/db/mongodb-database-tools-rhel80-x86_64-{tools.version}.tgz",
    ),
    RuleSpec::linux(
        Arm,
        EL8,
        EL8_ARM_VERSIONS,
        "/tools/db/mongodb-database-tools-rhel82-arm64-{tools.version}.tgz",
    ),
];

/// Build the rule table for `command`.
pub fn rules(command: Command) -> Result<PlatformMatchRules> {
    match command.category() {
        CommandCategory::Server => build_rules(SERVER_RULES, command),
        CommandCategory::Tools => build_rules(TOOLS_RULES, command),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArchiveType, FileType};
    use crate::platform::PlatformDescriptor;

    fn resolve_url(command: Command, descriptor: &PlatformDescriptor) -> Option<String> {
        rules(command)
            .unwrap()
            .resolve(descriptor)
            .unwrap()
            .map(|a| a.url)
    }

    #[test]
    fn test_all_tables_build() {
        for command in Command::ALL {
            assert_eq!(rules(*command).unwrap().len(), 4);
        }
    }

    #[test]
    fn test_centos7_server() {
        let descriptor = PlatformDescriptor::linux(X86, CentOs7, "4.2.1");
        let artifact = rules(Command::MongoD).unwrap().resolve(&descriptor).unwrap().unwrap();
        assert_eq!(artifact.url, "/linux/mongodb-linux-x86_64-rhel70-4.2.1.tgz");
        assert_eq!(artifact.archive_type, ArchiveType::Tgz);
        assert_eq!(artifact.file_set.get("mongod"), Some(FileType::Executable));
    }

    #[test]
    fn test_version_gap_is_not_filled() {
        let descriptor = PlatformDescriptor::linux(X86, CentOs7, "4.2.4");
        assert_eq!(resolve_url(Command::MongoD, &descriptor), None);
        let descriptor = PlatformDescriptor::linux(X86, CentOs7, "4.4.10");
        assert_eq!(resolve_url(Command::MongoD, &descriptor), None);
    }

    #[test]
    fn test_redhat_and_oracle_share_centos_packages() {
        for os_version in [Redhat6, Oracle6] {
            let descriptor = PlatformDescriptor::linux(X86, os_version, "3.6.5");
            assert_eq!(
                resolve_url(Command::MongoS, &descriptor).as_deref(),
                Some("/linux/mongodb-linux-x86_64-rhel62-3.6.5.tgz")
            );
        }
    }

    #[test]
    fn test_el6_has_no_5x() {
        let descriptor = PlatformDescriptor::linux(X86, CentOs6, "5.0.5");
        assert_eq!(resolve_url(Command::MongoD, &descriptor), None);
    }

    #[test]
    fn test_el8_ranges() {
        let supported = PlatformDescriptor::linux(X86, Redhat8, "4.0.14");
        assert_eq!(
            resolve_url(Command::MongoD, &supported).as_deref(),
            Some("/linux/mongodb-linux-x86_64-rhel80-4.0.14.tgz")
        );
        let too_old = PlatformDescriptor::linux(X86, Redhat8, "4.0.13");
        assert_eq!(resolve_url(Command::MongoD, &too_old), None);
        let gap = PlatformDescriptor::linux(X86, CentOs8, "4.2.0");
        assert_eq!(resolve_url(Command::MongoD, &gap), None);
    }

    #[test]
    fn test_el8_arm() {
        let descriptor = PlatformDescriptor::linux(Arm, Oracle8, "4.4.4");
        assert_eq!(
            resolve_url(Command::Mongo, &descriptor).as_deref(),
            Some("/linux/mongodb-linux-aarch64-rhel82-4.4.4.tgz")
        );
        let descriptor = PlatformDescriptor::linux(Arm, CentOs8, "4.4.3");
        assert_eq!(resolve_url(Command::Mongo, &descriptor), None);
        let descriptor = PlatformDescriptor::linux(Arm, CentOs7, "4.4.4");
        assert_eq!(resolve_url(Command::Mongo, &descriptor), None);
    }

    #[test]
    fn test_tools_use_tools_version() {
        let descriptor = PlatformDescriptor::linux(X86, CentOs7, "4.2.1").tools_version("100.5.1");
        let artifact = rules(Command::MongoDump)
            .unwrap()
            .resolve(&descriptor)
            .unwrap()
            .unwrap();
        assert_eq!(
            artifact.url,
            "/tools/db/mongodb-database-tools-rhel70-x86_64-100.5.1.tgz"
        );
        assert_eq!(artifact.file_set.get("mongodump"), Some(FileType::Executable));
    }

    #[test]
    fn test_tools_arm_path() {
        let descriptor = PlatformDescriptor::linux(Arm, CentOs8, "5.0.5").tools_version("100.5.1");
        assert_eq!(
            resolve_url(Command::MongoRestore, &descriptor).as_deref(),
            Some("/tools/db/mongodb-database-tools-rhel82-arm64-100.5.1.tgz")
        );
    }

    #[test]
    fn test_tools_without_tools_version_fails() {
        let descriptor = PlatformDescriptor::linux(X86, CentOs7, "4.2.1");
        assert!(rules(Command::MongoImport).unwrap().resolve(&descriptor).is_err());
    }

    #[test]
    fn test_server_and_tools_tables_share_platforms() {
        for (server, tools) in SERVER_RULES.iter().zip(TOOLS_RULES) {
            assert_eq!(server.cpu, tools.cpu);
            assert_eq!(server.os_versions, tools.os_versions);
            assert_eq!(server.versions, tools.versions);
            assert_ne!(server.template, tools.template);
        }
    }
}
