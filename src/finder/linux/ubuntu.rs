//! Ubuntu packages.
//!
//! Releases after 18.04 run the 18.04 builds; the 20.04 builds come first so
//! they win wherever both are published.

use anyhow::Result;

use crate::command::{Command, CommandCategory};
use crate::finder::{RuleSpec, build_rules};
use crate::platform::CpuType::{Arm, X86};
use crate::platform::OsVersion::{self, *};
use crate::rules::PlatformMatchRules;

const UBUNTU_18XX: &[OsVersion] = &[
    Ubuntu1804, Ubuntu1810, Ubuntu1904, Ubuntu1910, Ubuntu2004, Ubuntu2010,
];
const UBUNTU_20XX: &[OsVersion] = &[Ubuntu2004, Ubuntu2010];

const UBUNTU_18XX_ARM_VERSIONS: &[(&str, &str)] = &[
    ("5.0.5", "5.0.5"),
    ("5.0.0", "5.0.2"),
    ("4.4.11", "4.4.11"),
    ("4.4.0", "4.4.9"),
    ("4.2.18", "4.2.18"),
    ("4.2.5", "4.2.16"),
    ("4.2.0", "4.2.3"),
];

const UBUNTU_18XX_VERSIONS: &[(&str, &str)] = &[
    ("5.0.5", "5.0.5"),
    ("5.0.0", "5.0.2"),
    ("4.4.11", "4.4.11"),
    ("4.4.0", "4.4.9"),
    ("4.2.18", "4.2.18"),
    ("4.2.5", "4.2.16"),
    ("4.2.0", "4.2.3"),
    ("4.0.1", "4.0.27"),
    ("3.6.20", "3.6.23"),
];

const UBUNTU_20XX_VERSIONS: &[(&str, &str)] = &[
    ("5.0.5", "5.0.5"),
    ("5.0.0", "5.0.2"),
    ("4.4.11", "4.4.11"),
    ("4.4.0", "4.4.9"),
];

pub const SERVER_RULES: &[RuleSpec] = &[
    RuleSpec::linux(
        Arm,
        UBUNTU_20XX,
        UBUNTU_20XX_VERSIONS,
        "/linux/mongodb-linux-aarch64-ubuntu2004-{version}.tgz",
    ),
    RuleSpec::linux(
        X86,
        UBUNTU_20XX,
        UBUNTU_20XX_VERSIONS,
        "/linux/mongodb-linux-x86_64-ubuntu2004-{version}.tgz",
    ),
    RuleSpec::linux(
        Arm,
        UBUNTU_18XX,
        UBUNTU_18XX_ARM_VERSIONS,
        "/linux/mongodb-linux-aarch64-ubuntu1804-{version}.tgz",
    ),
    RuleSpec::linux(
        X86,
        UBUNTU_18XX,
        UBUNTU_18XX_VERSIONS,
        "/linux/mongodb-linux-x86_64-ubuntu1804-{version}.tgz",
    ),
];

pub const TOOLS_RULES: &[RuleSpec] = &[
    RuleSpec::linux(
        Arm,
        UBUNTU_20XX,
        UBUNTU_20XX_VERSIONS,
        "/tools/db/mongodb-database-tools-ubuntu2004-arm64-{tools.version}.tgz",
    ),
    RuleSpec::linux(
        X86,
        UBUNTU_20XX,
        UBUNTU_20XX_VERSIONS,
        "/tools/db/mongodb-database-tools-ubuntu2004-x86_64-{tools.version}.tgz",
    ),
    RuleSpec::linux(
        Arm,
        UBUNTU_18XX,
        UBUNTU_18XX_ARM_VERSIONS,
        "/tools/db/mongodb-database-tools-ubuntu1804-arm64-{tools.version}.tgz",
    ),
    RuleSpec::linux(
        X86,
        UBUNTU_18XX,
        UBUNTU_18XX_VERSIONS,
        "/tools/db/mongodb-database-tools-ubuntu1804-x86_64-{tools.version}.tgz",
    ),
];

/// Build the rule table for `command`.
pub fn rules(command: Command) -> Result<PlatformMatchRules> {
    match command.category() {
        CommandCategory::Server => build_rules(SERVER_RULES, command),
        CommandCategory::Tools => build_rules(TOOLS_RULES, command),
    }
}
