//! Platform description module
//!
//! This module provides the values a caller uses to describe the host a
//! MongoDB binary should run on: OS family, CPU type, bit size and the
//! distribution release tag.

mod os_version;

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub use os_version::{Distribution, OsVersion};

/// Operating system family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Os {
    Linux,
    Windows,
    OsX,
    Solaris,
    FreeBsd,
}

impl fmt::Display for Os {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Os::Linux => write!(f, "linux"),
            Os::Windows => write!(f, "windows"),
            Os::OsX => write!(f, "osx"),
            Os::Solaris => write!(f, "solaris"),
            Os::FreeBsd => write!(f, "freebsd"),
        }
    }
}

impl FromStr for Os {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "linux" => Ok(Os::Linux),
            "windows" => Ok(Os::Windows),
            "osx" | "macos" | "darwin" => Ok(Os::OsX),
            "solaris" => Ok(Os::Solaris),
            "freebsd" => Ok(Os::FreeBsd),
            _ => anyhow::bail!(
                "Unknown OS: {}. Expected linux, windows, osx, solaris, or freebsd.",
                s
            ),
        }
    }
}

/// CPU architecture family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CpuType {
    X86,
    Arm,
}

impl fmt::Display for CpuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuType::X86 => write!(f, "x86"),
            CpuType::Arm => write!(f, "arm"),
        }
    }
}

impl FromStr for CpuType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "x86" | "x86_64" | "amd64" | "x64" => Ok(CpuType::X86),
            "arm" | "aarch64" | "arm64" => Ok(CpuType::Arm),
            _ => anyhow::bail!("Unknown CPU type: {}. Expected x86 or arm.", s),
        }
    }
}

/// Word size of the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BitSize {
    #[serde(rename = "32")]
    B32,
    #[serde(rename = "64")]
    B64,
}

impl fmt::Display for BitSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BitSize::B32 => write!(f, "32"),
            BitSize::B64 => write!(f, "64"),
        }
    }
}

impl FromStr for BitSize {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().trim_start_matches('b') {
            "32" => Ok(BitSize::B32),
            "64" => Ok(BitSize::B64),
            _ => anyhow::bail!("Unknown bit size: {}. Expected 32 or 64.", s),
        }
    }
}

/// Everything a rule table needs to know about one resolution request.
///
/// `version` is the requested MongoDB release, `tools_version` the release
/// of the database tools. The two are tracked separately because tools
/// releases follow their own numbering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformDescriptor {
    pub os: Os,
    pub cpu: CpuType,
    pub bit_size: BitSize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os_version: Option<OsVersion>,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tools_version: Option<String>,
}

impl PlatformDescriptor {
    /// Create a 64-bit Linux descriptor for the given release tag and version.
    pub fn linux(cpu: CpuType, os_version: OsVersion, version: impl Into<String>) -> Self {
        Self {
            os: Os::Linux,
            cpu,
            bit_size: BitSize::B64,
            os_version: Some(os_version),
            version: version.into(),
            tools_version: None,
        }
    }

    /// Set the database tools version.
    pub fn tools_version(mut self, version: impl Into<String>) -> Self {
        self.tools_version = Some(version.into());
        self
    }
}

impl fmt::Display for PlatformDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}bit", self.os, self.cpu, self.bit_size)?;
        if let Some(os_version) = &self.os_version {
            write!(f, "/{}", os_version)?;
        }
        write!(f, " version {}", self.version)?;
        if let Some(tools) = &self.tools_version {
            write!(f, " (tools {})", tools)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_os_parse() {
        assert_eq!("linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("Linux".parse::<Os>().unwrap(), Os::Linux);
        assert_eq!("macos".parse::<Os>().unwrap(), Os::OsX);
        assert!("plan9".parse::<Os>().is_err());
    }

    #[test]
    fn test_cpu_parse_aliases() {
        assert_eq!("x86_64".parse::<CpuType>().unwrap(), CpuType::X86);
        assert_eq!("amd64".parse::<CpuType>().unwrap(), CpuType::X86);
        assert_eq!("aarch64".parse::<CpuType>().unwrap(), CpuType::Arm);
        assert!("riscv".parse::<CpuType>().is_err());
    }

    #[test]
    fn test_bit_size_parse() {
        assert_eq!("64".parse::<BitSize>().unwrap(), BitSize::B64);
        assert_eq!("b32".parse::<BitSize>().unwrap(), BitSize::B32);
        assert!("16".parse::<BitSize>().is_err());
    }

    #[test]
    fn test_descriptor_display() {
        let descriptor = PlatformDescriptor::linux(CpuType::X86, OsVersion::CentOs7, "4.2.1")
            .tools_version("100.5.1");
        assert_eq!(
            descriptor.to_string(),
            "linux/x86/64bit/centos-7 version 4.2.1 (tools 100.5.1)"
        );
    }

    #[test]
    fn test_descriptor_serialize_skips_missing_fields() {
        let descriptor = PlatformDescriptor::linux(CpuType::Arm, OsVersion::Ubuntu2004, "5.0.5");
        let json = serde_json::to_string(&descriptor).unwrap();
        assert!(json.contains(r#""os_version":"ubuntu-20.04""#));
        assert!(json.contains(r#""bit_size":"64""#));
        assert!(!json.contains("tools_version"));
    }

    #[test]
    fn test_descriptor_deserialize() {
        let json = r#"{"os":"linux","cpu":"x86","bit_size":"64",
            "os_version":"redhat-8","version":"4.4.1"}"#;
        let descriptor: PlatformDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(descriptor.os_version, Some(OsVersion::Redhat8));
        assert_eq!(descriptor.tools_version, None);
    }
}
