use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Linux distribution family an [`OsVersion`] belongs to.
///
/// CentOS, Red Hat and Oracle Linux share binaries, so they form one family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Distribution {
    CentosRedhat,
    Ubuntu,
    Debian,
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Distribution::CentosRedhat => write!(f, "centos-redhat"),
            Distribution::Ubuntu => write!(f, "ubuntu"),
            Distribution::Debian => write!(f, "debian"),
        }
    }
}

impl FromStr for Distribution {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "centos-redhat" | "centos" | "redhat" | "rhel" | "oracle" => {
                Ok(Distribution::CentosRedhat)
            }
            "ubuntu" => Ok(Distribution::Ubuntu),
            "debian" => Ok(Distribution::Debian),
            _ => anyhow::bail!(
                "Unknown distribution: {}. Expected centos-redhat, ubuntu, or debian.",
                s
            ),
        }
    }
}

/// A distribution release tag, e.g. CentOS 7 or Ubuntu 20.04.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OsVersion {
    #[serde(rename = "centos-6")]
    CentOs6,
    #[serde(rename = "centos-7")]
    CentOs7,
    #[serde(rename = "centos-8")]
    CentOs8,
    #[serde(rename = "redhat-6")]
    Redhat6,
    #[serde(rename = "redhat-7")]
    Redhat7,
    #[serde(rename = "redhat-8")]
    Redhat8,
    #[serde(rename = "oracle-6")]
    Oracle6,
    #[serde(rename = "oracle-7")]
    Oracle7,
    #[serde(rename = "oracle-8")]
    Oracle8,
    #[serde(rename = "ubuntu-14.04")]
    Ubuntu1404,
    #[serde(rename = "ubuntu-16.04")]
    Ubuntu1604,
    #[serde(rename = "ubuntu-18.04")]
    Ubuntu1804,
    #[serde(rename = "ubuntu-18.10")]
    Ubuntu1810,
    #[serde(rename = "ubuntu-19.04")]
    Ubuntu1904,
    #[serde(rename = "ubuntu-19.10")]
    Ubuntu1910,
    #[serde(rename = "ubuntu-20.04")]
    Ubuntu2004,
    #[serde(rename = "ubuntu-20.10")]
    Ubuntu2010,
    #[serde(rename = "ubuntu-21.04")]
    Ubuntu2104,
    #[serde(rename = "debian-9")]
    Debian9,
    #[serde(rename = "debian-10")]
    Debian10,
    #[serde(rename = "debian-11")]
    Debian11,
}

impl OsVersion {
    pub const ALL: &'static [OsVersion] = &[
        OsVersion::CentOs6,
        OsVersion::CentOs7,
        OsVersion::CentOs8,
        OsVersion::Redhat6,
        OsVersion::Redhat7,
        OsVersion::Redhat8,
        OsVersion::Oracle6,
        OsVersion::Oracle7,
        OsVersion::Oracle8,
        OsVersion::Ubuntu1404,
        OsVersion::Ubuntu1604,
        OsVersion::Ubuntu1804,
        OsVersion::Ubuntu1810,
        OsVersion::Ubuntu1904,
        OsVersion::Ubuntu1910,
        OsVersion::Ubuntu2004,
        OsVersion::Ubuntu2010,
        OsVersion::Ubuntu2104,
        OsVersion::Debian9,
        OsVersion::Debian10,
        OsVersion::Debian11,
    ];

    /// The stable identifier used on the command line and in serialized form.
    pub fn name(&self) -> &'static str {
        match self {
            OsVersion::CentOs6 => "centos-6",
            OsVersion::CentOs7 => "centos-7",
            OsVersion::CentOs8 => "centos-8",
            OsVersion::Redhat6 => "redhat-6",
            OsVersion::Redhat7 => "redhat-7",
            OsVersion::Redhat8 => "redhat-8",
            OsVersion::Oracle6 => "oracle-6",
            OsVersion::Oracle7 => "oracle-7",
            OsVersion::Oracle8 => "oracle-8",
            OsVersion::Ubuntu1404 => "ubuntu-14.04",
            OsVersion::Ubuntu1604 => "ubuntu-16.04",
            OsVersion::Ubuntu1804 => "ubuntu-18.04",
            OsVersion::Ubuntu1810 => "ubuntu-18.10",
            OsVersion::Ubuntu1904 => "ubuntu-19.04",
            OsVersion::Ubuntu1910 => "ubuntu-19.10",
            OsVersion::Ubuntu2004 => "ubuntu-20.04",
            OsVersion::Ubuntu2010 => "ubuntu-20.10",
            OsVersion::Ubuntu2104 => "ubuntu-21.04",
            OsVersion::Debian9 => "debian-9",
            OsVersion::Debian10 => "debian-10",
            OsVersion::Debian11 => "debian-11",
        }
    }

    pub fn distribution(&self) -> Distribution {
        match self {
            OsVersion::CentOs6
            | OsVersion::CentOs7
            | OsVersion::CentOs8
            | OsVersion::Redhat6
            | OsVersion::Redhat7
            | OsVersion::Redhat8
            | OsVersion::Oracle6
            | OsVersion::Oracle7
            | OsVersion::Oracle8 => Distribution::CentosRedhat,
            OsVersion::Ubuntu1404
            | OsVersion::Ubuntu1604
            | OsVersion::Ubuntu1804
            | OsVersion::Ubuntu1810
            | OsVersion::Ubuntu1904
            | OsVersion::Ubuntu1910
            | OsVersion::Ubuntu2004
            | OsVersion::Ubuntu2010
            | OsVersion::Ubuntu2104 => Distribution::Ubuntu,
            OsVersion::Debian9 | OsVersion::Debian10 | OsVersion::Debian11 => {
                Distribution::Debian
            }
        }
    }
}

impl fmt::Display for OsVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for OsVersion {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        OsVersion::ALL
            .iter()
            .copied()
            .find(|v| v.name() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown OS version: {} (e.g. centos-7, ubuntu-20.04)", s)
            })
    }
}
