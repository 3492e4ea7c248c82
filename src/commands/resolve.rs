use anyhow::{Context, Result, bail};
use std::io::Write;
use log::debug;

use crate::{
    command::Command,
    config::Config,
    finder,
    platform::{BitSize, CpuType, Os, OsVersion, PlatformDescriptor},
};

/// Platform and version options of `mongodist resolve`.
#[derive(clap::Args, Debug, Clone)]
pub struct ResolveArgs {
    /// The MongoDB executable (mongod, mongos, mongo, mongodump, mongoimport, mongorestore)
    #[arg(value_name = "COMMAND")]
    pub command: String,

    /// Operating system family
    #[arg(long, default_value = "linux")]
    pub os: String,

    /// CPU architecture (x86, arm)
    #[arg(long, default_value = "x86")]
    pub cpu: String,

    /// Word size (32, 64)
    #[arg(long, default_value = "64")]
    pub bits: String,

    /// Distribution release (e.g. centos-7, ubuntu-20.04)
    #[arg(long = "os-version", value_name = "RELEASE")]
    pub os_version: Option<String>,

    /// MongoDB version to provision
    #[arg(long, value_name = "VERSION")]
    pub version: String,

    /// Database tools version, used by mongodump, mongoimport and mongorestore
    #[arg(long = "tools-version", value_name = "VERSION")]
    pub tools_version: Option<String>,

    /// Print the artifact as JSON
    #[arg(long)]
    pub json: bool,
}

impl ResolveArgs {
    pub fn parse_command(&self) -> Result<Command> {
        self.command.parse()
    }

    pub fn descriptor(&self) -> Result<PlatformDescriptor> {
        let os_version = self
            .os_version
            .as_deref()
            .map(str::parse::<OsVersion>)
            .transpose()?;
        Ok(PlatformDescriptor {
            os: self.os.parse::<Os>()?,
            cpu: self.cpu.parse::<CpuType>()?,
            bit_size: self.bits.parse::<BitSize>()?,
            os_version,
            version: self.version.clone(),
            tools_version: self.tools_version.clone(),
        })
    }
}

#[derive(serde::Serialize)]
struct ResolveOutput<'a> {
    command: Command,
    download_url: String,
    #[serde(flatten)]
    artifact: &'a crate::artifact::ArtifactDescriptor,
}

/// Resolve and print the package for one command.
#[tracing::instrument(skip(config, args, out))]
pub fn resolve(config: &Config, args: &ResolveArgs, out: &mut impl Write) -> Result<()> {
    let command = args.parse_command()?;
    let descriptor = args.descriptor()?;
    debug!("Resolving {} for {}", command, descriptor);

    let Some(artifact) = finder::resolve(command, &descriptor)
        .with_context(|| format!("Failed to resolve {} for {}", command, descriptor))?
    else {
        bail!("No package for {} on {}", command, descriptor);
    };

    let download_url = artifact.download_url(&config.base_url);
    if args.json {
        let output = ResolveOutput {
            command,
            download_url,
            artifact: &artifact,
        };
        writeln!(out, "{}", serde_json::to_string_pretty(&output)?)?;
    } else {
        writeln!(out, "url: {}", download_url)?;
        writeln!(out, "archive: {}", artifact.archive_type)?;
        for entry in artifact.file_set.entries() {
            writeln!(out, "{}: {}", entry.file_type, entry.name)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_args(command: &str, os_version: &str, version: &str) -> ResolveArgs {
        ResolveArgs {
            command: command.into(),
            os: "linux".into(),
            cpu: "x86".into(),
            bits: "64".into(),
            os_version: Some(os_version.into()),
            version: version.into(),
            tools_version: None,
            json: false,
        }
    }

    fn run(args: &ResolveArgs) -> Result<String> {
        let mut out = Vec::new();
        resolve(&Config::default(), args, &mut out)?;
        Ok(String::from_utf8(out)?)
    }

    #[test]
    fn test_resolve_text_output() {
        let output = run(&make_args("mongod", "centos-7", "4.2.1")).unwrap();
        assert_eq!(
            output,
            "url: https://fastdl.mongodb.org/linux/mongodb-linux-x86_64-rhel70-4.2.1.tgz\n\
             archive: tgz\n\
             executable: mongod\n"
        );
    }

    #[test]
    fn test_resolve_json_output() {
        let mut args = make_args("mongorestore", "ubuntu-18.04", "4.2.1");
        args.tools_version = Some("100.5.1".into());
        args.json = true;

        let output = run(&args).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["command"], "mongorestore");
        assert_eq!(
            value["download_url"],
            concat!(
                "https://fastdl.mongodb.org",
                "/tools/db/mongodb-database-tools-ubuntu1804-x86_64-100.5.1.tgz"
            )
        );
        assert_eq!(value["archive_type"], "tgz");
        assert_eq!(value["file_set"]["entries"][0]["name"], "mongorestore");
    }

    #[test]
    fn test_resolve_unsupported_is_error() {
        let err = run(&make_args("mongod", "centos-7", "4.2.4")).unwrap_err();
        assert!(err.to_string().starts_with("No package for mongod"));
    }

    #[test]
    fn test_resolve_bad_input() {
        assert!(run(&make_args("mongosh", "centos-7", "4.2.1")).is_err());
        assert!(run(&make_args("mongod", "centos-5", "4.2.1")).is_err());
        let mut args = make_args("mongod", "centos-7", "4.2.1");
        args.cpu = "sparc".into();
        assert!(run(&args).is_err());
    }

    #[test]
    fn test_descriptor_without_os_version() {
        let mut args = make_args("mongod", "centos-7", "4.2.1");
        args.os_version = None;
        let descriptor = args.descriptor().unwrap();
        assert_eq!(descriptor.os_version, None);
        assert!(run(&args).is_err());
    }
}
