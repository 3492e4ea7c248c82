use anyhow::{Result, bail};
use std::io::Write;

use crate::{
    artifact::ArtifactResolver,
    command::Command,
    finder::{RuleTableCache, RuleTableFinder},
    platform::Distribution,
};

/// Print the ordered rule table of a distribution for one command.
#[tracing::instrument(skip(out))]
pub fn rules(command: &str, distribution: &str, out: &mut impl Write) -> Result<()> {
    let command: Command = command.parse()?;
    let distribution: Distribution = distribution.parse()?;

    let cache = RuleTableCache::new();
    let Some(finder) = RuleTableFinder::load(&cache, distribution, command)? else {
        bail!("No packages are published for {}", distribution);
    };

    writeln!(
        out,
        "{} rules for {} ({}):",
        distribution,
        command,
        command.category()
    )?;
    for (index, rule) in finder.rules().rules().iter().enumerate() {
        let matcher = &rule.matcher;
        let os_versions: Vec<&str> = matcher.os_versions.iter().map(|v| v.name()).collect();
        let ArtifactResolver::UrlTemplate(resolver) = &rule.resolver;

        writeln!(
            out,
            "{:>2}. {}/{}/{}bit [{}]",
            index + 1,
            matcher.os,
            matcher.cpu,
            matcher.bit_size,
            os_versions.join(", ")
        )?;
        writeln!(out, "    versions: {}", matcher.versions)?;
        writeln!(
            out,
            "    {} ({})",
            resolver.template(),
            resolver.archive_type()
        )?;
    }
    Ok(())
}
