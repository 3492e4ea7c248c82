use anyhow::{Context, Result, anyhow, bail};
use std::fmt;
use std::str::FromStr;

use crate::platform::PlatformDescriptor;
use crate::version::Version;

/// A named value a URL template can refer to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placeholder {
    /// `{version}`: the requested MongoDB version
    Version,
    /// `{tools.version}`: the requested database tools version
    ToolsVersion,
}

impl Placeholder {
    pub fn token(&self) -> &'static str {
        match self {
            Placeholder::Version => "version",
            Placeholder::ToolsVersion => "tools.version",
        }
    }

    fn value<'a>(&self, descriptor: &'a PlatformDescriptor) -> Option<&'a str> {
        match self {
            Placeholder::Version => Some(descriptor.version.as_str()),
            Placeholder::ToolsVersion => descriptor.tools_version.as_deref(),
        }
    }
}

impl fmt::Display for Placeholder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.token())
    }
}

impl FromStr for Placeholder {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "version" => Ok(Placeholder::Version),
            "tools.version" => Ok(Placeholder::ToolsVersion),
            _ => bail!("Unknown placeholder {{{}}}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// A download path with `{name}` placeholders, checked when parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl UrlTemplate {
    /// Parse a template, rejecting unknown or malformed placeholders.
    pub fn parse(template: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = template;

        while let Some(pos) = rest.find(['{', '}']) {
            let (before, after) = rest.split_at(pos);
            literal.push_str(before);

            if after.starts_with('}') {
                bail!("Invalid URL template '{}': unmatched '}}'", template);
            }

            let close = after
                .find('}')
                .ok_or_else(|| anyhow!("Invalid URL template '{}': unterminated '{{'", template))?;
            let name = &after[1..close];
            if name.is_empty() || name.contains('{') {
                bail!("Invalid URL template '{}': malformed placeholder", template);
            }
            let placeholder = name
                .parse::<Placeholder>()
                .map_err(|e| anyhow!("Invalid URL template '{}': {}", template, e))?;

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            segments.push(Segment::Placeholder(placeholder));
            rest = &after[close + 1..];
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: template.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Placeholders used by this template, in order of first appearance.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        let mut found = Vec::new();
        for segment in &self.segments {
            if let Segment::Placeholder(p) = segment {
                if !found.contains(p) {
                    found.push(*p);
                }
            }
        }
        found
    }

    /// Substitute every placeholder from the descriptor.
    ///
    /// Fails if the descriptor has no value for a placeholder or the value is
    /// not a `major.minor.patch` release; the partially rendered URL is never
    /// returned.
    pub fn render(&self, descriptor: &PlatformDescriptor) -> Result<String> {
        let mut url = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => url.push_str(text),
                Segment::Placeholder(p) => {
                    let value = p.value(descriptor).ok_or_else(|| {
                        anyhow!(
                            "URL template '{}' needs {} but {} does not provide it",
                            self.source,
                            p,
                            descriptor
                        )
                    })?;
                    Version::parse_release(value).with_context(|| {
                        format!("Refusing to substitute {} into '{}'", p, self.source)
                    })?;
                    url.push_str(value);
                }
            }
        }
        Ok(url)
    }
}

impl fmt::Display for UrlTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
