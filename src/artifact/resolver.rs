use anyhow::Result;

use super::{ArchiveType, ArtifactDescriptor, FileSet, UrlTemplate};
use crate::platform::PlatformDescriptor;

/// Turns a matched platform descriptor into a concrete artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArtifactResolver {
    UrlTemplate(UrlTemplateResolver),
}

impl ArtifactResolver {
    /// Shorthand for a URL template resolver; the template is checked here.
    pub fn url_template(
        template: &str,
        archive_type: ArchiveType,
        file_set: FileSet,
    ) -> Result<Self> {
        Ok(ArtifactResolver::UrlTemplate(UrlTemplateResolver::new(
            template,
            archive_type,
            file_set,
        )?))
    }

    pub fn resolve(&self, descriptor: &PlatformDescriptor) -> Result<ArtifactDescriptor> {
        match self {
            ArtifactResolver::UrlTemplate(resolver) => resolver.resolve(descriptor),
        }
    }
}

/// Resolves by substituting descriptor fields into a URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlTemplateResolver {
    template: UrlTemplate,
    archive_type: ArchiveType,
    file_set: FileSet,
}

impl UrlTemplateResolver {
    pub fn new(template: &str, archive_type: ArchiveType, file_set: FileSet) -> Result<Self> {
        Ok(Self {
            template: UrlTemplate::parse(template)?,
            archive_type,
            file_set,
        })
    }

    pub fn template(&self) -> &UrlTemplate {
        &self.template
    }

    pub fn archive_type(&self) -> ArchiveType {
        self.archive_type
    }

    pub fn file_set(&self) -> &FileSet {
        &self.file_set
    }

    pub fn resolve(&self, descriptor: &PlatformDescriptor) -> Result<ArtifactDescriptor> {
        Ok(ArtifactDescriptor {
            url: self.template.render(descriptor)?,
            archive_type: self.archive_type,
            file_set: self.file_set.clone(),
        })
    }
}
