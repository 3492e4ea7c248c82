//! Artifact description module
//!
//! This module provides the resolved output of a rule table: where to
//! download the distribution package from, how it is packed, and which files
//! the consumer should find once it is unpacked.

mod resolver;
mod template;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use resolver::{ArtifactResolver, UrlTemplateResolver};
pub use template::{Placeholder, UrlTemplate};

/// Archive format of a distribution package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchiveType {
    Tgz,
    Tbz2,
    Zip,
}

impl ArchiveType {
    pub fn extension(&self) -> &'static str {
        match self {
            ArchiveType::Tgz => "tgz",
            ArchiveType::Tbz2 => "tbz2",
            ArchiveType::Zip => "zip",
        }
    }
}

impl fmt::Display for ArchiveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// Role of a file inside an unpacked package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Executable,
    Library,
    Support,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileType::Executable => write!(f, "executable"),
            FileType::Library => write!(f, "library"),
            FileType::Support => write!(f, "support"),
        }
    }
}

/// A file the consumer expects to find after extraction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub file_type: FileType,
    pub name: String,
}

/// Ordered set of expected files.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileSet {
    entries: Vec<FileEntry>,
}

impl FileSet {
    /// A file set holding exactly one executable.
    pub fn executable(name: impl Into<String>) -> Self {
        Self::default().with_entry(FileType::Executable, name)
    }

    /// Add an entry, replacing any entry with the same name.
    pub fn with_entry(mut self, file_type: FileType, name: impl Into<String>) -> Self {
        let name = name.into();
        self.entries.retain(|e| e.name != name);
        self.entries.push(FileEntry { file_type, name });
        self
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<FileType> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.file_type)
    }

    pub fn executables(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .filter(|e| e.file_type == FileType::Executable)
            .map(|e| e.name.as_str())
    }
}

/// A concrete, downloadable distribution package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactDescriptor {
    /// Download path relative to the distribution server
    pub url: String,
    pub archive_type: ArchiveType,
    pub file_set: FileSet,
}

impl ArtifactDescriptor {
    /// Join the download path onto a server base URL.
    pub fn download_url(&self, base_url: &str) -> String {
        let base = base_url.trim_end_matches('/');
        if self.url.starts_with('/') {
            format!("{}{}", base, self.url)
        } else {
            format!("{}/{}", base, self.url)
        }
    }
}
