pub mod artifact;
pub mod command;
pub mod commands;
pub mod config;
pub mod finder;
pub mod platform;
pub mod rules;
pub mod version;

pub use artifact::ArtifactDescriptor;
pub use command::{Command, CommandCategory};
pub use finder::{LinuxPackageResolver, PackageFinder, resolve};
pub use platform::PlatformDescriptor;
