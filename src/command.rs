//! MongoDB commands and their packaging category.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which family of packages a command ships in.
///
/// Server binaries and the database tools are released separately, with
/// their own download paths and their own version numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandCategory {
    Server,
    Tools,
}

impl fmt::Display for CommandCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandCategory::Server => write!(f, "server"),
            CommandCategory::Tools => write!(f, "tools"),
        }
    }
}

/// A MongoDB executable that can be provisioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    MongoD,
    MongoS,
    Mongo,
    MongoDump,
    MongoImport,
    MongoRestore,
}

impl Command {
    pub const ALL: &'static [Command] = &[
        Command::MongoD,
        Command::MongoS,
        Command::Mongo,
        Command::MongoDump,
        Command::MongoImport,
        Command::MongoRestore,
    ];

    /// Executable name inside the distribution package.
    pub fn command_name(&self) -> &'static str {
        match self {
            Command::MongoD => "mongod",
            Command::MongoS => "mongos",
            Command::Mongo => "mongo",
            Command::MongoDump => "mongodump",
            Command::MongoImport => "mongoimport",
            Command::MongoRestore => "mongorestore",
        }
    }

    pub fn category(&self) -> CommandCategory {
        match self {
            Command::MongoD | Command::MongoS | Command::Mongo => CommandCategory::Server,
            Command::MongoDump | Command::MongoImport | Command::MongoRestore => {
                CommandCategory::Tools
            }
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_lowercase();
        Command::ALL
            .iter()
            .copied()
            .find(|c| c.command_name() == wanted)
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "Unknown command: {}. Expected mongod, mongos, mongo, mongodump, \
                     mongoimport, or mongorestore.",
                    s
                )
            })
    }
}
