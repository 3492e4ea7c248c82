use anyhow::{Result, bail};
use log::debug;

/// Server the MongoDB download paths are relative to.
pub const DEFAULT_BASE_URL: &str = "https://fastdl.mongodb.org";

/// Settings shared by all commands.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub base_url: String,
}

impl Config {
    pub fn new(base_url: Option<String>) -> Result<Self> {
        let base_url = match base_url {
            Some(url) => {
                let url = url.trim().trim_end_matches('/').to_string();
                if !(url.starts_with("https://") || url.starts_with("http://")) {
                    bail!("Invalid base URL '{}': expected http:// or https://", url);
                }
                debug!("Using custom base URL: {}", url);
                url
            }
            None => DEFAULT_BASE_URL.to_string(),
        };
        Ok(Self { base_url })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
