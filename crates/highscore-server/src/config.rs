use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use highscore_codec::Checksummer;

use crate::error::{ServerError, ServerResult};

/// Server configuration, loadable from TOML. Missing keys take defaults.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding the `highscore/` and `pack/` document folders.
    pub data_root: PathBuf,
    /// Checksum secret shared with trusted clients.
    pub secret: u64,
    /// Largest accepted request body.
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 10000)),
            data_root: PathBuf::from("data"),
            secret: Checksummer::DEFAULT_SECRET,
            max_body_bytes: 4 * 1024,
        }
    }
}

impl ServerConfig {
    /// Load a TOML config file.
    pub fn load(path: &Path) -> ServerResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
    }

    /// Parse and validate a TOML config.
    pub fn from_toml(text: &str) -> ServerResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| ServerError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ServerResult<()> {
        self.checksummer().map(|_| ())
    }

    /// Checksummer for the configured secret. Fails on an even secret.
    pub fn checksummer(&self) -> ServerResult<Checksummer> {
        Checksummer::new(self.secret).map_err(|e| ServerError::Config(e.to_string()))
    }
}
