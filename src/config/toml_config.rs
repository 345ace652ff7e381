use crate::adapters::brasilapi::DEFAULT_BRASILAPI_URL;
use crate::adapters::viacep::DEFAULT_VIACEP_URL;
use crate::config::{
    validate_provider, DEFAULT_LISTEN_ADDR, DEFAULT_RACE_TIMEOUT_MS, DEFAULT_UPSTREAM_TIMEOUT_MS,
};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// File-based settings. Every section and key is optional.
///
/// ```toml
/// [server]
/// listen_addr = "0.0.0.0:8080"
///
/// [race]
/// timeout_ms = 1000
///
/// [upstream]
/// viacep_url = "http://viacep.com.br/ws/{cep}/json/"
/// brasilapi_url = "https://brasilapi.com.br/api/cep/v2/{cep}"
/// timeout_ms = 10000
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub server: ServerConfig,
    pub race: RaceConfig,
    pub upstream: UpstreamConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub listen_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RaceConfig {
    pub timeout_ms: u64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_RACE_TIMEOUT_MS,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub viacep_url: String,
    pub brasilapi_url: String,
    pub timeout_ms: u64,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            viacep_url: DEFAULT_VIACEP_URL.to_string(),
            brasilapi_url: DEFAULT_BRASILAPI_URL.to_string(),
            timeout_ms: DEFAULT_UPSTREAM_TIMEOUT_MS,
        }
    }
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self> {
        let config: TomlConfig = toml::from_str(content)?;
        Ok(config)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

impl ConfigProvider for TomlConfig {
    fn listen_addr(&self) -> &str {
        &self.server.listen_addr
    }

    fn viacep_url(&self) -> &str {
        &self.upstream.viacep_url
    }

    fn brasilapi_url(&self) -> &str {
        &self.upstream.brasilapi_url
    }

    fn race_timeout(&self) -> Duration {
        Duration::from_millis(self.race.timeout_ms)
    }

    fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream.timeout_ms)
    }
}
