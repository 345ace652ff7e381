use crate::adapters::brasilapi::DEFAULT_BRASILAPI_URL;
use crate::adapters::viacep::DEFAULT_VIACEP_URL;
use crate::config::{validate_provider, TomlConfig};
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "cep-race")]
#[command(about = "Looks up a CEP on ViaCEP and BrasilAPI and answers with the fastest")]
pub struct CliConfig {
    #[arg(long, default_value = super::DEFAULT_LISTEN_ADDR)]
    pub listen_addr: String,

    #[arg(long, default_value = DEFAULT_VIACEP_URL)]
    pub viacep_url: String,

    #[arg(long, default_value = DEFAULT_BRASILAPI_URL)]
    pub brasilapi_url: String,

    #[arg(long, default_value_t = super::DEFAULT_RACE_TIMEOUT_MS)]
    pub timeout_ms: u64,

    #[arg(long, default_value_t = super::DEFAULT_UPSTREAM_TIMEOUT_MS)]
    pub upstream_timeout_ms: u64,

    #[arg(long, help = "Load settings from a TOML file instead of the flags above")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl CliConfig {
    /// Picks the config source: the TOML file when `--config` is given, the flags otherwise.
    pub fn resolve(&self) -> Result<Box<dyn ConfigProvider>> {
        let provider: Box<dyn ConfigProvider> = match &self.config {
            Some(path) => {
                tracing::info!("Loading config from {}", path.display());
                let toml_config = TomlConfig::from_file(path)?;
                toml_config.validate()?;
                Box::new(toml_config)
            }
            None => {
                self.validate()?;
                Box::new(self.clone())
            }
        };
        Ok(provider)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

impl ConfigProvider for CliConfig {
    fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    fn viacep_url(&self) -> &str {
        &self.viacep_url
    }

    fn brasilapi_url(&self) -> &str {
        &self.brasilapi_url
    }

    fn race_timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    fn upstream_timeout(&self) -> Duration {
        Duration::from_millis(self.upstream_timeout_ms)
    }
}
