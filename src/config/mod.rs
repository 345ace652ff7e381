#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;
pub use toml_config::TomlConfig;

use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_positive_number, validate_range, validate_socket_addr, validate_url_template,
};

pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_RACE_TIMEOUT_MS: u64 = 1000;
pub const DEFAULT_UPSTREAM_TIMEOUT_MS: u64 = 10_000;
pub const MAX_RACE_TIMEOUT_MS: u64 = 60_000;

/// Checks shared by every config source.
pub fn validate_provider(config: &dyn ConfigProvider) -> Result<()> {
    validate_socket_addr("listen_addr", config.listen_addr())?;
    validate_url_template("viacep_url", config.viacep_url())?;
    validate_url_template("brasilapi_url", config.brasilapi_url())?;
    validate_range(
        "timeout_ms",
        config.race_timeout().as_millis() as u64,
        1,
        MAX_RACE_TIMEOUT_MS,
    )?;
    validate_positive_number(
        "upstream_timeout_ms",
        config.upstream_timeout().as_millis() as u64,
        1,
    )?;
    Ok(())
}
