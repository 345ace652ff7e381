use cep_race::utils::logger;
use cep_race::{server, CliConfig};
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting cep-race");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    let provider = match config.resolve() {
        Ok(provider) => provider,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e);
            std::process::exit(1);
        }
    };

    server::run(provider.as_ref()).await
}
