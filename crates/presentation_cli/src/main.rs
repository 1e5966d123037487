//! blogcast CLI
//!
//! Turns a blog post into a narrated podcast episode.

use anyhow::Context;
use clap::Parser;
use infrastructure::{AppConfig, init_telemetry};
use presentation_cli::{
    cli::{Cli, Commands},
    commands,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config =
        AppConfig::load_from(cli.config.as_deref()).context("Failed to load configuration")?;
    config
        .validate()
        .map_err(anyhow::Error::msg)
        .context("Invalid configuration")?;

    init_telemetry(&config.telemetry, cli.verbose).context("Failed to initialize logging")?;

    match cli.command {
        Commands::Generate(args) => commands::generate(config, args).await?,
        Commands::Voices => commands::voices(),
        Commands::Config => commands::show_config(&config)?,
    }

    Ok(())
}
