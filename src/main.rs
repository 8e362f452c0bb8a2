//! Thinkloop - conversational agent CLI
//!
#![doc = "Thinkloop - conversational agent CLI"]
#![doc = "Main entry point for the Thinkloop application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use thinkloop::cli::{Cli, Commands};
use thinkloop::commands;
use thinkloop::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_tracing(cli.verbose);

    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;
    config.validate()?;

    match cli.command {
        Commands::Chat { .. } => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Run { prompt, .. } => {
            tracing::debug!("Using prompt: {}", prompt);
            commands::run::run_prompt(config, prompt).await?;
            Ok(())
        }
        Commands::Tools => {
            commands::tools::list_tools(&config)?;
            Ok(())
        }
    }
}

/// Logs go to stderr so they never interleave with the conversation on stdout
fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        "thinkloop=debug"
    } else {
        "thinkloop=info"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
