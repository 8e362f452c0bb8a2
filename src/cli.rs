//! Command-line interface definition for Thinkloop
//!
//! Defines the CLI structure using clap's derive API: an interactive chat,
//! a one-shot run, and a tool listing.

use clap::{Parser, Subcommand};

/// Thinkloop - conversational agent with text-protocol tool calls
///
/// Talk to a language model that can list, read and write files, create
/// directories and ask you for clarification while it works.
#[derive(Parser, Debug, Clone)]
#[command(name = "thinkloop")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start an interactive chat session
    Chat {
        /// Override the provider (openai, openrouter, gemini, auto)
        #[arg(short, long)]
        provider: Option<String>,

        /// Override the model of the selected provider
        #[arg(short, long)]
        model: Option<String>,

        /// Agent mode: standard or reasoning
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// Send a single prompt and exit after the answer
    Run {
        /// Prompt to send
        #[arg(long)]
        prompt: String,

        /// Override the provider (openai, openrouter, gemini, auto)
        #[arg(short, long)]
        provider: Option<String>,

        /// Override the model of the selected provider
        #[arg(short, long)]
        model: Option<String>,

        /// Agent mode: standard or reasoning
        #[arg(short, long)]
        agent: Option<String>,
    },

    /// List the tools available to the model
    Tools,
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            config: Some("config/config.yaml".to_string()),
            verbose: false,
            command: Commands::Tools,
        }
    }
}
