//! Main entry point for Apertium Translator CLI

#![forbid(unsafe_code)]

use clap::Parser;
use dotenvy::dotenv;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apertium_translator::cli::commands::{self, Commands};
use apertium_translator::ClientConfig;

/// Apertium Translator - command-line client for the Apertium API
#[derive(Parser, Debug)]
#[command(name = "apertium-translator", version, about, long_about = None)]
struct Args {
    /// API key (optional, defaults to APERTIUM_API_KEY env var)
    #[arg(long)]
    api_key: Option<String>,

    /// HTTP referrer sent with every request
    #[arg(long)]
    referrer: Option<String>,

    /// API endpoint
    #[arg(long)]
    endpoint: Option<String>,

    /// JSON configuration file, used instead of environment variables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Request timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenv().ok();

    let args = Args::parse();

    // Initialize logging
    let log_level = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("apertium_translator={}", log_level).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut config = match &args.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::from_env()?,
    };

    // Override config with CLI args if provided
    if let Some(api_key) = args.api_key {
        config = config.with_api_key(api_key);
    }
    if let Some(referrer) = args.referrer {
        config = config.with_referrer(referrer);
    }
    if let Some(endpoint) = args.endpoint {
        config = config.with_endpoint(endpoint);
    }
    if let Some(timeout_ms) = args.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    // Execute command
    match args.command {
        Some(Commands::Translate { text, pair }) => {
            commands::handle_translate(config, text, pair).await?;
        }
        Some(Commands::CheckKey) => {
            commands::handle_check_key(&config)?;
        }
        None => {
            println!("Please specify a command. Use --help for more information.");
        }
    }

    Ok(())
}
