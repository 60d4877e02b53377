//! CLI command definitions and handlers

use clap::Subcommand;
use tracing::info;

use crate::core::client::ApertiumClient;
use crate::core::config::ClientConfig;
use crate::core::models::LanguagePair;

/// Commands for Apertium Translator
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Translate text
    Translate {
        /// Text to translate
        text: String,

        /// Language pair, `en|es` or `en-es`
        #[arg(short, long, default_value = "en|es")]
        pair: LanguagePair,
    },

    /// Check that an API key is configured
    CheckKey,
}

/// Handle translate command
pub async fn handle_translate(
    config: ClientConfig,
    text: String,
    pair: LanguagePair,
) -> anyhow::Result<()> {
    let client = ApertiumClient::new(config)?;

    info!("Translating with language pair {}", pair);
    let translation = client.translate(&text, &pair).await?;
    println!("{}", translation);

    Ok(())
}

/// Handle check-key command
pub fn handle_check_key(config: &ClientConfig) -> anyhow::Result<()> {
    config.validate()?;
    info!("API key looks valid, endpoint: {}", config.api_endpoint);
    println!("OK");
    Ok(())
}
