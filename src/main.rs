use anyhow::Result;
use sophie_bot::bot::{self, Formatter};
use sophie_bot::config::AppConfig;
use sophie_bot::errors::error_logging;
use sophie_bot::observability;
use std::sync::Arc;
use std::time::Duration;
use teloxide::prelude::*;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file first
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    config.validate()?;

    observability::init_tracing(&config.logging)?;
    info!(summary = %config.summary(), "Configuration loaded");

    let formatter = match Formatter::from_config(&config.formatting) {
        Ok(formatter) => Arc::new(formatter),
        Err(e) => {
            error_logging::log_config_error(&e, "formatter");
            return Err(e.into());
        }
    };

    // Initialize the bot with custom client configuration for better reliability
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.bot.http_timeout_secs))
        .build()?;

    let bot = Bot::with_client(config.bot.token.clone(), client);

    info!(
        timeout_secs = config.bot.http_timeout_secs,
        "Bot initialized, starting dispatcher"
    );

    let handler = Update::filter_message().endpoint({
        let formatter = Arc::clone(&formatter);
        move |bot: Bot, msg: Message| {
            let formatter = Arc::clone(&formatter);
            async move { bot::message_handler(bot, msg, formatter).await }
        }
    });

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
