use std::sync::Arc;

use anyhow::Context;
use coin_info_bot::{
    config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH},
    Bot, ChatId, CoinGeckoClient, CoinInfoCommand, CommandHandler, Settings,
};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config_path =
        std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let settings = Settings::load(&config_path)
        .with_context(|| format!("loading settings from {config_path}"))?;
    settings.logging.init();

    let timezone = settings.display.tz()?;
    let source = CoinGeckoClient::new(&settings.coingecko)?;
    let handler: Arc<dyn CommandHandler> = Arc::new(CoinInfoCommand::new(source, timezone));

    info!(
        chat_id = settings.telegram.chat_id,
        timezone = %timezone,
        "Starting coin info bot"
    );

    let bot = Bot::new(&settings.telegram.bot_token);
    coin_info_bot::run(
        bot,
        ChatId(settings.telegram.chat_id),
        settings.telegram.notify_on_start,
        handler,
    )
    .await?;

    Ok(())
}
