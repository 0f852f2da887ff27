use std::sync::Arc;

use teloxide::{prelude::*, types::ChatId, utils::command::BotCommands};
use tracing::{error, info, warn};

use crate::traits::CommandHandler;

pub const FAILURE_MESSAGE: &str = "Failed to fetch coin data. Please try again later.";
const STARTUP_MESSAGE: &str = "Coin info bot is online. Try /coin_info btc";

#[derive(Debug, BotCommands, Clone)]
#[command(rename_rule = "snake_case")]
pub enum Command {
    #[command(description = "show market data for a coin, e.g. /coin_info btc")]
    CoinInfo(String),
}

/// Parse a message into a [`Command`], matching the command name and bot
/// mention case-insensitively. Arguments keep their case.
pub fn parse_command(text: &str, bot_username: &str) -> Option<Command> {
    let text = text.trim_start();
    let (head, rest) = match text.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, Some(rest)),
        None => (text, None),
    };

    let mut normalized = head.to_lowercase();
    if let Some(rest) = rest {
        normalized.push(' ');
        normalized.push_str(rest);
    }

    Command::parse(&normalized, &bot_username.to_lowercase()).ok()
}

/// Split the raw command text into whitespace separated arguments.
pub fn split_args(raw: &str) -> Vec<&str> {
    raw.split_whitespace().collect()
}

/// Run the handler and turn its outcome into the text sent back to the chat.
pub async fn reply_text(handler: &dyn CommandHandler, args: &[&str]) -> String {
    match handler.handle(args).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(command = handler.name(), error = %e, "Command failed");
            FAILURE_MESSAGE.to_string()
        }
    }
}

/// Handle incoming Telegram commands
async fn handle_command(
    bot: &Bot,
    msg: &Message,
    cmd: Command,
    handler: &dyn CommandHandler,
) -> ResponseResult<()> {
    match cmd {
        Command::CoinInfo(raw) => {
            info!(chat_id = msg.chat.id.0, args = %raw, "Received /coin_info");
            let reply = reply_text(handler, &split_args(&raw)).await;
            bot.send_message(msg.chat.id, reply).await?;
        }
    }

    Ok(())
}

/// Publish the command menu and optionally greet the configured chat.
async fn announce(bot: &Bot, chat_id: ChatId, notify_on_start: bool) {
    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        warn!(error = %e, "Failed to register bot commands");
    }

    if notify_on_start {
        if let Err(e) = bot.send_message(chat_id, STARTUP_MESSAGE).await {
            warn!(chat_id = chat_id.0, error = %e, "Failed to send startup message");
        }
    }
}

/// Long-poll Telegram until Ctrl-C, routing `/coin_info` to `handler`.
pub async fn run(
    bot: Bot,
    chat_id: ChatId,
    notify_on_start: bool,
    handler: Arc<dyn CommandHandler>,
) -> ResponseResult<()> {
    let me = bot.get_me().await?;
    let username = me.username().to_string();

    announce(&bot, chat_id, notify_on_start).await;
    info!(bot = %username, "Starting long polling");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let handler = Arc::clone(&handler);
        let username = username.clone();
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };
            let Some(cmd) = parse_command(text, &username) else {
                return respond(());
            };

            if let Err(e) = handle_command(&bot, &msg, cmd, handler.as_ref()).await {
                error!(error = %e, "Failed to send Telegram command response");
            }

            respond(())
        }
    })
    .await;

    info!("Polling stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::error::{BotError, Result};

    struct Echo;

    #[async_trait]
    impl CommandHandler for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }

        async fn handle(&self, args: &[&str]) -> Result<String> {
            match args.first() {
                Some(&"boom") => Err(BotError::MissingField("market_data")),
                _ => Ok(args.join("|")),
            }
        }
    }

    #[test]
    fn splits_on_any_whitespace() {
        assert!(split_args("").is_empty());
        assert!(split_args("   ").is_empty());
        assert_eq!(split_args(" btc  extra\tmore "), vec!["btc", "extra", "more"]);
    }

    #[test]
    fn parses_coin_info_command() {
        let cmd = Command::parse("/coin_info btc", "coin_bot").unwrap();
        assert!(matches!(cmd, Command::CoinInfo(ref raw) if raw == "btc"));

        let cmd = Command::parse("/coin_info@coin_bot eth", "coin_bot").unwrap();
        assert!(matches!(cmd, Command::CoinInfo(ref raw) if raw == "eth"));

        let cmd = Command::parse("/coin_info", "coin_bot").unwrap();
        assert!(matches!(cmd, Command::CoinInfo(ref raw) if split_args(raw).is_empty()));
    }

    #[test]
    fn command_name_matching_ignores_case() {
        for text in ["/COIN_INFO BTC", "/Coin_Info BTC", "/coin_info@Coin_Bot BTC"] {
            let cmd = parse_command(text, "coin_bot").unwrap();
            assert!(matches!(cmd, Command::CoinInfo(ref raw) if raw == "BTC"), "{text}");
        }

        let cmd = parse_command("/COIN_INFO", "Coin_Bot").unwrap();
        assert!(matches!(cmd, Command::CoinInfo(ref raw) if split_args(raw).is_empty()));

        assert!(parse_command("/price btc", "coin_bot").is_none());
        assert!(parse_command("coin_info btc", "coin_bot").is_none());
        assert!(parse_command("/coin_info@other_bot btc", "coin_bot").is_none());
    }

    #[test]
    fn command_menu_lists_coin_info() {
        let commands = Command::bot_commands();
        assert_eq!(commands.len(), 1);
        assert_eq!(commands[0].command.trim_start_matches('/'), "coin_info");
    }

    #[tokio::test]
    async fn errors_become_failure_message() {
        assert_eq!(reply_text(&Echo, &["a", "b"]).await, "a|b");
        assert_eq!(reply_text(&Echo, &["boom"]).await, FAILURE_MESSAGE);
    }
}
