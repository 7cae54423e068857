//! Message Handler module for processing incoming Telegram messages

use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use tracing::{debug, info, Instrument};

use super::formatter::Formatter;
use crate::errors::error_logging;
use crate::observability;

const HELP_TEXT: &str = "Send /format followed by text to get it back formatted.\n\n\
Supported markup: **bold**, __italic__, ~~strike~~, --underline--, `code`, ```pre```, \
[label](https://link) and %%%one%%%two%%% random choices.\n\n\
/entities shows the spans that would be sent.";

/// Commands understood by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BotCommand<'a> {
    Start,
    Help,
    Format(&'a str),
    Entities(&'a str),
}

/// Parse a command message. The command may carry a `@botname` suffix.
pub fn parse_command(text: &str) -> Option<BotCommand<'_>> {
    let text = text.trim_start();
    if !text.starts_with('/') {
        return None;
    }

    let token_end = text.find(char::is_whitespace).unwrap_or(text.len());
    let (token, body) = text.split_at(token_end);
    let name = token[1..].split('@').next().unwrap_or_default();
    let body = body.trim_start();

    match name.to_lowercase().as_str() {
        "start" => Some(BotCommand::Start),
        "help" => Some(BotCommand::Help),
        "format" => Some(BotCommand::Format(body)),
        "entities" => Some(BotCommand::Entities(body)),
        _ => None,
    }
}

async fn send_reply(bot: &Bot, msg: &Message, command: &str, text: String) -> Result<()> {
    if let Err(e) = bot.send_message(msg.chat.id, text).await {
        error_logging::log_telegram_error(&e, command, Some(msg.chat.id.0));
        observability::record_reply_failure(command);
        return Err(e.into());
    }
    Ok(())
}

async fn handle_format_command(
    bot: &Bot,
    msg: &Message,
    body: &str,
    formatter: &Formatter,
) -> Result<()> {
    if body.trim().is_empty() {
        return send_reply(bot, msg, "format", "Usage: /format <text>".to_string()).await;
    }

    let formatted = formatter.format(body);
    if formatted.text.is_empty() {
        return send_reply(
            bot,
            msg,
            "format",
            "Nothing is left after formatting.".to_string(),
        )
        .await;
    }

    info!(
        chat_id = %msg.chat.id,
        spans = formatted.spans.len(),
        "Sending formatted reply"
    );

    let entities = formatted.entities();
    if let Err(e) = bot
        .send_message(msg.chat.id, formatted.text)
        .entities(entities)
        .await
    {
        error_logging::log_telegram_error(&e, "format", Some(msg.chat.id.0));
        observability::record_reply_failure("format");
        return Err(e.into());
    }
    Ok(())
}

async fn handle_entities_command(
    bot: &Bot,
    msg: &Message,
    body: &str,
    formatter: &Formatter,
) -> Result<()> {
    if body.trim().is_empty() {
        return send_reply(bot, msg, "entities", "Usage: /entities <text>".to_string()).await;
    }

    let formatted = formatter.format(body);
    let json = formatted.spans_json()?;
    send_reply(bot, msg, "entities", format!("{}\n\n{}", formatted.text, json)).await
}

pub async fn message_handler(bot: Bot, msg: Message, formatter: Arc<Formatter>) -> Result<()> {
    let span = observability::telegram_span(
        "message_handler",
        msg.from.as_ref().map(|u| u.id.0 as i64),
    );

    async move {
        let Some(text) = msg.text() else {
            observability::record_telegram_message("unsupported");
            debug!(chat_id = %msg.chat.id, "Ignoring non-text message");
            return Ok(());
        };
        observability::record_telegram_message("text");

        match parse_command(text) {
            Some(BotCommand::Start) | Some(BotCommand::Help) => {
                send_reply(&bot, &msg, "help", HELP_TEXT.to_string()).await
            }
            Some(BotCommand::Format(body)) => {
                handle_format_command(&bot, &msg, body, &formatter).await
            }
            Some(BotCommand::Entities(body)) => {
                handle_entities_command(&bot, &msg, body, &formatter).await
            }
            None => {
                debug!(chat_id = %msg.chat.id, "Ignoring message without a known command");
                Ok(())
            }
        }
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_command("/start"), Some(BotCommand::Start));
        assert_eq!(parse_command("/help@sophie_bot"), Some(BotCommand::Help));
        assert_eq!(
            parse_command("/format **hi**"),
            Some(BotCommand::Format("**hi**"))
        );
        assert_eq!(
            parse_command("/FORMAT@sophie_bot\n# Title\nbody"),
            Some(BotCommand::Format("# Title\nbody"))
        );
        assert_eq!(parse_command("/entities"), Some(BotCommand::Entities("")));
    }

    #[test]
    fn test_non_commands_ignored() {
        assert_eq!(parse_command("hello"), None);
        assert_eq!(parse_command("/unknown text"), None);
        assert_eq!(parse_command(""), None);
    }
}
