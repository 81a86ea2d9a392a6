//! Command handler for `/start`, `/reset` and `/help`. Stateless; responses are fixed text.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, OutgoingMessage, Result};
use std::sync::Arc;
use teloxide::utils::command::BotCommands;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument};

use crate::access::{permitted, send_disallowed_message, AllowList};

pub const START_TEXT: &str = "Ask me everything.😎";
pub const RESET_TEXT: &str = "Done!👌";
pub const HELP_TEXT: &str = "/start - Start the bot\n\
/reset - Reset conversation\n\
/help - Help menu\n\n\
Open source at https://github.com/genleel/telegram_bot";

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "Reset conversation")]
    Reset,
    #[command(description = "Help menu")]
    Help,
}

impl Command {
    /// Parses the command word of `text` (arguments are ignored), case-insensitively.
    /// `bot_username` lets `/start@name` match in groups.
    pub fn from_text(text: &str, bot_username: &str) -> Option<Self> {
        let head = text.split_whitespace().next()?;
        if !head.starts_with('/') {
            return None;
        }
        Command::parse(&head.to_lowercase(), &bot_username.to_lowercase()).ok()
    }
}

/// Handles bot commands. Messages that are not one of [`Command`] are ignored.
#[derive(Clone)]
pub struct CommandHandler {
    bot: Arc<dyn Bot>,
    allow_list: Arc<AllowList>,
    /// Filled in at startup from `get_me`; empty until then.
    bot_username: Arc<RwLock<Option<String>>>,
}

impl CommandHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        allow_list: Arc<AllowList>,
        bot_username: Arc<RwLock<Option<String>>>,
    ) -> Self {
        Self {
            bot,
            allow_list,
            bot_username,
        }
    }

    /// Runs a guarded command: disallowed users get the disallowed message instead of `text`.
    async fn reply_if_allowed(
        &self,
        message: &Message,
        command: &Command,
        text: &str,
    ) -> Result<HandlerResponse> {
        if !permitted(message.username(), &self.allow_list) {
            info!(
                username = %message.username().unwrap_or("unknown"),
                command = ?command,
                "User is not allowed to run command"
            );
            send_disallowed_message(self.bot.as_ref(), &message.chat).await?;
            return Ok(HandlerResponse::Stop);
        }
        self.bot.send_message(&message.chat, text).await?;
        Ok(HandlerResponse::Reply(text.to_string()))
    }
}

#[async_trait]
impl Handler for CommandHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let bot_username = self.bot_username.read().await.clone().unwrap_or_default();
        let Some(command) = Command::from_text(&message.content, &bot_username) else {
            return Ok(HandlerResponse::Ignore);
        };
        debug!(command = ?command, "Command received");

        match command {
            Command::Start => {
                let response = self.reply_if_allowed(message, &command, START_TEXT).await?;
                if matches!(response, HandlerResponse::Reply(_)) {
                    info!("Bot started");
                }
                Ok(response)
            }
            Command::Reset => {
                let response = self.reply_if_allowed(message, &command, RESET_TEXT).await?;
                if matches!(response, HandlerResponse::Reply(_)) {
                    info!("Resetting the conversation (no state is kept)");
                }
                Ok(response)
            }
            Command::Help => {
                let mut help = OutgoingMessage::text(HELP_TEXT).without_link_preview();
                // Outside private chats help is threaded to the asking message.
                if message.chat.chat_type != "private" {
                    help = help.reply_to(&message.id);
                }
                self.bot.send(&message.chat, &help).await?;
                Ok(HandlerResponse::Reply(HELP_TEXT.to_string()))
            }
        }
    }
}
