//! Wraps teloxide::Bot and implements [`dbot_core::Bot`]. Production code talks to Telegram; tests substitute another Bot impl.

use async_trait::async_trait;
use dbot_core::{parse_message_id, Bot as CoreBot, Chat, DbotError, OutgoingMessage, Result, TextFormat};
use teloxide::{
    prelude::*,
    types::{ChatAction, ChatId, LinkPreviewOptions, MessageId, ParseMode, ReplyParameters},
    ApiError, RequestError,
};
use tracing::warn;

/// Thin wrapper around teloxide::Bot that implements dbot-core's Bot trait.
/// Cloning is cheap; one adapter is shared by every turn.
#[derive(Clone)]
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }

    async fn send_with_format(
        &self,
        chat_id: ChatId,
        message: &OutgoingMessage,
        reply_to: Option<MessageId>,
        format: TextFormat,
    ) -> std::result::Result<(), RequestError> {
        let mut request = self.bot.send_message(chat_id, message.text.clone());
        if let Some(id) = reply_to {
            request = request.reply_parameters(ReplyParameters::new(id));
        }
        if format == TextFormat::Markdown {
            request = request.parse_mode(ParseMode::Markdown);
        }
        if message.disable_link_preview {
            request = request.link_preview_options(disabled_link_preview());
        }
        request.await?;
        Ok(())
    }
}

fn disabled_link_preview() -> LinkPreviewOptions {
    LinkPreviewOptions {
        is_disabled: true,
        url: None,
        prefer_small_media: false,
        prefer_large_media: false,
        show_above_text: false,
    }
}

/// True when Telegram rejected the text because its markup could not be parsed.
fn is_markup_error(e: &RequestError) -> bool {
    matches!(e, RequestError::Api(ApiError::CantParseEntities(_)))
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    /// Markdown text that Telegram cannot parse is delivered once more as plain text; any other failure is returned as is.
    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<()> {
        let chat_id = ChatId(chat.id);
        let reply_to = message
            .reply_to
            .as_deref()
            .map(parse_message_id)
            .transpose()?
            .map(MessageId);

        match self
            .send_with_format(chat_id, message, reply_to, message.format)
            .await
        {
            Ok(()) => Ok(()),
            Err(e) if message.format == TextFormat::Markdown && is_markup_error(&e) => {
                warn!(chat_id = chat.id, error = %e, "Markdown rejected, sending plain text");
                self.send_with_format(chat_id, message, reply_to, TextFormat::Plain)
                    .await
                    .map_err(|e| DbotError::Bot(e.to_string()))
            }
            Err(e) => Err(DbotError::Bot(e.to_string())),
        }
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.bot
            .send_chat_action(ChatId(chat.id), ChatAction::Typing)
            .await
            .map_err(|e| DbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
