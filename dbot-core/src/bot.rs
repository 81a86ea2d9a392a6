//! Bot abstraction for sending messages and chat actions.
//!
//! [`Bot`] is transport-agnostic; dbot-telegram implements it via teloxide, tests substitute a recording mock.

use crate::error::{DbotError, Result};
use crate::types::{Chat, Message};
use async_trait::async_trait;
use tracing::debug;

/// Markup mode applied by the transport when rendering outgoing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextFormat {
    Plain,
    /// Lightweight markup: bold, italic, inline code.
    Markdown,
}

/// An outgoing text message and its delivery options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingMessage {
    pub text: String,
    /// Message id to thread the reply to (same chat).
    pub reply_to: Option<String>,
    pub format: TextFormat,
    pub disable_link_preview: bool,
}

impl OutgoingMessage {
    /// Plain text, not threaded, link previews enabled.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            reply_to: None,
            format: TextFormat::Plain,
            disable_link_preview: false,
        }
    }

    pub fn reply_to(mut self, message_id: impl Into<String>) -> Self {
        self.reply_to = Some(message_id.into());
        self
    }

    pub fn markdown(mut self) -> Self {
        self.format = TextFormat::Markdown;
        self
    }

    pub fn without_link_preview(mut self) -> Self {
        self.disable_link_preview = true;
        self
    }
}

/// Abstraction for talking to a chat. Implementations map to a transport (e.g. Telegram) and must be
/// safe to share across concurrently running turns.
#[async_trait]
pub trait Bot: Send + Sync {
    /// Sends one message to the given chat. Implementations make a single delivery attempt and do not retry.
    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<()>;

    /// Sends a transient "typing" activity signal to the chat.
    async fn send_typing(&self, chat: &Chat) -> Result<()>;

    /// Sends plain text to the given chat.
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.send(chat, &OutgoingMessage::text(text)).await
    }

    /// Replies to `message` in its chat, threaded and rendered as Markdown.
    async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
        let outgoing = OutgoingMessage::text(text).reply_to(&message.id).markdown();
        self.send(&message.chat, &outgoing).await
    }
}

/// Parses a message id string into an i32 (Telegram message ids are 32-bit).
pub fn parse_message_id(s: &str) -> Result<i32> {
    s.parse().map_err(|_| {
        debug!(message_id = %s, "Message id is not a 32-bit integer");
        DbotError::InvalidMessageId(s.to_string())
    })
}
