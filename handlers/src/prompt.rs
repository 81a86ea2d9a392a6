//! Prompt handler: relays a plain-text message to the completion client and replies with the result.

use async_trait::async_trait;
use dbot_core::{Bot, Handler, HandlerResponse, Message, Result};
use llm_client::CompletionClient;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, instrument};

use crate::access::{permitted, send_disallowed_message, AllowList};
use crate::typing::TypingNotifier;

/// Handles one turn for a non-command text message:
/// guard check, typing notifier, one completion call, notifier cancelled, one threaded reply.
///
/// **External interactions:** [`Bot`] (typing action, reply), [`CompletionClient`] (upstream call).
#[derive(Clone)]
pub struct PromptHandler {
    bot: Arc<dyn Bot>,
    completion: Arc<dyn CompletionClient>,
    allow_list: Arc<AllowList>,
    typing_interval: Duration,
}

impl PromptHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        completion: Arc<dyn CompletionClient>,
        allow_list: Arc<AllowList>,
        typing_interval: Duration,
    ) -> Self {
        Self {
            bot,
            completion,
            allow_list,
            typing_interval,
        }
    }
}

#[async_trait]
impl Handler for PromptHandler {
    #[instrument(skip(self, message), fields(user_id = message.user.id, chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        if message.content.starts_with('/') {
            return Ok(HandlerResponse::Ignore);
        }

        let username = message.username().unwrap_or("unknown");
        if !permitted(message.username(), &self.allow_list) {
            info!(username = %username, "User is not allowed to use the bot");
            send_disallowed_message(self.bot.as_ref(), &message.chat).await?;
            return Ok(HandlerResponse::Stop);
        }

        info!(username = %username, message_id = %message.id, "New message received");

        let typing = TypingNotifier::start(
            self.bot.clone(),
            message.chat.clone(),
            self.typing_interval,
        );
        let completion = self.completion.complete(&message.content).await;
        typing.cancel().await;

        if completion.is_fallback() {
            info!(message_id = %message.id, "Replying with fallback message");
        }

        let reply = completion.into_text();
        match self.bot.reply_to(message, &reply).await {
            Ok(()) => {
                info!(message_id = %message.id, reply_len = reply.len(), "Reply sent");
                Ok(HandlerResponse::Reply(reply))
            }
            Err(e) => {
                error!(error = %e, message_id = %message.id, "Failed to send reply");
                Ok(HandlerResponse::Stop)
            }
        }
    }
}
