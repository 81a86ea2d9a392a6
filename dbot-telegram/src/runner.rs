//! REPL runner: converts teloxide text messages to core::Message and hands each one to the HandlerChain
//! on its own task, so a slow turn never blocks other chats or commands.

use anyhow::Result;
use dbot_core::ToCoreMessage;
use handler_chain::HandlerChain;
use teloxide::{prelude::*, types::BotCommand};
use tracing::{error, info, instrument, warn};

use super::adapters::TelegramMessageWrapper;

/// Calls get_me() and stores the bot's username, so commands addressed as `/cmd@botname` parse in groups.
/// Failure is logged; commands without a suffix still work.
pub async fn resolve_bot_username(
    bot: &teloxide::Bot,
    bot_username: &tokio::sync::RwLock<Option<String>>,
) {
    match bot.get_me().await {
        Ok(me) => {
            if let Some(username) = &me.user.username {
                *bot_username.write().await = Some(username.clone());
                info!(username = %username, "Bot username resolved");
            }
        }
        Err(e) => warn!(error = %e, "get_me failed; bot username unknown"),
    }
}

/// Publishes the command list shown in Telegram's command menu. Best-effort.
pub async fn register_commands(bot: &teloxide::Bot, commands: Vec<BotCommand>) {
    if let Err(e) = bot.set_my_commands(commands).await {
        warn!(error = %e, "Failed to register bot commands");
    }
}

/// Starts the REPL with the given teloxide Bot and HandlerChain. Runs until the process is stopped.
///
/// Non-text messages are skipped. Each text message runs the chain on a spawned task; chain errors
/// are logged and never reach the REPL.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    let chain = handler_chain;
    teloxide::repl(bot, move |_bot: Bot, msg: teloxide::types::Message| {
        let chain = chain.clone();

        async move {
            if msg.text().is_none() {
                info!(chat_id = msg.chat.id.0, "Skipping non-text message");
                return respond(());
            }

            let core_msg = TelegramMessageWrapper(&msg).to_core();
            info!(
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                message_id = %core_msg.id,
                "Received message"
            );

            tokio::spawn(async move {
                if let Err(e) = chain.handle(&core_msg).await {
                    error!(
                        error = %e,
                        user_id = core_msg.user.id,
                        chat_id = core_msg.chat.id,
                        "Handler chain failed"
                    );
                }
            });

            respond(())
        }
    })
    .await;

    Ok(())
}
