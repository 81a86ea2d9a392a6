//! Wiring: builds the Telegram adapter, completion client and handler chain, then runs the REPL.

use anyhow::Result;
use dbot_core::{init_tracing, Bot};
use dbot_telegram::{register_commands, resolve_bot_username, run_repl, TelegramBotAdapter};
use handler_chain::HandlerChain;
use handlers::{AllowList, Command, CommandHandler, PromptHandler};
use llm_client::{CompletionClient, OpenAICompletionClient};
use openai_client::mask_token;
use std::sync::Arc;
use std::time::Duration;
use teloxide::utils::command::BotCommands;
use tokio::sync::RwLock;
use tracing::{info, instrument};

use super::config::BotConfig;

/// Chain used for every incoming text message: commands first, then the prompt relay.
pub fn build_handler_chain(
    bot: Arc<dyn Bot>,
    completion: Arc<dyn CompletionClient>,
    allow_list: Arc<AllowList>,
    typing_interval: Duration,
    bot_username: Arc<RwLock<Option<String>>>,
) -> HandlerChain {
    HandlerChain::new()
        .add_handler(Arc::new(CommandHandler::new(
            bot.clone(),
            allow_list.clone(),
            bot_username,
        )))
        .add_handler(Arc::new(PromptHandler::new(
            bot,
            completion,
            allow_list,
            typing_interval,
        )))
}

fn describe_allow_list(allow_list: &AllowList) -> String {
    match allow_list {
        AllowList::Everyone => "*".to_string(),
        AllowList::Only(names) => format!("{} username(s)", names.len()),
    }
}

/// Main entry: init logging, build components, then run the REPL until the process is stopped.
#[instrument(skip(config))]
pub async fn run_bot(config: BotConfig) -> Result<()> {
    init_tracing(&config.telegram.log_file)?;

    info!(
        model = %config.llm.model,
        max_tokens = config.llm.max_tokens,
        temperature = config.llm.temperature,
        openai_base_url = %config.llm.openai_base_url,
        openai_api_key = %mask_token(&config.llm.openai_api_key),
        bot_token = %mask_token(&config.telegram.bot_token),
        allow_list = %describe_allow_list(&config.allow_list),
        typing_interval_ms = config.typing_interval.as_millis() as u64,
        "Initializing bot"
    );

    let teloxide_bot = config.telegram.build_bot()?;
    let bot: Arc<dyn Bot> = Arc::new(TelegramBotAdapter::new(teloxide_bot.clone()));
    let completion: Arc<dyn CompletionClient> =
        Arc::new(OpenAICompletionClient::from_config(&config.llm));

    let bot_username = Arc::new(RwLock::new(None));
    resolve_bot_username(&teloxide_bot, &bot_username).await;
    register_commands(&teloxide_bot, Command::bot_commands()).await;

    let handler_chain = build_handler_chain(
        bot,
        completion,
        Arc::new(config.allow_list),
        config.typing_interval,
        bot_username,
    );

    info!("Bot started successfully");
    run_repl(teloxide_bot, handler_chain).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_allow_list_does_not_list_names() {
        assert_eq!(describe_allow_list(&AllowList::Everyone), "*");
        assert_eq!(
            describe_allow_list(&AllowList::only(["alice", "bob"])),
            "2 username(s)"
        );
    }
}
