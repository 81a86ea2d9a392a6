//! Application config: Telegram transport, completion API, allow-list, typing interval.
//! Loaded once from the environment at startup and never mutated.

use anyhow::{Context, Result};
use dbot_telegram::TelegramConfig;
use handlers::{AllowList, DEFAULT_TYPING_INTERVAL};
use llm_client::LlmConfig;
use std::env;
use std::time::Duration;

pub struct BotConfig {
    pub telegram: TelegramConfig,
    pub llm: LlmConfig,
    /// From `ALLOWED_TELEGRAM_USERNAMES`: `*` (default) or comma-separated usernames.
    pub allow_list: AllowList,
    /// From `TYPING_INTERVAL_SECS` (default 2).
    pub typing_interval: Duration,
}

impl BotConfig {
    /// Loads the full config. `token`, when given, overrides BOT_TOKEN.
    pub fn load(token: Option<String>) -> Result<Self> {
        let telegram = TelegramConfig::from_env(token)?;
        let llm = LlmConfig::from_env()?;
        let allow_list = AllowList::parse(
            &env::var("ALLOWED_TELEGRAM_USERNAMES").unwrap_or_else(|_| "*".to_string()),
        );
        let typing_interval = match env::var("TYPING_INTERVAL_SECS") {
            Ok(s) => parse_interval(&s)?,
            Err(_) => DEFAULT_TYPING_INTERVAL,
        };
        Ok(Self {
            telegram,
            llm,
            allow_list,
            typing_interval,
        })
    }
}

fn parse_interval(raw: &str) -> Result<Duration> {
    let secs: f64 = raw
        .trim()
        .parse()
        .with_context(|| format!("TYPING_INTERVAL_SECS is not a number: {}", raw))?;
    if !secs.is_finite() || secs <= 0.0 {
        anyhow::bail!("TYPING_INTERVAL_SECS must be positive, got {}", raw);
    }
    Ok(Duration::from_secs_f64(secs))
}
