//! Minimal transport config: token, Bot API URL override, log file path.
//! Loaded from BOT_TOKEN, TELEGRAM_API_URL (or TELOXIDE_API_URL), LOG_FILE.

use anyhow::{Context, Result};
use std::env;

pub const DEFAULT_LOG_FILE: &str = "logs/relay-bot.log";

/// Telegram connectivity and logging settings.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: String,
}

impl TelegramConfig {
    /// Loads from the environment. `token` overrides BOT_TOKEN; one of them is required.
    pub fn from_env(token: Option<String>) -> Result<Self> {
        let bot_token = match token {
            Some(t) => t,
            None => env::var("BOT_TOKEN").context("BOT_TOKEN not set")?,
        };
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").unwrap_or_else(|_| DEFAULT_LOG_FILE.to_string());
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
        })
    }

    /// Uses the given token; everything else defaults.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: DEFAULT_LOG_FILE.to_string(),
        }
    }

    /// Builds the teloxide Bot, pointing it at `telegram_api_url` when set.
    pub fn build_bot(&self) -> Result<teloxide::Bot> {
        let bot = teloxide::Bot::new(self.bot_token.clone());
        match &self.telegram_api_url {
            Some(url) => {
                let url = reqwest::Url::parse(url)
                    .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", url))?;
                Ok(bot.set_api_url(url))
            }
            None => Ok(bot),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        for key in ["BOT_TOKEN", "TELEGRAM_API_URL", "TELOXIDE_API_URL", "LOG_FILE"] {
            env::remove_var(key);
        }
    }

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert_eq!(config.log_file, DEFAULT_LOG_FILE);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_token_and_overrides() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");
        env::set_var("TELOXIDE_API_URL", "http://127.0.0.1:8081");
        env::set_var("LOG_FILE", "/tmp/bot.log");

        let config = TelegramConfig::from_env(None).unwrap();

        assert_eq!(config.bot_token, "env_token");
        assert_eq!(config.telegram_api_url.as_deref(), Some("http://127.0.0.1:8081"));
        assert_eq!(config.log_file, "/tmp/bot.log");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_cli_token_overrides_env() {
        clear_env();
        env::set_var("BOT_TOKEN", "env_token");

        let config = TelegramConfig::from_env(Some("cli_token".to_string())).unwrap();

        assert_eq!(config.bot_token, "cli_token");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_missing_token_is_an_error() {
        clear_env();
        assert!(TelegramConfig::from_env(None).is_err());
    }

    #[test]
    fn test_build_bot_rejects_invalid_api_url() {
        let mut config = TelegramConfig::with_token("123:abc".to_string());
        config.telegram_api_url = Some("not a url".to_string());
        assert!(config.build_bot().is_err());

        config.telegram_api_url = Some("http://localhost:8081".to_string());
        assert!(config.build_bot().is_ok());
    }
}
