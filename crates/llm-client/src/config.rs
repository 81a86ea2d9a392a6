//! Completion API configuration loaded from environment variables.

use anyhow::{Context, Result};
use openai_client::CompletionParams;
use std::env;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "text-davinci-002";
pub const DEFAULT_MAX_TOKENS: u32 = 1024;
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

/// Credential and model parameters for the completion API. Immutable after load.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl LlmConfig {
    /// Loads from `OPENAI_API_KEY` (required), `OPENAI_BASE_URL`, `OPENAI_MODEL`, `OPENAI_MAX_TOKENS`, `OPENAI_TEMPERATURE`.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url =
            env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let max_tokens = match env::var("OPENAI_MAX_TOKENS") {
            Ok(s) => s
                .trim()
                .parse()
                .with_context(|| format!("OPENAI_MAX_TOKENS is not a valid integer: {}", s))?,
            Err(_) => DEFAULT_MAX_TOKENS,
        };
        let temperature = match env::var("OPENAI_TEMPERATURE") {
            Ok(s) => s
                .trim()
                .parse()
                .with_context(|| format!("OPENAI_TEMPERATURE is not a valid number: {}", s))?,
            Err(_) => DEFAULT_TEMPERATURE,
        };
        Ok(Self {
            openai_api_key,
            openai_base_url,
            model,
            max_tokens,
            temperature,
        })
    }

    /// Per-call parameters derived from this config.
    pub fn params(&self) -> CompletionParams {
        CompletionParams {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}
