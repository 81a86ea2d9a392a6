//! # OpenAI API client
//!
//! Thin wrapper around [async-openai] for the text completion endpoint.
//! The API key lives in the client instance; model parameters are passed per call.
//! Provides token masking for safe logging.

use async_openai::{types::CreateCompletionRequestArgs, Client};
use std::sync::Arc;

/// Masks an API key/token for safe logging: shows first 7 chars + "***" + last 4 chars.
/// If length <= 11, returns "***" to avoid leaking any part of the key.
pub fn mask_token(token: &str) -> String {
    let len = token.len();
    if len <= 11 || !token.is_char_boundary(7) || !token.is_char_boundary(len - 4) {
        "***".to_string()
    } else {
        format!("{}***{}", &token[..7], &token[len - 4..])
    }
}

/// Per-call completion parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionParams {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// OpenAI completion client. Wraps async-openai client; holds the API key only for masked logging.
#[derive(Clone)]
pub struct OpenAIClient {
    client: Arc<Client<async_openai::config::OpenAIConfig>>,
    api_key_for_logging: String,
}

impl OpenAIClient {
    /// Builds a client using the given API key and default API base URL.
    pub fn new(api_key: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new().with_api_key(api_key.clone());
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Builds a client with a custom base URL (proxies, compatible endpoints, mock servers).
    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        let config = async_openai::config::OpenAIConfig::new()
            .with_api_key(api_key.clone())
            .with_api_base(base_url);
        Self {
            client: Arc::new(Client::with_config(config)),
            api_key_for_logging: api_key,
        }
    }

    /// Sends one completion request and returns the first choice's text.
    ///
    /// Errors on transport failure, upstream error payloads, and responses with no choices.
    pub async fn completion(
        &self,
        prompt: &str,
        params: &CompletionParams,
    ) -> anyhow::Result<String> {
        tracing::info!(
            model = %params.model,
            max_tokens = params.max_tokens,
            temperature = params.temperature,
            prompt_len = prompt.len(),
            api_key = %mask_token(&self.api_key_for_logging),
            "OpenAI completion request"
        );

        let request = CreateCompletionRequestArgs::default()
            .model(params.model.as_str())
            .prompt(prompt)
            .max_tokens(params.max_tokens)
            .temperature(params.temperature)
            .build()?;

        if let Ok(json) = serde_json::to_string(&request) {
            tracing::debug!(request_json = %json, "OpenAI completion request JSON");
        }

        let response = self.client.completions().create(request).await?;

        if let Some(ref u) = response.usage {
            tracing::info!(
                prompt_tokens = u.prompt_tokens,
                completion_tokens = u.completion_tokens,
                total_tokens = u.total_tokens,
                "OpenAI completion usage"
            );
        }

        match response.choices.into_iter().next() {
            Some(choice) => Ok(choice.text),
            None => anyhow::bail!("No choices in completion response"),
        }
    }
}
