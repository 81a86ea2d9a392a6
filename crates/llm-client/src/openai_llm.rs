//! OpenAI implementation of [`CompletionClient`]: wraps openai-client and absorbs every failure into a fallback reply.

use async_trait::async_trait;
use openai_client::{CompletionParams, OpenAIClient};
use tracing::{error, info, instrument};

use super::{Completion, CompletionClient, LlmConfig};

/// Reply sent to the user when the upstream call fails.
pub const FALLBACK_MESSAGE: &str =
    "I'm having some trouble talking to you, please try again later.";

/// [`CompletionClient`] backed by the OpenAI completions endpoint.
#[derive(Clone)]
pub struct OpenAICompletionClient {
    client: OpenAIClient,
    params: CompletionParams,
}

impl OpenAICompletionClient {
    pub fn new(client: OpenAIClient, params: CompletionParams) -> Self {
        Self { client, params }
    }

    /// Builds the client from config, honoring a custom base URL.
    pub fn from_config(config: &LlmConfig) -> Self {
        let client = OpenAIClient::with_base_url(
            config.openai_api_key.clone(),
            config.openai_base_url.clone(),
        );
        Self::new(client, config.params())
    }

    /// Logs error and its cause chain. First item with `first_msg`, rest with "Caused by".
    fn log_error_chain(e: &anyhow::Error, first_msg: &str) {
        for (i, cause) in e.chain().enumerate() {
            if i == 0 {
                error!(cause = %cause, "{}", first_msg);
            } else {
                error!(cause = %cause, "Caused by");
            }
        }
    }
}

#[async_trait]
impl CompletionClient for OpenAICompletionClient {
    #[instrument(skip(self, prompt), fields(model = %self.params.model))]
    async fn complete(&self, prompt: &str) -> Completion {
        match self.client.completion(prompt, &self.params).await {
            Ok(text) => {
                info!(reply_len = text.len(), "Completion received");
                Completion::Text(text)
            }
            Err(e) => {
                Self::log_error_chain(&e, "Error while getting the completion");
                Completion::Fallback(FALLBACK_MESSAGE.to_string())
            }
        }
    }
}
