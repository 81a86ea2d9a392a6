//! # LLM client abstraction
//!
//! Defines the [`CompletionClient`] trait and an OpenAI implementation. The trait is infallible:
//! upstream failures come back as [`Completion::Fallback`] so a turn always has something to reply with.

use async_trait::async_trait;

mod config;
mod openai_llm;

pub use config::LlmConfig;
pub use openai_llm::{OpenAICompletionClient, FALLBACK_MESSAGE};

/// Outcome of one completion call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// Text generated by the model.
    Text(String),
    /// User-facing apology used when the upstream call failed.
    Fallback(String),
}

impl Completion {
    /// The text to deliver, whichever variant this is.
    pub fn text(&self) -> &str {
        match self {
            Completion::Text(s) | Completion::Fallback(s) => s,
        }
    }

    pub fn into_text(self) -> String {
        match self {
            Completion::Text(s) | Completion::Fallback(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Completion::Fallback(_))
    }
}

/// Turns a prompt into generated text with a single upstream call. Never fails past this boundary.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Completion;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completion_text_for_both_variants() {
        let ok = Completion::Text("Hello!".to_string());
        let failed = Completion::Fallback("sorry".to_string());

        assert_eq!(ok.text(), "Hello!");
        assert!(!ok.is_fallback());
        assert_eq!(failed.text(), "sorry");
        assert!(failed.is_fallback());
        assert_eq!(failed.into_text(), "sorry");
    }
}
