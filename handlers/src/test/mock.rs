//! Test doubles: a recording [`Bot`] and a scripted [`CompletionClient`].

use async_trait::async_trait;
use chrono::Utc;
use dbot_core::{Bot, Chat, DbotError, Message, OutgoingMessage, Result, User};
use llm_client::{Completion, CompletionClient};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// One recorded outbound call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send { chat_id: i64, message: OutgoingMessage },
    Typing { chat_id: i64 },
}

/// Bot that records every call in order. With `failing()`, every call is recorded and then fails.
#[derive(Default)]
pub struct MockBot {
    calls: Mutex<Vec<Call>>,
    fail: bool,
}

impl MockBot {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<OutgoingMessage> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { message, .. } => Some(message),
                Call::Typing { .. } => None,
            })
            .collect()
    }

    pub fn typing_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Typing { .. }))
            .count()
    }

    fn record(&self, call: Call) -> Result<()> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(DbotError::Bot("mock transport failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Bot for MockBot {
    async fn send(&self, chat: &Chat, message: &OutgoingMessage) -> Result<()> {
        self.record(Call::Send {
            chat_id: chat.id,
            message: message.clone(),
        })
    }

    async fn send_typing(&self, chat: &Chat) -> Result<()> {
        self.record(Call::Typing { chat_id: chat.id })
    }
}

/// Completion client returning a fixed outcome after an optional (tokio-time) delay.
pub struct ScriptedCompletion {
    outcome: Completion,
    delay: Duration,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedCompletion {
    pub fn new(outcome: Completion) -> Arc<Self> {
        Self::delayed(outcome, Duration::ZERO)
    }

    pub fn delayed(outcome: Completion, delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            outcome,
            delay,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionClient for ScriptedCompletion {
    async fn complete(&self, prompt: &str) -> Completion {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.outcome.clone()
    }
}

/// Completion client that panics after a delay, standing in for an unexpected fault.
pub struct PanickingCompletion {
    pub delay: Duration,
}

#[async_trait]
impl CompletionClient for PanickingCompletion {
    async fn complete(&self, _prompt: &str) -> Completion {
        tokio::time::sleep(self.delay).await;
        panic!("completion client blew up");
    }
}

pub fn sample_message(username: Option<&str>, content: &str) -> Message {
    Message {
        id: "42".to_string(),
        user: User {
            id: 1001,
            username: username.map(str::to_string),
            first_name: Some("Test".to_string()),
            last_name: None,
        },
        chat: Chat {
            id: 555,
            chat_type: "private".to_string(),
        },
        content: content.to_string(),
        created_at: Utc::now(),
    }
}
