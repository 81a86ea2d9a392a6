//! Typing notifier: keeps a chat's "typing" indicator alive while a turn is waiting on the completion call.

use dbot_core::{Bot, Chat};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_TYPING_INTERVAL: Duration = Duration::from_secs(2);

/// Handle to a running notifier task. Owned by exactly one turn.
///
/// Dropping the handle cancels the task, so a turn that unwinds early still stops the notifier.
/// Call [`TypingNotifier::cancel`] on the normal path to also wait until the task has exited.
pub struct TypingNotifier {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl TypingNotifier {
    /// Spawns a task that signals "typing" to `chat` immediately and then every `interval` until cancelled.
    pub fn start(bot: Arc<dyn Bot>, chat: Chat, interval: Duration) -> Self {
        let token = CancellationToken::new();
        let task_token = token.clone();

        let task = tokio::spawn(async move {
            while !task_token.is_cancelled() {
                if let Err(e) = bot.send_typing(&chat).await {
                    debug!(chat_id = chat.id, error = %e, "Failed to send typing action");
                }
                tokio::select! {
                    biased;
                    _ = task_token.cancelled() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            debug!(chat_id = chat.id, "Typing notifier stopped");
        });

        Self {
            token,
            task: Some(task),
        }
    }

    /// Cancels the notifier and waits for its task to finish. No signal is sent after this returns.
    pub async fn cancel(mut self) {
        self.token.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                warn!(error = %e, "Typing notifier task ended abnormally");
            }
        }
    }
}

impl Drop for TypingNotifier {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
