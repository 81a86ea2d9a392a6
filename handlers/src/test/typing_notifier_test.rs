//! Tests for [`TypingNotifier`] timing and cancellation.

use dbot_core::{Bot, Chat};
use std::sync::Arc;
use std::time::Duration;

use super::mock::MockBot;
use crate::TypingNotifier;

const INTERVAL: Duration = Duration::from_secs(2);

fn chat() -> Chat {
    Chat {
        id: 555,
        chat_type: "private".to_string(),
    }
}

#[tokio::test(start_paused = true)]
async fn emits_at_most_one_signal_per_interval_and_none_after_cancel() {
    let bot = MockBot::new();
    let notifier = TypingNotifier::start(bot.clone() as Arc<dyn Bot>, chat(), INTERVAL);

    // Just short of the third interval boundary: signals at t=0, 2 and 4.
    tokio::time::sleep(INTERVAL * 3 - Duration::from_millis(1)).await;
    notifier.cancel().await;

    let emitted = bot.typing_count();
    assert_eq!(emitted, 3);

    tokio::time::sleep(INTERVAL * 10).await;
    assert_eq!(bot.typing_count(), emitted);
}

#[tokio::test(start_paused = true)]
async fn cancel_on_the_third_interval_boundary_emits_at_most_three() {
    let bot = MockBot::new();
    let notifier = TypingNotifier::start(bot.clone() as Arc<dyn Bot>, chat(), INTERVAL);

    tokio::time::sleep(INTERVAL * 3).await;
    notifier.cancel().await;

    let emitted = bot.typing_count();
    assert!(emitted <= 3, "emitted {} signals", emitted);

    tokio::time::sleep(INTERVAL * 10).await;
    assert_eq!(bot.typing_count(), emitted);
}

#[tokio::test(start_paused = true)]
async fn cancel_takes_effect_without_waiting_for_the_interval() {
    let bot = MockBot::new();
    let notifier = TypingNotifier::start(bot.clone() as Arc<dyn Bot>, chat(), Duration::from_secs(3600));

    tokio::task::yield_now().await;
    let started = tokio::time::Instant::now();
    notifier.cancel().await;

    assert!(started.elapsed() < Duration::from_secs(1));
    assert!(bot.typing_count() <= 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_handle_stops_the_notifier() {
    let bot = MockBot::new();
    let notifier = TypingNotifier::start(bot.clone() as Arc<dyn Bot>, chat(), INTERVAL);

    tokio::time::sleep(INTERVAL / 2).await;
    drop(notifier);
    let emitted = bot.typing_count();
    assert_eq!(emitted, 1);

    tokio::time::sleep(INTERVAL * 5).await;
    assert_eq!(bot.typing_count(), emitted);
}

#[tokio::test(start_paused = true)]
async fn send_failures_do_not_stop_the_notifier() {
    let bot = MockBot::failing();
    let notifier = TypingNotifier::start(bot.clone() as Arc<dyn Bot>, chat(), INTERVAL);

    tokio::time::sleep(INTERVAL * 2 + Duration::from_millis(1)).await;
    notifier.cancel().await;

    assert_eq!(bot.typing_count(), 3);
}
