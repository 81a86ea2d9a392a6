//! # Handlers for the relay bot
//!
//! Allow-list guard, typing notifier, the prompt (completion relay) handler and the command handler.

mod access;
mod commands;
mod prompt;
mod typing;

#[cfg(test)]
mod test;

pub use access::{permitted, AllowList, DISALLOWED_MESSAGE};
pub use commands::{Command, CommandHandler, HELP_TEXT, RESET_TEXT, START_TEXT};
pub use prompt::PromptHandler;
pub use typing::{TypingNotifier, DEFAULT_TYPING_INTERVAL};
