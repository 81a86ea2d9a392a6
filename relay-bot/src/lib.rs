//! # relay_bot
//!
//! Telegram bot that relays each text message to a completion API and replies with the result.
//! **Public API:** [`BotConfig`], [`Cli`], [`build_handler_chain`], [`run_bot`].

pub mod cli;
pub mod config;
pub mod runner;

pub use cli::{Cli, Commands};
pub use config::BotConfig;
pub use runner::{build_handler_chain, run_bot};
