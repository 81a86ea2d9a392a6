//! Allow-list guard.

use dbot_core::{Bot, Chat, OutgoingMessage, Result};
use std::collections::HashSet;

/// Reply sent to users who are not on the allow-list.
pub const DISALLOWED_MESSAGE: &str = "Sorry, you are not allowed to use this bot. ";

/// Who may use the bot: everyone, or an explicit set of usernames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllowList {
    Everyone,
    Only(HashSet<String>),
}

impl AllowList {
    /// Parses `*` as [`AllowList::Everyone`], otherwise a comma-separated list of usernames.
    /// Blank entries are skipped and a leading `@` is stripped.
    pub fn parse(raw: &str) -> Self {
        if raw.trim() == "*" {
            return AllowList::Everyone;
        }
        let names = raw
            .split(',')
            .map(|s| s.trim().trim_start_matches('@'))
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        AllowList::Only(names)
    }

    pub fn only<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AllowList::Only(names.into_iter().map(Into::into).collect())
    }
}

/// True if `identity` may use the bot. A missing identity is only permitted by the wildcard.
pub fn permitted(identity: Option<&str>, allow_list: &AllowList) -> bool {
    match allow_list {
        AllowList::Everyone => true,
        AllowList::Only(names) => identity.is_some_and(|id| names.contains(id)),
    }
}

/// Sends the disallowed-message reply to `chat`.
pub(crate) async fn send_disallowed_message(bot: &dyn Bot, chat: &Chat) -> Result<()> {
    bot.send(chat, &OutgoingMessage::text(DISALLOWED_MESSAGE).without_link_preview())
        .await
}
