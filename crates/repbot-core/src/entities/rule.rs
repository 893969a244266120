//! Server rule entity - who may award points, and what each emoji is worth

use std::collections::{BTreeMap, BTreeSet};

use crate::events::Actor;
use crate::value_objects::{EmojiKey, Snowflake};

/// Emoji key (as typed by an administrator) to signed point delta
pub type EmojiScores = BTreeMap<String, i64>;

/// Per-server scoring configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerRule {
    pub server_id: Snowflake,
    /// Usernames, tags or user ids allowed to award points
    pub allowed_users: BTreeSet<String>,
    pub emoji_scores: EmojiScores,
}

impl ServerRule {
    /// Create a new ServerRule
    pub fn new(
        server_id: Snowflake,
        allowed_users: impl IntoIterator<Item = String>,
        emoji_scores: EmojiScores,
    ) -> Self {
        Self {
            server_id,
            allowed_users: allowed_users.into_iter().collect(),
            emoji_scores,
        }
    }

    /// Apply a `configure` call to an existing rule: allowed users are
    /// unioned, emoji scores are replaced wholesale.
    pub fn merge(&mut self, allowed_users: impl IntoIterator<Item = String>, emoji_scores: EmojiScores) {
        self.allowed_users.extend(allowed_users);
        self.emoji_scores = emoji_scores;
    }

    /// Check whether an actor is on the allowed list, by id, username or tag
    pub fn allows(&self, actor: &Actor) -> bool {
        actor
            .identities()
            .iter()
            .any(|identity| self.allowed_users.contains(identity))
    }

    /// Look up the delta configured for an emoji.
    ///
    /// A configured delta of `0` is returned as `Some(0)`.
    pub fn delta_for(&self, emoji: &EmojiKey) -> Option<i64> {
        emoji
            .lookup_keys()
            .iter()
            .find_map(|key| self.emoji_scores.get(key).copied())
    }
}

/// Result of adding a user to a server's allowed list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddAllowedUserOutcome {
    /// The user is now on the list (including when they already were)
    Added,
    /// No rule exists for the server; nothing was created
    NotConfigured,
}

impl AddAllowedUserOutcome {
    /// User-facing message for this outcome
    pub fn message(self) -> &'static str {
        match self {
            Self::Added => "User was added to the allowed users list.",
            Self::NotConfigured => {
                "Server rules are not set up. Use `/configure` command to set up rules first."
            }
        }
    }

    #[inline]
    pub fn is_added(self) -> bool {
        matches!(self, Self::Added)
    }
}
