//! Reaction event - a user adding or removing an emoji on a message

use serde::{Deserialize, Serialize};

use super::Actor;
use crate::value_objects::{EmojiKey, Snowflake};

/// Whether the reaction was added or removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactionKind {
    Added,
    Removed,
}

impl ReactionKind {
    /// +1 for an added reaction, -1 for a removed one
    #[inline]
    pub const fn sign(self) -> i64 {
        match self {
            Self::Added => 1,
            Self::Removed => -1,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
        }
    }
}

/// A reaction on a server message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReactionEvent {
    pub server_id: Snowflake,
    pub channel_id: Snowflake,
    pub message_id: Snowflake,
    /// User who added or removed the reaction
    pub actor: Actor,
    /// Author of the reacted message
    pub target: Actor,
    pub emoji: EmojiKey,
    pub kind: ReactionKind,
}

impl ReactionEvent {
    /// Check whether the reactor reacted to their own message
    #[inline]
    pub fn is_self_reaction(&self) -> bool {
        self.actor.id == self.target.id
    }
}
