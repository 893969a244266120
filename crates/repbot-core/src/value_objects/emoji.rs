//! Emoji key - the emoji a reaction was made with

use std::fmt;

use serde::{Deserialize, Serialize};

use super::Snowflake;

/// An emoji as delivered by a reaction event
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EmojiKey {
    /// Standard unicode emoji, e.g. "👍"
    Unicode(String),
    /// Server-specific custom emoji
    Custom {
        id: Snowflake,
        name: Option<String>,
        animated: bool,
    },
}

impl EmojiKey {
    /// Create a unicode emoji key
    pub fn unicode(symbol: impl Into<String>) -> Self {
        Self::Unicode(symbol.into())
    }

    /// Every spelling an administrator may have used for this emoji in
    /// `emoji_scores`, most specific first.
    ///
    /// Custom emoji can be typed as their mention (`<:name:id>` or
    /// `<a:name:id>`) or as the bare name.
    pub fn lookup_keys(&self) -> Vec<String> {
        match self {
            Self::Unicode(symbol) => vec![symbol.clone()],
            Self::Custom { id, name, animated } => {
                let name = name.as_deref().unwrap_or_default();
                let mut keys = vec![format!("<:{name}:{id}>")];
                if *animated {
                    keys.insert(0, format!("<a:{name}:{id}>"));
                }
                if !name.is_empty() {
                    keys.push(name.to_string());
                }
                keys
            }
        }
    }
}

impl fmt::Display for EmojiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unicode(symbol) => f.write_str(symbol),
            Self::Custom { id, name, animated } => {
                let prefix = if *animated { "a" } else { "" };
                write!(f, "<{prefix}:{}:{id}>", name.as_deref().unwrap_or_default())
            }
        }
    }
}
