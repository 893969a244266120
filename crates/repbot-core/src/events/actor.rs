//! Actor - a user taking part in an event

use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// A user as seen at the time of an event
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: Snowflake,
    pub username: String,
    /// Legacy four-digit discriminator; `None` (or 0) for migrated accounts
    pub discriminator: Option<u16>,
    pub bot: bool,
}

impl Actor {
    /// Create a new non-bot Actor without a discriminator
    pub fn new(id: Snowflake, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            discriminator: None,
            bot: false,
        }
    }

    pub fn with_discriminator(mut self, discriminator: Option<u16>) -> Self {
        self.discriminator = discriminator;
        self
    }

    pub fn with_bot(mut self, bot: bool) -> Self {
        self.bot = bot;
        self
    }

    /// `name#0001` for legacy accounts, the bare username otherwise
    pub fn tag(&self) -> String {
        match self.discriminator {
            Some(d) if d != 0 => format!("{}#{d:04}", self.username),
            _ => self.username.clone(),
        }
    }

    /// Every string an allowed-user entry may match: id, username, tag
    pub fn identities(&self) -> Vec<String> {
        let mut identities = vec![self.id.to_string(), self.username.clone()];
        let tag = self.tag();
        if tag != self.username {
            identities.push(tag);
        }
        identities
    }
}
