//! Command invocation - a slash command as delivered by the gateway

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::Actor;
use crate::value_objects::Snowflake;

/// Value of a single command option
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandOptionValue {
    Integer(i64),
    Boolean(bool),
    String(String),
}

/// An application command invoked by a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandInvocation {
    pub name: String,
    /// `None` when invoked outside a server (direct message)
    pub server_id: Option<Snowflake>,
    /// Owner of the server the command was invoked in, when known
    pub server_owner_id: Option<Snowflake>,
    pub actor: Actor,
    #[serde(default)]
    pub options: BTreeMap<String, CommandOptionValue>,
}

impl CommandInvocation {
    /// Create a new invocation with no options
    pub fn new(name: impl Into<String>, server_id: Option<Snowflake>, actor: Actor) -> Self {
        Self {
            name: name.into(),
            server_id,
            server_owner_id: None,
            actor,
            options: BTreeMap::new(),
        }
    }

    pub fn with_owner(mut self, owner_id: Option<Snowflake>) -> Self {
        self.server_owner_id = owner_id;
        self
    }

    pub fn with_option(mut self, name: impl Into<String>, value: CommandOptionValue) -> Self {
        self.options.insert(name.into(), value);
        self
    }

    /// Get an integer option
    pub fn integer(&self, name: &str) -> Option<i64> {
        match self.options.get(name)? {
            CommandOptionValue::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// Get a string option
    pub fn string(&self, name: &str) -> Option<&str> {
        match self.options.get(name)? {
            CommandOptionValue::String(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Check if the invoking user owns the server
    pub fn is_server_owner(&self) -> bool {
        self.server_owner_id == Some(self.actor.id)
    }
}
