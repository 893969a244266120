//! Rule resolver
//!
//! Decides whether an actor may award points or run privileged commands in a
//! server, and what an emoji is worth there.

use tracing::{debug, instrument};

use repbot_core::entities::ServerRule;
use repbot_core::events::Actor;
use repbot_core::value_objects::{EmojiKey, Snowflake};

use super::context::ServiceContext;
use super::error::ServiceResult;

/// Result of checking an actor against a server's rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Authorization {
    /// The actor is on the allowed list
    Granted(ServerRule),
    /// The server has no rule yet
    RulesNotConfigured,
    /// A rule exists but the actor is not on it
    Denied,
}

impl Authorization {
    #[inline]
    pub fn is_granted(&self) -> bool {
        matches!(self, Self::Granted(_))
    }
}

/// Rule resolver
pub struct RuleResolver<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> RuleResolver<'a> {
    /// Create a new RuleResolver
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Check an actor against the server's allowed users
    #[instrument(skip(self, actor), fields(user = %actor.tag()))]
    pub async fn authorize(&self, server_id: Snowflake, actor: &Actor) -> ServiceResult<Authorization> {
        let Some(rule) = self.ctx.rule_repo().find(server_id).await? else {
            debug!("No rule configured");
            return Ok(Authorization::RulesNotConfigured);
        };

        if rule.allows(actor) {
            Ok(Authorization::Granted(rule))
        } else {
            debug!("Actor is not an allowed user");
            Ok(Authorization::Denied)
        }
    }

    /// Delta configured for an emoji; `None` when the emoji is not scored
    pub fn resolve_emoji_delta(&self, rule: &ServerRule, emoji: &EmojiKey) -> Option<i64> {
        rule.delta_for(emoji)
    }
}
