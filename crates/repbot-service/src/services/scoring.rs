//! Scoring engine
//!
//! Turns reaction events into score changes.

use tracing::{debug, info, instrument};

use repbot_core::entities::ScoreEvent;
use repbot_core::events::ReactionEvent;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::resolver::{Authorization, RuleResolver};

/// What happened to a reaction event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreOutcome {
    /// The signed delta was applied; `score` is the new total
    Applied { delta: i64, score: i64 },
    RulesNotConfigured,
    NotAuthorized,
    UnrecognizedEmoji,
}

impl ScoreOutcome {
    #[inline]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied { .. })
    }
}

/// Scoring engine
pub struct ScoringEngine<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ScoringEngine<'a> {
    /// Create a new ScoringEngine
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Score a reaction added to or removed from a message.
    ///
    /// Removals subtract the emoji's current value, which differs from the
    /// value at the time of the original reaction if the rule changed since.
    #[instrument(
        skip(self, event),
        fields(
            server_id = %event.server_id,
            reactor = %event.actor.tag(),
            emoji = %event.emoji,
            kind = event.kind.as_str(),
        )
    )]
    pub async fn score_reaction(&self, event: &ReactionEvent) -> ServiceResult<ScoreOutcome> {
        let resolver = RuleResolver::new(self.ctx);

        let rule = match resolver.authorize(event.server_id, &event.actor).await? {
            Authorization::Granted(rule) => rule,
            Authorization::RulesNotConfigured => {
                info!("Reaction ignored: server rules are not configured");
                return Ok(ScoreOutcome::RulesNotConfigured);
            }
            Authorization::Denied => {
                debug!("Reaction ignored: reactor is not an allowed user");
                return Ok(ScoreOutcome::NotAuthorized);
            }
        };

        let Some(value) = resolver.resolve_emoji_delta(&rule, &event.emoji) else {
            debug!("Reaction ignored: emoji has no score");
            return Ok(ScoreOutcome::UnrecognizedEmoji);
        };

        let delta = value
            .checked_mul(event.kind.sign())
            .ok_or_else(|| ServiceError::internal(format!("emoji score {value} cannot be negated")))?;
        let score_event = ScoreEvent::new(
            event.server_id,
            &event.actor,
            &event.target,
            event.emoji.to_string(),
            delta,
        );
        let updated = self.ctx.score_repo().apply_delta(&score_event).await?;

        info!(
            user_id = %updated.user_id,
            username = %updated.username,
            delta,
            score = updated.score,
            "Score updated"
        );

        Ok(ScoreOutcome::Applied {
            delta,
            score: updated.score,
        })
    }
}
