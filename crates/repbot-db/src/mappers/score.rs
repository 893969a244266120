//! Score entity <-> model mappers

use chrono::{DateTime, Utc};
use repbot_core::entities::{ScoreEvent, ScoreLogEntry, UserScore};
use repbot_core::value_objects::Snowflake;

use crate::models::{ScoreLogModel, UserScoreModel};

/// Convert UserScoreModel to UserScore entity
impl From<UserScoreModel> for UserScore {
    fn from(model: UserScoreModel) -> Self {
        UserScore {
            server_id: Snowflake::new(model.server_id),
            user_id: Snowflake::new(model.user_id),
            username: model.username,
            score: model.score,
        }
    }
}

/// Convert ScoreLogModel to ScoreLogEntry entity
impl From<ScoreLogModel> for ScoreLogEntry {
    fn from(model: ScoreLogModel) -> Self {
        ScoreLogEntry {
            id: model.id,
            server_id: Snowflake::new(model.server_id),
            scorer_id: Snowflake::new(model.scorer_id),
            scorer_username: model.scorer_username,
            scored_user_id: Snowflake::new(model.scored_user_id),
            scored_username: model.scored_username,
            emoji: model.emoji,
            delta: model.delta,
            timestamp: model.scored_at,
        }
    }
}

/// Convert ScoreEvent reference to values for database insertion
pub struct ScoreEventInsert<'a> {
    pub server_id: i64,
    pub scorer_id: i64,
    pub scorer_username: &'a str,
    pub scored_user_id: i64,
    pub scored_username: &'a str,
    pub emoji: &'a str,
    pub delta: i64,
    pub scored_at: DateTime<Utc>,
}

impl<'a> ScoreEventInsert<'a> {
    pub fn new(event: &'a ScoreEvent) -> Self {
        Self {
            server_id: event.server_id.into_inner(),
            scorer_id: event.scorer_id.into_inner(),
            scorer_username: &event.scorer_username,
            scored_user_id: event.scored_user_id.into_inner(),
            scored_username: &event.scored_username,
            emoji: &event.emoji,
            delta: event.delta,
            scored_at: event.timestamp,
        }
    }
}
