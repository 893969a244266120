//! Score entities - running totals and the append-only scoring log

use chrono::{DateTime, Utc};

use crate::events::Actor;
use crate::value_objects::Snowflake;

/// Running score of one user in one server
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserScore {
    pub server_id: Snowflake,
    pub user_id: Snowflake,
    /// Display label at the time of the last scoring event
    pub username: String,
    pub score: i64,
}

impl UserScore {
    /// Create a new UserScore
    pub fn new(server_id: Snowflake, user_id: Snowflake, username: impl Into<String>, score: i64) -> Self {
        Self {
            server_id,
            user_id,
            username: username.into(),
            score,
        }
    }
}

/// A single scoring event, ready to be applied to the score store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreEvent {
    pub server_id: Snowflake,
    pub scorer_id: Snowflake,
    pub scorer_username: String,
    pub scored_user_id: Snowflake,
    pub scored_username: String,
    /// Emoji that triggered the event, in its display form
    pub emoji: String,
    /// Signed delta (already negated for reaction removals)
    pub delta: i64,
    pub timestamp: DateTime<Utc>,
}

impl ScoreEvent {
    /// Create a new ScoreEvent stamped with the current time
    pub fn new(server_id: Snowflake, scorer: &Actor, scored: &Actor, emoji: impl Into<String>, delta: i64) -> Self {
        Self {
            server_id,
            scorer_id: scorer.id,
            scorer_username: scorer.tag(),
            scored_user_id: scored.id,
            scored_username: scored.tag(),
            emoji: emoji.into(),
            delta,
            timestamp: Utc::now(),
        }
    }

    /// Override the event timestamp
    pub fn at(mut self, timestamp: DateTime<Utc>) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Turn this event into the log entry the store records for it
    pub fn into_log_entry(self, id: i64) -> ScoreLogEntry {
        ScoreLogEntry {
            id,
            server_id: self.server_id,
            scorer_id: self.scorer_id,
            scorer_username: self.scorer_username,
            scored_user_id: self.scored_user_id,
            scored_username: self.scored_username,
            emoji: self.emoji,
            delta: self.delta,
            timestamp: self.timestamp,
        }
    }
}

/// Persisted scoring log entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreLogEntry {
    pub id: i64,
    pub server_id: Snowflake,
    pub scorer_id: Snowflake,
    pub scorer_username: String,
    pub scored_user_id: Snowflake,
    pub scored_username: String,
    pub emoji: String,
    pub delta: i64,
    pub timestamp: DateTime<Utc>,
}

impl ScoreLogEntry {
    /// Check whether the entry falls in `[start, end]`
    #[inline]
    pub fn is_within(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        self.timestamp >= start && self.timestamp <= end
    }
}
