//! In-memory repositories
//!
//! Same contracts as the PostgreSQL repositories, backed by maps behind a
//! `parking_lot::Mutex`.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use repbot_core::entities::{
    AddAllowedUserOutcome, EmojiScores, ScoreEvent, ScoreLogEntry, ServerRule, UserScore,
};
use repbot_core::error::DomainError;
use repbot_core::traits::{RepoResult, RuleRepository, ScoreRepository};
use repbot_core::value_objects::Snowflake;

// ============================================================================
// Rules
// ============================================================================

#[derive(Default)]
pub struct InMemoryRuleRepository {
    rules: Mutex<HashMap<Snowflake, ServerRule>>,
}

impl InMemoryRuleRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a server's rule
    pub fn get(&self, server_id: Snowflake) -> Option<ServerRule> {
        self.rules.lock().get(&server_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.rules.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.lock().is_empty()
    }
}

#[async_trait]
impl RuleRepository for InMemoryRuleRepository {
    async fn find(&self, server_id: Snowflake) -> RepoResult<Option<ServerRule>> {
        Ok(self.get(server_id))
    }

    async fn upsert(
        &self,
        server_id: Snowflake,
        allowed_users: &[String],
        emoji_scores: &EmojiScores,
    ) -> RepoResult<()> {
        let users = allowed_users
            .iter()
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty());

        let mut rules = self.rules.lock();
        match rules.get_mut(&server_id) {
            Some(rule) => rule.merge(users, emoji_scores.clone()),
            None => {
                rules.insert(server_id, ServerRule::new(server_id, users, emoji_scores.clone()));
            }
        }
        Ok(())
    }

    async fn add_allowed_user(
        &self,
        server_id: Snowflake,
        user: &str,
    ) -> RepoResult<AddAllowedUserOutcome> {
        let mut rules = self.rules.lock();
        let Some(rule) = rules.get_mut(&server_id) else {
            return Ok(AddAllowedUserOutcome::NotConfigured);
        };
        rule.allowed_users.insert(user.trim().to_string());
        Ok(AddAllowedUserOutcome::Added)
    }
}

// ============================================================================
// Scores
// ============================================================================

#[derive(Default)]
struct ScoreState {
    scores: HashMap<(Snowflake, Snowflake), UserScore>,
    logs: Vec<ScoreLogEntry>,
}

#[derive(Default)]
pub struct InMemoryScoreRepository {
    state: Mutex<ScoreState>,
    unavailable: AtomicBool,
}

impl InMemoryScoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every call fail as if the database were down
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Snapshot of one user's score
    pub fn score_of(&self, server_id: Snowflake, user_id: Snowflake) -> Option<i64> {
        self.state
            .lock()
            .scores
            .get(&(server_id, user_id))
            .map(|s| s.score)
    }

    /// Snapshot of every log entry, oldest first
    pub fn logs(&self) -> Vec<ScoreLogEntry> {
        self.state.lock().logs.clone()
    }

    fn check_available(&self) -> RepoResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(DomainError::DatabaseError("connection refused".to_string()));
        }
        Ok(())
    }

    fn sorted(&self, server_id: Snowflake) -> Vec<UserScore> {
        let mut scores: Vec<UserScore> = self
            .state
            .lock()
            .scores
            .values()
            .filter(|s| s.server_id == server_id)
            .cloned()
            .collect();
        scores.sort_by(|a, b| b.score.cmp(&a.score).then(a.user_id.cmp(&b.user_id)));
        scores
    }
}

#[async_trait]
impl ScoreRepository for InMemoryScoreRepository {
    async fn apply_delta(&self, event: &ScoreEvent) -> RepoResult<UserScore> {
        self.check_available()?;

        let mut state = self.state.lock();
        let key = (event.server_id, event.scored_user_id);
        let current = state.scores.get(&key).map_or(0, |s| s.score);
        // Same failure PostgreSQL reports for BIGINT overflow
        let score = current
            .checked_add(event.delta)
            .ok_or_else(|| DomainError::DatabaseError("bigint out of range".to_string()))?;
        let updated = {
            let entry = state.scores.entry(key).or_insert_with(|| {
                UserScore::new(event.server_id, event.scored_user_id, "", 0)
            });
            entry.score = score;
            entry.username.clone_from(&event.scored_username);
            entry.clone()
        };

        let id = state.logs.len() as i64 + 1;
        state.logs.push(event.clone().into_log_entry(id));
        Ok(updated)
    }

    async fn top(&self, server_id: Snowflake, count: i64) -> RepoResult<Vec<UserScore>> {
        self.check_available()?;
        let mut scores = self.sorted(server_id);
        scores.truncate(usize::try_from(count).unwrap_or(0));
        Ok(scores)
    }

    async fn all(&self, server_id: Snowflake) -> RepoResult<Vec<UserScore>> {
        self.check_available()?;
        Ok(self.sorted(server_id))
    }

    async fn logs_in_range(
        &self,
        server_id: Snowflake,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<Vec<ScoreLogEntry>> {
        self.check_available()?;
        let mut logs: Vec<ScoreLogEntry> = self
            .state
            .lock()
            .logs
            .iter()
            .filter(|log| log.server_id == server_id && log.is_within(start, end))
            .cloned()
            .collect();
        logs.sort_by_key(|log| (log.timestamp, log.id));
        Ok(logs)
    }
}
