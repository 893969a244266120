//! Repository traits (ports) - define the interface for data access
//!
//! These traits follow the Repository pattern from Domain-Driven Design.
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{AddAllowedUserOutcome, EmojiScores, ScoreEvent, ScoreLogEntry, ServerRule, UserScore};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// Rule Repository
// ============================================================================

#[async_trait]
pub trait RuleRepository: Send + Sync {
    /// Find the rule for a server
    async fn find(&self, server_id: Snowflake) -> RepoResult<Option<ServerRule>>;

    /// Create the server's rule, or merge into the existing one.
    ///
    /// Allowed users are unioned with the stored set; emoji scores replace
    /// the stored mapping.
    async fn upsert(
        &self,
        server_id: Snowflake,
        allowed_users: &[String],
        emoji_scores: &EmojiScores,
    ) -> RepoResult<()>;

    /// Add one user to an existing rule. Never creates a rule.
    async fn add_allowed_user(
        &self,
        server_id: Snowflake,
        user: &str,
    ) -> RepoResult<AddAllowedUserOutcome>;
}

// ============================================================================
// Score Repository
// ============================================================================

#[async_trait]
pub trait ScoreRepository: Send + Sync {
    /// Atomically add the event's delta to the scored user's running total
    /// (creating the row at `delta` when absent) and append the log entry.
    ///
    /// Returns the updated score row.
    async fn apply_delta(&self, event: &ScoreEvent) -> RepoResult<UserScore>;

    /// Highest scores in a server, descending. Order among equal scores is
    /// implementation-defined.
    async fn top(&self, server_id: Snowflake, count: i64) -> RepoResult<Vec<UserScore>>;

    /// Every score in a server, descending
    async fn all(&self, server_id: Snowflake) -> RepoResult<Vec<UserScore>>;

    /// Log entries with `start <= timestamp <= end`, oldest first
    async fn logs_in_range(
        &self,
        server_id: Snowflake,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<Vec<ScoreLogEntry>>;
}
