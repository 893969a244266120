//! Score database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for scores table
#[derive(Debug, Clone, FromRow)]
pub struct UserScoreModel {
    pub server_id: i64,
    pub user_id: i64,
    pub username: String,
    pub score: i64,
}

/// Database model for score_logs table
#[derive(Debug, Clone, FromRow)]
pub struct ScoreLogModel {
    pub id: i64,
    pub server_id: i64,
    pub scorer_id: i64,
    pub scorer_username: String,
    pub scored_user_id: i64,
    pub scored_username: String,
    pub emoji: String,
    pub delta: i64,
    pub scored_at: DateTime<Utc>,
}
