//! PostgreSQL implementation of ScoreRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use repbot_core::entities::{ScoreEvent, ScoreLogEntry, UserScore};
use repbot_core::traits::{RepoResult, ScoreRepository};
use repbot_core::value_objects::Snowflake;

use crate::mappers::ScoreEventInsert;
use crate::models::{ScoreLogModel, UserScoreModel};

use super::error::map_db_error;

/// PostgreSQL implementation of ScoreRepository
#[derive(Clone)]
pub struct PgScoreRepository {
    pool: PgPool,
}

impl PgScoreRepository {
    /// Create a new PgScoreRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ScoreRepository for PgScoreRepository {
    #[instrument(skip(self, event), fields(server_id = %event.server_id, user_id = %event.scored_user_id, delta = event.delta))]
    async fn apply_delta(&self, event: &ScoreEvent) -> RepoResult<UserScore> {
        let insert = ScoreEventInsert::new(event);

        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Increment in place so concurrent reactions on the same user never lose an update
        let row = sqlx::query_as::<_, UserScoreModel>(
            r#"
            INSERT INTO scores (server_id, user_id, username, score)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (server_id, user_id) DO UPDATE SET
                score = scores.score + EXCLUDED.score,
                username = EXCLUDED.username,
                updated_at = NOW()
            RETURNING server_id, user_id, username, score
            "#,
        )
        .bind(insert.server_id)
        .bind(insert.scored_user_id)
        .bind(insert.scored_username)
        .bind(insert.delta)
        .fetch_one(&mut *tx)
        .await
        .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO score_logs (
                server_id, scorer_id, scorer_username,
                scored_user_id, scored_username, emoji, delta, scored_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(insert.server_id)
        .bind(insert.scorer_id)
        .bind(insert.scorer_username)
        .bind(insert.scored_user_id)
        .bind(insert.scored_username)
        .bind(insert.emoji)
        .bind(insert.delta)
        .bind(insert.scored_at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(score = row.score, "Score updated");
        Ok(row.into())
    }

    #[instrument(skip(self))]
    async fn top(&self, server_id: Snowflake, count: i64) -> RepoResult<Vec<UserScore>> {
        let rows = sqlx::query_as::<_, UserScoreModel>(
            r#"
            SELECT server_id, user_id, username, score
            FROM scores
            WHERE server_id = $1
            ORDER BY score DESC, user_id ASC
            LIMIT $2
            "#,
        )
        .bind(server_id.into_inner())
        .bind(count)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(UserScore::from).collect())
    }

    #[instrument(skip(self))]
    async fn all(&self, server_id: Snowflake) -> RepoResult<Vec<UserScore>> {
        let rows = sqlx::query_as::<_, UserScoreModel>(
            r#"
            SELECT server_id, user_id, username, score
            FROM scores
            WHERE server_id = $1
            ORDER BY score DESC, user_id ASC
            "#,
        )
        .bind(server_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(UserScore::from).collect())
    }

    #[instrument(skip(self))]
    async fn logs_in_range(
        &self,
        server_id: Snowflake,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> RepoResult<Vec<ScoreLogEntry>> {
        let rows = sqlx::query_as::<_, ScoreLogModel>(
            r#"
            SELECT id, server_id, scorer_id, scorer_username,
                   scored_user_id, scored_username, emoji, delta, scored_at
            FROM score_logs
            WHERE server_id = $1 AND scored_at BETWEEN $2 AND $3
            ORDER BY scored_at ASC, id ASC
            "#,
        )
        .bind(server_id.into_inner())
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(rows.into_iter().map(ScoreLogEntry::from).collect())
    }
}
