//! PostgreSQL implementation of RuleRepository

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::instrument;

use repbot_core::entities::{AddAllowedUserOutcome, EmojiScores, ServerRule};
use repbot_core::traits::{RepoResult, RuleRepository};
use repbot_core::value_objects::Snowflake;

use crate::mappers::RuleUpsert;
use crate::models::ServerRuleModel;

use super::error::map_db_error;

/// PostgreSQL implementation of RuleRepository
#[derive(Clone)]
pub struct PgRuleRepository {
    pool: PgPool,
}

impl PgRuleRepository {
    /// Create a new PgRuleRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RuleRepository for PgRuleRepository {
    #[instrument(skip(self))]
    async fn find(&self, server_id: Snowflake) -> RepoResult<Option<ServerRule>> {
        let result = sqlx::query_as::<_, ServerRuleModel>(
            r#"
            SELECT server_id, allowed_users, emoji_scores
            FROM server_rules
            WHERE server_id = $1
            "#,
        )
        .bind(server_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(ServerRule::from))
    }

    #[instrument(skip(self, emoji_scores))]
    async fn upsert(
        &self,
        server_id: Snowflake,
        allowed_users: &[String],
        emoji_scores: &EmojiScores,
    ) -> RepoResult<()> {
        let upsert = RuleUpsert::new(server_id, allowed_users, emoji_scores);

        sqlx::query(
            r#"
            INSERT INTO server_rules (server_id, allowed_users, emoji_scores)
            VALUES ($1, $2, $3)
            ON CONFLICT (server_id) DO UPDATE SET
                allowed_users = ARRAY(
                    SELECT DISTINCT u
                    FROM unnest(server_rules.allowed_users || EXCLUDED.allowed_users) AS u
                ),
                emoji_scores = EXCLUDED.emoji_scores,
                updated_at = NOW()
            "#,
        )
        .bind(upsert.server_id)
        .bind(&upsert.allowed_users)
        .bind(Json(upsert.emoji_scores))
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn add_allowed_user(
        &self,
        server_id: Snowflake,
        user: &str,
    ) -> RepoResult<AddAllowedUserOutcome> {
        let result = sqlx::query(
            r#"
            UPDATE server_rules
            SET allowed_users = CASE
                    WHEN $2 = ANY(allowed_users) THEN allowed_users
                    ELSE array_append(allowed_users, $2)
                END,
                updated_at = NOW()
            WHERE server_id = $1
            "#,
        )
        .bind(server_id.into_inner())
        .bind(user.trim())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            Ok(AddAllowedUserOutcome::NotConfigured)
        } else {
            Ok(AddAllowedUserOutcome::Added)
        }
    }
}
