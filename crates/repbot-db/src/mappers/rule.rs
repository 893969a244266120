//! Server rule entity <-> model mapper

use std::collections::BTreeSet;

use repbot_core::entities::{EmojiScores, ServerRule};
use repbot_core::value_objects::Snowflake;

use crate::models::ServerRuleModel;

/// Convert ServerRuleModel to ServerRule entity
impl From<ServerRuleModel> for ServerRule {
    fn from(model: ServerRuleModel) -> Self {
        ServerRule {
            server_id: Snowflake::new(model.server_id),
            allowed_users: model.allowed_users.into_iter().collect(),
            emoji_scores: model.emoji_scores.0,
        }
    }
}

/// Values for inserting or merging a server rule
pub struct RuleUpsert<'a> {
    pub server_id: i64,
    /// Deduplicated, empty entries dropped
    pub allowed_users: Vec<String>,
    pub emoji_scores: &'a EmojiScores,
}

impl<'a> RuleUpsert<'a> {
    pub fn new(server_id: Snowflake, allowed_users: &[String], emoji_scores: &'a EmojiScores) -> Self {
        let allowed_users: BTreeSet<&str> = allowed_users
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect();

        Self {
            server_id: server_id.into_inner(),
            allowed_users: allowed_users.into_iter().map(String::from).collect(),
            emoji_scores,
        }
    }
}
