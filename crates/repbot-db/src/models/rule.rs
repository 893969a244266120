//! Server rule database model

use std::collections::BTreeMap;

use sqlx::types::Json;
use sqlx::FromRow;

/// Database model for server_rules table
#[derive(Debug, Clone, FromRow)]
pub struct ServerRuleModel {
    pub server_id: i64,
    pub allowed_users: Vec<String>,
    pub emoji_scores: Json<BTreeMap<String, i64>>,
}
