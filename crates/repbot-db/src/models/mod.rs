//! Database models - SQLx-compatible structs for PostgreSQL tables

mod rule;
mod score;

pub use rule::ServerRuleModel;
pub use score::{ScoreLogModel, UserScoreModel};
