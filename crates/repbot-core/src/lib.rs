//! # repbot-core
//!
//! Domain layer containing entities, value objects, repository traits, and the
//! typed records that gateway events are converted into.
//! This crate has zero dependencies on infrastructure (database, Discord client, etc.).

pub mod entities;
pub mod error;
pub mod events;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{AddAllowedUserOutcome, EmojiScores, ScoreEvent, ScoreLogEntry, ServerRule, UserScore};
pub use error::DomainError;
pub use events::{Actor, CommandInvocation, CommandOptionValue, ReactionEvent, ReactionKind};
pub use traits::{RepoResult, RuleRepository, ScoreRepository};
pub use value_objects::{EmojiKey, Snowflake, SnowflakeParseError};
