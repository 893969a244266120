//! Entity to model mappers
//!
//! This module provides conversions between domain entities (repbot-core) and database models.
//! - `From<Model> for Entity`: Convert database rows to domain objects
//! - `*Insert` structs: Prepare entity data for database operations

mod rule;
mod score;

pub use rule::RuleUpsert;
pub use score::ScoreEventInsert;
