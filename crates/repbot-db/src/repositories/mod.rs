//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in repbot-core.

mod error;
mod rule;
mod score;

pub use rule::PgRuleRepository;
pub use score::PgScoreRepository;
