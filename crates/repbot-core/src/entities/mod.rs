//! Domain entities - core business objects

mod rule;
mod score;

pub use rule::{AddAllowedUserOutcome, EmojiScores, ServerRule};
pub use score::{ScoreEvent, ScoreLogEntry, UserScore};
