//! Value objects - immutable domain primitives

mod emoji;
mod snowflake;

pub use emoji::EmojiKey;
pub use snowflake::{Snowflake, SnowflakeParseError};
