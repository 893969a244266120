//! Data transfer objects for slash commands
//!
//! This module provides:
//! - The command schema shared by registration and dispatch
//! - Parsers for command option text
//! - Reply types handed back to the gateway adapter

pub mod commands;
pub mod parsing;
pub mod replies;

pub use commands::{CommandName, CommandSpec, OptionKind, OptionSpec, COMMANDS, MAX_TOP_COUNT};
pub use parsing::{parse_allowed_users, parse_date_range, parse_emoji_scores};
pub use replies::{CommandReply, ReplyAttachment};
