//! # repbot-service
//!
//! Application layer: authorizes actors against server rules, turns reactions
//! into score changes, and answers slash commands.

pub mod dto;
pub mod services;

pub use dto::{CommandName, CommandReply, CommandSpec, OptionKind, OptionSpec, ReplyAttachment, COMMANDS};
pub use services::{
    Authorization, CommandDispatcher, RuleResolver, ScoreOutcome, ScoringEngine, ServiceContext,
    ServiceContextBuilder, ServiceError, ServiceResult,
};
