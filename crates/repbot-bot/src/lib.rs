//! # repbot-bot
//!
//! Connects the service layer to Discord: converts gateway events into typed
//! records, registers slash commands, and serves an optional liveness endpoint.

pub mod commands;
pub mod convert;
pub mod error;
pub mod handler;
pub mod liveness;
pub mod server;

pub use error::{BotError, BotResult};
pub use handler::Handler;
pub use server::run;
