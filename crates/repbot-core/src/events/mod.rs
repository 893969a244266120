//! Typed records for inbound gateway events
//!
//! The delivery layer converts whatever the chat client hands it into these
//! records, so nothing past the boundary depends on the client's object shapes.

mod actor;
mod command;
mod reaction;

pub use actor::Actor;
pub use command::{CommandInvocation, CommandOptionValue};
pub use reaction::{ReactionEvent, ReactionKind};
