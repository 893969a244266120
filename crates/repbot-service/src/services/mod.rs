//! Business logic services
//!
//! Services borrow a [`ServiceContext`] for the duration of one event and are
//! cheap to construct.

pub mod context;
pub mod dispatcher;
pub mod error;
pub mod leaderboard;
pub mod resolver;
pub mod scoring;

pub use context::{ServiceContext, ServiceContextBuilder};
pub use dispatcher::CommandDispatcher;
pub use error::{ServiceError, ServiceResult};
pub use resolver::{Authorization, RuleResolver};
pub use scoring::{ScoreOutcome, ScoringEngine};
