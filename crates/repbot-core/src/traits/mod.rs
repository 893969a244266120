//! Repository traits (ports)

mod repositories;

pub use repositories::{RepoResult, RuleRepository, ScoreRepository};
