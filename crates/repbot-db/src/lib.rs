//! # repbot-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for the repository traits
//! defined in `repbot-core`. It handles:
//!
//! - Connection pool management and schema bootstrap
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use repbot_db::{create_pool, run_migrations, DatabaseConfig, PgScoreRepository};
//! use repbot_core::ScoreRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig {
//!         url: "postgres://localhost/repbot".to_string(),
//!         ..Default::default()
//!     };
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let score_repo = PgScoreRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{PgRuleRepository, PgScoreRepository};
