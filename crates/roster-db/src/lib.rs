//! # roster-db
//!
//! Storage layer implementing the repository traits of `roster-core`.
//!
//! ## Overview
//!
//! - Connection pool management and runtime migrations
//! - Database models with SQLx `FromRow` derives
//! - Model to entity mappers
//! - PostgreSQL repository implementations
//! - [`InMemoryStore`], a single-process store with the same semantics
//!
//! ## Usage
//!
//! ```rust,ignore
//! use roster_db::{create_pool, run_migrations, DatabaseConfig, PgVoteRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::default()).await?;
//!     run_migrations(&pool).await?;
//!     let votes = PgVoteRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod models;
pub mod pool;
pub mod repositories;

pub use memory::InMemoryStore;
pub use pool::{create_pool, run_migrations, DatabaseConfig, PgPool, MIGRATIONS_DIR};
pub use repositories::{
    PgCelebrityRepository, PgDailyStatRepository, PgSearchRepository, PgTagRepository,
    PgVoteRepository,
};
