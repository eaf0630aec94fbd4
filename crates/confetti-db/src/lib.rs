//! # confetti-db
//!
//! Database layer implementing the `confetti-core` repository traits with PostgreSQL via SQLx.
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Model → entity mappers
//! - Repository implementations
//!
//! ```rust,ignore
//! use confetti_db::{create_pool, run_migrations, DatabaseConfig, PgChannelRepository};
//!
//! let pool = create_pool(&DatabaseConfig::from_env()).await?;
//! run_migrations(&pool, "crates/confetti-db/migrations").await?;
//! let channels = PgChannelRepository::new(pool);
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, create_pool_from_env, run_migrations, DatabaseConfig, PgPool};
pub use repositories::{
    PgChannelRepository, PgMembershipRepository, PgPostRepository, PgUserRepository,
};
