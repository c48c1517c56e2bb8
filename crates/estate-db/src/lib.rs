//! # estate-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `estate-core`. It handles:
//!
//! - Connection pool management and migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use estate_db::pool::{create_pool, run_migrations};
//! use estate_db::repositories::PgUserRepository;
//! use estate_core::UserRepository;
//!
//! async fn example(config: &estate_common::DatabaseConfig) -> anyhow::Result<()> {
//!     let pool = create_pool(config).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
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
pub use pool::{create_pool, run_migrations, PgPool};
pub use repositories::{
    PgFavoriteRepository, PgPropertyRepository, PgSessionRepository, PgUserRepository,
};
