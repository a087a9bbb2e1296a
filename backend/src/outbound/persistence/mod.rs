//! PostgreSQL persistence for ebook records using Diesel.
//!
//! Row types and the table definition stay private to this module; callers
//! only see [`DieselEbookRepository`] through the domain port, plus the pool
//! and migration entry points needed to wire it up.
//!
//! ```ignore
//! use ebooks::outbound::persistence::{DbPool, DieselEbookRepository, PoolConfig};
//!
//! run_pending_migrations(&url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let repo = DieselEbookRepository::new(pool);
//! ```

mod diesel_ebook_repository;
mod diesel_error_mapping;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_ebook_repository::DieselEbookRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
