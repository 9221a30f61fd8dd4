//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Connections come from a `bb8` pool through `diesel-async`; schema changes
//! ship as embedded Diesel migrations.
//!
//! - **Thin adapters**: the repository only translates between Diesel rows
//!   and domain types.
//! - **Internal models**: row structs (`models.rs`) and table definitions
//!   (`schema.rs`) never leave this module.
//!
//! # Example
//!
//! ```no_run
//! use user_service::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), user_service::outbound::persistence::PoolError> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/users")).await?;
//! let _repository = DieselUserRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
