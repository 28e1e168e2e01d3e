//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL through `diesel-async` and a `bb8` connection pool.
//!
//! - Row structs (`models.rs`) and table definitions (`schema.rs`) stay
//!   private to this module; adapters translate them into domain types.
//! - Database errors are mapped to the port's error enum before leaving the
//!   adapter.
//!
//! # Example
//!
//! ```no_run
//! use person_api::outbound::persistence::{
//!     DbPool, DieselPersonRepository, PoolConfig, run_migrations,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let url = "postgres://localhost/people";
//! run_migrations(url).await?;
//! let pool = DbPool::new(PoolConfig::new(url)).await?;
//! let _repo = DieselPersonRepository::new(pool);
//! # Ok(())
//! # }
//! ```

mod diesel_person_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_person_repository::DieselPersonRepository;
pub use migrations::{MIGRATIONS, MigrationError, run_migrations, run_migrations_blocking};
pub use pool::{DbPool, PoolConfig, PoolError};
