//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the repository ports backed by PostgreSQL via
//! `diesel-async` and `bb8` connection pooling.
//!
//! - **Thin adapters**: repositories only translate between row structs and
//!   domain records. Ownership predicates are expressed in SQL so that the
//!   check and the write happen in one statement.
//! - **Internal models**: row structs (`models.rs`) and the schema
//!   (`schema.rs`) never leave this module.
//! - **Strongly typed errors**: Diesel and pool failures are mapped onto the
//!   port error enums; raw database messages are only logged.
//!
//! # Example
//!
//! ```ignore
//! use worklog::outbound::persistence::{DbPool, DieselUserRepository, PoolConfig};
//!
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/worklog")).await?;
//! let users = DieselUserRepository::new(pool);
//! ```

mod diesel_basic_error_mapping;
mod diesel_department_repository;
mod diesel_job_repository;
mod diesel_user_repository;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_department_repository::DieselDepartmentRepository;
pub use diesel_job_repository::DieselJobRepository;
pub use diesel_user_repository::DieselUserRepository;
pub use migrations::{MigrationError, apply_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
