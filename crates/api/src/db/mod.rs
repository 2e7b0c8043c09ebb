//! Persistence for customers and credits.
//!
//! # Stores
//!
//! Services talk to storage through two traits, [`CustomerStore`] and
//! [`CreditStore`]. Two implementations exist:
//!
//! - [`PgStore`] - `PostgreSQL` via sqlx, used in production
//! - [`MemoryStore`] - in-process maps, used by tests and `CREDIT_STORE=memory`
//!
//! # Tables
//!
//! - `customer` - customers, unique index `idx_customer_cpf` on the tax id
//! - `credit` - credits, unique index `idx_credit_code`; `customer_id` has no
//!   foreign key, so deleting a customer leaves its credits in place
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p credit-application-cli -- migrate
//! ```

mod credits;
mod customers;
pub mod memory;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use credit_application_core::{CreditCode, CustomerId};

use crate::models::{Credit, Customer};

pub use memory::MemoryStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique cpf).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// Storage for customers.
#[async_trait]
pub trait CustomerStore: Send + Sync {
    /// Insert a customer without an id, or overwrite the mutable fields of an
    /// existing one. Returns the stored record.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the tax id is already taken.
    /// Returns `RepositoryError::NotFound` if the customer has an id that does
    /// not exist.
    async fn save(&self, customer: Customer) -> Result<Customer, RepositoryError>;

    /// Get a customer by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the lookup fails.
    async fn get(&self, id: CustomerId) -> Result<Option<Customer>, RepositoryError>;

    /// Delete a customer. Credits referencing it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    async fn delete(&self, customer: &Customer) -> Result<(), RepositoryError>;

    /// Check that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the store cannot be reached.
    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

/// Storage for credits.
#[async_trait]
pub trait CreditStore: Send + Sync {
    /// Insert a new credit and return it with its id assigned.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if the credit code already exists.
    async fn create(&self, credit: Credit) -> Result<Credit, RepositoryError>;

    /// List the credits of a customer in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn list_by_customer(&self, customer_id: CustomerId)
    -> Result<Vec<Credit>, RepositoryError>;

    /// Get a credit by its public code.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    async fn get_by_code(&self, code: CreditCode) -> Result<Option<Credit>, RepositoryError>;
}

/// `PostgreSQL` implementation of both stores.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool.
    #[must_use]
    pub const fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Create a `PostgreSQL` connection pool.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
/// * `max_connections` - Upper bound on pooled connections
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(
    database_url: &secrecy::SecretString,
    max_connections: u32,
) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .min_connections(1)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
