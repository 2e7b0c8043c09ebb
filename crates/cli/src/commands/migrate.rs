//! Database migration command.
//!
//! # Usage
//!
//! ```bash
//! ca-cli migrate
//! ca-cli migrate --database-url postgres://localhost/credit
//! ```
//!
//! # Environment Variables
//!
//! - `CREDIT_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`); overridden by `--database-url`
//!
//! # Migration Files
//!
//! Migrations live in `crates/api/migrations/` and are embedded at build
//! time.

use secrecy::{ExposeSecret, SecretString};
use sqlx::PgPool;

/// Errors that can occur while migrating.
#[derive(Debug, thiserror::Error)]
pub enum MigrationError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

/// Resolve the database URL from the flag or the environment.
fn database_url(flag: Option<String>) -> Result<SecretString, MigrationError> {
    flag.or_else(|| std::env::var("CREDIT_DATABASE_URL").ok())
        .or_else(|| std::env::var("DATABASE_URL").ok())
        .map(SecretString::from)
        .ok_or(MigrationError::MissingEnvVar("CREDIT_DATABASE_URL"))
}

/// Run the credit application database migrations.
///
/// # Errors
///
/// Returns `MigrationError` if no database URL is configured, the database
/// is unreachable, or a migration fails.
pub async fn run(database_url_flag: Option<String>) -> Result<(), MigrationError> {
    let _ = dotenvy::dotenv();
    let database_url = database_url(database_url_flag)?;

    tracing::info!("Connecting to credit database...");
    let pool = PgPool::connect(database_url.expose_secret()).await?;

    let migrator = sqlx::migrate!("../api/migrations");
    tracing::info!(
        migrations = migrator.iter().count(),
        "Running credit migrations..."
    );
    migrator.run(&pool).await?;

    tracing::info!("Credit migrations complete!");
    Ok(())
}
