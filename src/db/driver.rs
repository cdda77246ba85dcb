//! Database drivers.
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "pg")]
pub mod pg;
#[cfg(feature = "sqlite")]
pub mod sqlite;

use std::fmt::Debug;

use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use sea_orm::DbErr;

/// Trait for database [drivers](super::driver#modules). A driver owns the single connection shared by every component
/// of the runner.
#[async_trait]
pub trait DatabaseDriver: Debug + Sync + Send + 'static {
    /// Return driver name.
    fn name(&self) -> &'static str;
    /// Returns the database connection for the driver.
    fn connection(&self) -> DatabaseConnection;
    /// Configure the database connection parameters. See corresponding driver implementation for details.
    async fn configure(&self) -> Result<(), DbErr>;
}
