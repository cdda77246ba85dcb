//! Storage: drivers, entity models and the schema migrations.
pub mod driver;
pub mod entity;
pub mod migrations;

use sea_orm::DatabaseConnection;
use sea_orm::DbErr;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use driver::DatabaseDriver;
use migrations::Migrator;

pub mod prelude {
    pub use super::entity::*;
}

/// One-time storage initialization: driver settings, then every pending migration. Existing rows are kept.
pub async fn initialize<D: DatabaseDriver + ?Sized>(dbd: &D) -> Result<DatabaseConnection, DbErr> {
    dbd.configure().await?;
    let db = dbd.connection();
    Migrator::up(&db, None).await?;
    info!("{} schema is ready", dbd.name());
    Ok(db)
}
