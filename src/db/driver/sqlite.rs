use std::path::Path;

use async_trait::async_trait;
use fieldx::fxstruct;
use sea_orm::ConnectionTrait;
use sea_orm::DatabaseConnection;
use sea_orm::DbErr;
use tracing::error;

use super::DatabaseDriver;

#[derive(Debug)]
#[fxstruct(sync, no_new)]
pub struct Sqlite {
    connection: DatabaseConnection,
}

impl Sqlite {
    /// Open (creating if missing) the database file at `db_path`.
    pub async fn connect(db_path: &Path) -> Result<Self, DbErr> {
        let schema = format!("sqlite://{}?mode=rwc", db_path.display());
        let db = sea_orm::Database::connect(&schema)
            .await
            .inspect_err(|e| error!("Error connecting to database {schema}: {e}"))?;

        Ok(Self { connection: db })
    }
}

#[async_trait]
impl DatabaseDriver for Sqlite {
    fn name(&self) -> &'static str {
        "SQLite"
    }

    fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    async fn configure(&self) -> Result<(), DbErr> {
        let db = &self.connection;

        db.execute_unprepared("PRAGMA foreign_keys=ON;").await?;
        db.execute_unprepared("PRAGMA journal_mode=WAL;").await?;
        db.execute_unprepared("PRAGMA synchronous=NORMAL;").await?;

        Ok(())
    }
}
