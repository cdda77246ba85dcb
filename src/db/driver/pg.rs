use std::time::Duration;

use async_trait::async_trait;
use fieldx::fxstruct;
use sea_orm::ConnectOptions;
use sea_orm::ConnectionTrait;
use sea_orm::DatabaseConnection;
use sea_orm::DbErr;
use tracing::error;

use super::DatabaseDriver;

#[derive(Debug)]
#[fxstruct(sync, no_new)]
pub struct Pg {
    connection: DatabaseConnection,
}

impl Pg {
    pub async fn connect(url: &str) -> Result<Self, DbErr> {
        let mut opts = ConnectOptions::new(url);
        // Everything runs sequentially over one session.
        opts.max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .test_before_acquire(true);

        let connection = sea_orm::Database::connect(opts)
            .await
            .inspect_err(|e| error!("Error connecting to PostgreSQL database: {e}"))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl DatabaseDriver for Pg {
    fn name(&self) -> &'static str {
        "PostgreSQL"
    }

    fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    async fn configure(&self) -> Result<(), DbErr> {
        self.connection.execute_unprepared("SET synchronous_commit = off;").await?;

        Ok(())
    }
}
