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
pub struct MySql {
    connection: DatabaseConnection,
}

impl MySql {
    pub async fn connect(url: &str) -> Result<Self, DbErr> {
        let mut opts = ConnectOptions::new(url);
        opts.max_connections(1)
            .min_connections(1)
            .acquire_timeout(Duration::from_secs(10))
            .test_before_acquire(true);

        let connection = sea_orm::Database::connect(opts)
            .await
            .inspect_err(|e| error!("Error connecting to MySQL database: {e}"))?;

        Ok(Self { connection })
    }
}

#[async_trait]
impl DatabaseDriver for MySql {
    fn name(&self) -> &'static str {
        "MySQL"
    }

    fn connection(&self) -> DatabaseConnection {
        self.connection.clone()
    }

    async fn configure(&self) -> Result<(), DbErr> {
        self.connection
            .execute_unprepared("SET SESSION TRANSACTION ISOLATION LEVEL READ COMMITTED;")
            .await?;

        Ok(())
    }
}
