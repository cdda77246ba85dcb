//! The runner application: configuration, storage start-up and the cycle loop.
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use sea_orm::DatabaseConnection;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::config::Cli;
use crate::config::DatabaseKind;
use crate::db;
#[cfg(feature = "mysql")]
use crate::db::driver::mysql::MySql;
#[cfg(feature = "pg")]
use crate::db::driver::pg::Pg;
#[cfg(feature = "sqlite")]
use crate::db::driver::sqlite::Sqlite;
use crate::db::driver::DatabaseDriver;
use crate::fetcher::Fetcher;
use crate::fetcher::FixtureSource;
use crate::fetcher::MockDataSource;
use crate::logging;
use crate::orchestrator::Orchestrator;
use crate::population::PopulationContext;
use crate::scheduler::ScheduleReport;
use crate::scheduler::Scheduler;
use crate::types::AppError;
use crate::types::Result;
use crate::workload::WorkloadRunner;

#[derive(Debug)]
pub struct WorkloadApp {
    cli:    Cli,
    cancel: CancellationToken,
}

impl WorkloadApp {
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            cancel: CancellationToken::new(),
        }
    }

    /// Build from the process arguments and `SEQUEL_*` environment.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(Cli::load_from(std::env::args_os())?))
    }

    pub fn cli(&self) -> &Cli {
        &self.cli
    }

    /// Cancelling the token stops the scheduler at its next check.
    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Full process run: logging, then [`run`](Self::run).
    pub async fn execute(&self) -> Result<ScheduleReport> {
        logging::init(self.cli.log_file().as_deref())?;
        self.watch_interrupt();
        self.run().await
    }

    pub async fn run(&self) -> Result<ScheduleReport> {
        let db = self.open_storage().await?;
        let limit = self.cli.query_limit();
        info!(
            "Starting up database workload runner: profile {}, query limit {limit}",
            self.cli.profile()
        );

        let ctx = PopulationContext::new(self.source()?, db.clone(), limit, self.cli.chunk_size());
        let scheduler = Scheduler::new(
            Orchestrator::new(ctx, self.cancel.clone()),
            WorkloadRunner::new(db.clone(), limit),
            self.cli.cycle_interval(),
            self.cli.run_duration(),
            self.cancel.clone(),
        );

        let mut rng = match self.cli.seed() {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let report = scheduler.run(&mut rng).await;

        if let Err(err) = db.close().await {
            warn!("Error closing database connection: {err}");
        }

        Ok(report)
    }

    /// Connect to the configured backend and bring the schema up to date. Any failure here is fatal.
    pub async fn open_storage(&self) -> Result<DatabaseConnection> {
        let driver = self.connect_driver().await?;
        db::initialize(driver.as_ref())
            .await
            .inspect(|_| info!("Database Initialized on: {}", chrono::Local::now()))
            .map_err(Self::init_failure)
    }

    async fn connect_driver(&self) -> Result<Box<dyn DatabaseDriver>> {
        let driver: Box<dyn DatabaseDriver> = match self.cli.database() {
            #[cfg(feature = "sqlite")]
            DatabaseKind::Sqlite => Box::new(
                Sqlite::connect(&self.cli.sqlite_path())
                    .await
                    .map_err(Self::init_failure)?,
            ),
            #[cfg(feature = "pg")]
            DatabaseKind::Postgres => Box::new(
                Pg::connect(&self.cli.database_url().unwrap_or_default())
                    .await
                    .map_err(Self::init_failure)?,
            ),
            #[cfg(feature = "mysql")]
            DatabaseKind::Mysql => Box::new(
                MySql::connect(&self.cli.database_url().unwrap_or_default())
                    .await
                    .map_err(Self::init_failure)?,
            ),
            #[allow(unreachable_patterns)]
            other => {
                return Err(AppError::Config(format!(
                    "{other} support is not compiled in this build"
                )))
            }
        };

        Ok(driver)
    }

    fn init_failure(err: sea_orm::DbErr) -> AppError {
        error!("Database initialization failure: {err}");
        AppError::StorageInit(err)
    }

    fn source(&self) -> Result<Arc<dyn MockDataSource>> {
        let source: Arc<dyn MockDataSource> = match self.cli.fixtures() {
            Some(dir) => {
                info!("Reading mock records from {}", dir.display());
                Arc::new(FixtureSource::from_dir(dir))
            }
            None => Arc::new(Fetcher::new(self.cli.fetcher_config())?.with_cancel(self.cancel.clone())),
        };
        Ok(source)
    }

    fn watch_interrupt(&self) {
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            match signal::ctrl_c().await {
                Ok(()) => {
                    info!("Interrupted, stopping after the current step");
                    cancel.cancel();
                }
                Err(err) => warn!("Cannot listen for Ctrl+C: {err}"),
            }
        });
    }
}
