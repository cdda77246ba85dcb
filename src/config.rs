//! Command line and environment configuration.
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use fieldx::fxstruct;
use garde::Validate;

use crate::fetcher::FetcherConfig;
use crate::fetcher::RetryPolicy;
use crate::fetcher::DEFAULT_BASE_URL;
use crate::population::DEFAULT_CHUNK_SIZE;

/// Longest accepted `--duration`: one year, in minutes.
pub const MAX_DURATION_MINUTES: u64 = 60 * 24 * 365;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum DatabaseKind {
    Sqlite,
    Postgres,
    Mysql,
}

/// Deployment profile. Only affects the default query limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum Profile {
    Default,
    Development,
    Production,
    Docker,
}

impl Profile {
    pub fn query_limit(&self) -> u64 {
        match self {
            Profile::Default => 15_000,
            Profile::Development => 10_000,
            Profile::Production => 100_000,
            Profile::Docker => 5_000,
        }
    }
}

#[derive(Debug, Clone, clap::Parser, Validate)]
#[fxstruct(no_new, get(copy))]
#[clap(about, version, name = "sequel")]
pub struct Cli {
    /// The length of time to run the workload, in minutes. Runs until interrupted when omitted.
    #[clap(long, env = "SEQUEL_DURATION")]
    #[garde(range(min = 1, max = MAX_DURATION_MINUTES))]
    duration: Option<u64>,

    /// Storage backend.
    #[clap(long, value_enum, env = "SEQUEL_DATABASE", default_value_t = DatabaseKind::Sqlite)]
    #[garde(skip)]
    database: DatabaseKind,

    /// Connection URL for PostgreSQL and MySQL.
    #[clap(long, env = "SEQUEL_DATABASE_URL")]
    #[fieldx(get(clone))]
    #[garde(custom(Self::url_for_server(&self.database)))]
    database_url: Option<String>,

    /// SQLite database file.
    #[clap(long, env = "SEQUEL_SQLITE_PATH", default_value = "./db.sqlite3")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    sqlite_path: PathBuf,

    /// Query limit for key sampling and workload reads. Defaults to the profile's limit.
    #[clap(long, env = "SEQUEL_LIMIT")]
    #[garde(range(min = 1))]
    limit: Option<u64>,

    #[clap(long, value_enum, env = "SEQUEL_PROFILE", default_value_t = Profile::Default)]
    #[garde(skip)]
    profile: Profile,

    /// Mock data service base URL.
    #[clap(long, env = "SEQUEL_BASE_URL", default_value = DEFAULT_BASE_URL)]
    #[fieldx(get(clone))]
    #[garde(length(min = 1))]
    base_url: String,

    #[clap(long, env = "SEQUEL_API_KEY")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    api_key: Option<String>,

    /// Read mock records from `<resource>.json` files in this directory instead of the HTTP service.
    #[clap(long, env = "SEQUEL_FIXTURES")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    fixtures: Option<PathBuf>,

    /// Pause between cycles, in seconds.
    #[clap(long, env = "SEQUEL_INTERVAL", default_value_t = 5)]
    #[garde(skip)]
    interval: u64,

    /// HTTP request timeout, in seconds.
    #[clap(long, env = "SEQUEL_TIMEOUT", default_value_t = 30)]
    #[garde(range(min = 1))]
    timeout: u64,

    /// Retries after a failed fetch.
    #[clap(long, env = "SEQUEL_RETRIES", default_value_t = 2)]
    #[garde(range(max = 10))]
    retries: u32,

    /// Records per transaction.
    #[clap(long, env = "SEQUEL_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    #[garde(range(min = 1))]
    chunk_size: usize,

    /// Seed for foreign key sampling.
    #[clap(long, env = "SEQUEL_SEED")]
    #[garde(skip)]
    seed: Option<u64>,

    /// Write the log here instead of stdout.
    #[clap(long, env = "SEQUEL_LOG_FILE")]
    #[fieldx(get(clone))]
    #[garde(skip)]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn url_for_server<'a>(database: &'a DatabaseKind) -> impl FnOnce(&'a Option<String>, &()) -> garde::Result {
        move |value, _| {
            if *database != DatabaseKind::Sqlite && value.as_deref().map_or(true, str::is_empty) {
                Err(garde::Error::new(format!("--database-url is required for {database}")))
            }
            else {
                Ok(())
            }
        }
    }

    /// Parse and validate in one go.
    pub fn load_from<I, T>(args: I) -> crate::types::Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli = Self::try_parse_from(args)?;
        cli.validate()?;
        Ok(cli)
    }

    /// The effective query limit: `--limit` when given, the profile's otherwise.
    pub fn query_limit(&self) -> u64 {
        self.limit.unwrap_or_else(|| self.profile.query_limit())
    }

    pub fn run_duration(&self) -> Option<Duration> {
        self.duration.map(|minutes| Duration::from_secs(minutes.saturating_mul(60)))
    }

    pub fn cycle_interval(&self) -> Duration {
        Duration::from_secs(self.interval)
    }

    pub fn fetcher_config(&self) -> FetcherConfig {
        FetcherConfig {
            base_url: self.base_url.clone(),
            api_key:  self.api_key.clone().unwrap_or_default(),
            timeout:  Duration::from_secs(self.timeout),
            retry:    RetryPolicy {
                max_retries: self.retries,
                ..RetryPolicy::default()
            },
        }
    }
}
