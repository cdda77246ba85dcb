use sea_orm::DbErr;

use crate::kind::EntityKind;

pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Process-level failures. Only these are allowed to stop the runner.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Cli(#[from] clap::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Database initialization failure: {0}")]
    StorageInit(#[source] DbErr),

    #[error("Failed to set up logging: {0}")]
    Logging(String),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::StorageInit(_) => 1,
            AppError::Cli(err) => err.exit_code() as u8,
            AppError::Config(_) => 2,
            _ => 1,
        }
    }
}

impl From<garde::Report> for AppError {
    fn from(report: garde::Report) -> Self {
        AppError::Config(report.to_string().trim_end().to_string())
    }
}

/// Failure to produce foreign-key candidates for a child entity.
#[derive(Debug, thiserror::Error)]
pub enum SampleError {
    #[error("no {0} rows available to reference")]
    EmptyParentSet(EntityKind),

    #[error("failed to read {kind} keys: {source}")]
    Storage {
        kind:   EntityKind,
        #[source]
        source: DbErr,
    },
}

/// Failure of a single source record. Never stops a population task.
#[derive(Debug, thiserror::Error)]
pub enum RecordError {
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid value for '{field}': {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("database error: {0}")]
    Storage(#[from] DbErr),
}

/// Failure of a whole population task invocation.
#[derive(Debug, thiserror::Error)]
pub enum PopulationError {
    #[error(transparent)]
    Sample(#[from] SampleError),

    #[error("transaction failure: {0}")]
    Storage(#[from] DbErr),
}
