//! Log stream set-up. Lines read `timestamp - component - LEVEL - message`, the component being the event target.
use std::fmt;
use std::io;
use std::path::Path;
use std::sync::Mutex;

use chrono::Local;
use tracing::error;
use tracing::Event;
use tracing::Subscriber;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::FormatFields;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::types::AppError;

const DEFAULT_FILTER: &str = "info,sqlx=warn,sea_orm=warn";

#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(&self, ctx: &FmtContext<'_, S, N>, mut writer: Writer<'_>, event: &Event<'_>) -> fmt::Result {
        let meta = event.metadata();
        write!(
            writer,
            "{} - {} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
            meta.target(),
            meta.level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the default filter.
pub fn init(log_file: Option<&Path>) -> Result<(), AppError> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    let dest_writer = Mutex::new(if let Some(log_file) = log_file {
        let file = std::fs::OpenOptions::new().create(true).append(true).open(log_file)?;
        Box::new(file) as Box<dyn io::Write + Send>
    }
    else {
        Box::new(io::stdout()) as Box<dyn io::Write + Send>
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .event_format(LineFormat)
                .with_ansi(false)
                .with_writer(dest_writer),
        )
        .try_init()
        .map_err(|err| AppError::Logging(err.to_string()))
}

/// Log a process-fatal error and return its exit status. Falls back to stdout logging when no subscriber is
/// installed yet, as with configuration errors.
pub fn report_fatal(err: &AppError) -> u8 {
    // Only fails when a subscriber is already in place.
    let _ = init(None);
    error!("{err}");
    err.exit_code()
}
