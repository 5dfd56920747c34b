//! Tracing subscriber setup.
//!
//! The filter comes from `RUST_LOG` when set, otherwise from
//! [`LoggingConfig::filter`]. Output always goes to stderr; when
//! [`LoggingConfig::directory`] is set a non-blocking, daily-rolling file
//! layer is added as well. Keep the returned guard alive for as long as
//! file output is wanted, dropping it flushes pending lines.

use crate::config::LoggingConfig;
use crate::error::{EngineError, Result};
use tracing::Subscriber;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name prefix of rolling log files
pub const LOG_FILE_PREFIX: &str = "algovis.log";

/// Install the global subscriber. Panics if one is already installed.
pub fn init(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));
    let (file_layer, guard) = file_layer(config);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();

    guard
}

/// Like [`init`], but reports an invalid filter or an already-installed
/// subscriber as an error.
pub fn try_init(config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.filter).map_err(|e| {
            EngineError::Config(format!("Invalid log filter '{}': {}", config.filter, e))
        })?,
    };
    let (file_layer, guard) = file_layer(config);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| EngineError::Config(format!("Failed to install log subscriber: {}", e)))?;

    Ok(guard)
}

type FileLayer<S> = fmt::Layer<S, fmt::format::DefaultFields, fmt::format::Format, NonBlocking>;

fn file_layer<S>(config: &LoggingConfig) -> (Option<FileLayer<S>>, Option<WorkerGuard>)
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    match &config.directory {
        Some(directory) => {
            let appender = tracing_appender::rolling::daily(directory, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_writer(writer).with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_install_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            filter: "debug".to_string(),
            directory: Some(dir.path().to_path_buf()),
        };

        let first = try_init(&config);
        let second = try_init(&config);

        assert!(matches!(first, Ok(Some(_))));
        assert!(matches!(second, Err(EngineError::Config(_))));
    }
}
