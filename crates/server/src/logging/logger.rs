// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use config::LogConfig;
use rolling_file::{BasicRollingFileAppender, RollingConditionBasic};
use std::path::PathBuf;
use thiserror::Error;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer, Registry, fmt,
    layer::{Layered, SubscriberExt},
    util::SubscriberInitExt,
};

const LOG_FILE_NAME: &str = "logs.log";
const LOKI_SERVICE_LABEL: &str = "substrate-transfer-api";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Invalid log level '{level}': {source}")]
    InvalidLogLevel {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Failed to create log directory or file appender: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse Loki URL '{url}': {source}")]
    InvalidLokiUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Failed to configure Loki integration: {0}")]
    LokiError(#[from] tracing_loki::Error),

    #[error("A global subscriber is already installed: {0}")]
    AlreadyInitialized(#[from] tracing_subscriber::util::TryInitError),
}

type BoxedLayer = Box<dyn Layer<Layered<EnvFilter, Registry>> + Send + Sync>;

/// Keeps the background file writer alive; logs written to the file are
/// flushed when this is dropped.
#[must_use]
pub struct LogGuard {
    _file: Option<WorkerGuard>,
}

/// Filter directive for a configured level.
///
/// `http` is not a tracing level: it keeps everything at `info` and turns on
/// the request logger, which emits under the `http` target at `debug`.
pub fn filter_directive(level: &str) -> &str {
    if level == "http" { "info,http=debug" } else { level }
}

fn human_layer<W>(writer: W, ansi: bool) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .with_ansi(ansi)
        .boxed()
}

fn json_layer<W>(writer: W) -> BoxedLayer
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer().json().with_writer(writer).boxed()
}

fn loki_layer(url: &str) -> Result<BoxedLayer, LoggingError> {
    let parsed = url::Url::parse(url).map_err(|source| LoggingError::InvalidLokiUrl {
        url: url.to_string(),
        source,
    })?;

    let (layer, task) = tracing_loki::builder()
        .label("service", LOKI_SERVICE_LABEL)?
        .extra_field("pid", std::process::id().to_string())?
        .build_url(parsed)?;

    // Ships batches to Loki in the background for the lifetime of the runtime.
    tokio::spawn(task);

    Ok(layer.boxed())
}

/// Install the global tracing subscriber described by `config`.
///
/// Console output is always on. When `config.write` is set, the same events
/// also go to `<write_path>/logs.log`, rotated once it reaches
/// `write_max_file_size` with up to `write_max_files` files kept. A Loki
/// layer is added when `config.loki_url` is set; it must be called from
/// within a tokio runtime in that case.
pub fn init(config: &LogConfig) -> Result<LogGuard, LoggingError> {
    let filter = EnvFilter::try_new(filter_directive(&config.level)).map_err(|source| {
        LoggingError::InvalidLogLevel {
            level: config.level.clone(),
            source,
        }
    })?;

    let mut layers: Vec<BoxedLayer> = Vec::new();
    layers.push(if config.json {
        json_layer(std::io::stdout)
    } else {
        human_layer(std::io::stdout, !config.strip_ansi)
    });

    let mut file_guard = None;
    if config.write {
        std::fs::create_dir_all(&config.write_path)?;

        // The current file counts towards the limit.
        let rotated_files = config.write_max_files.saturating_sub(1);
        let appender = BasicRollingFileAppender::new(
            PathBuf::from(&config.write_path).join(LOG_FILE_NAME),
            RollingConditionBasic::new().max_size(config.write_max_file_size),
            rotated_files,
        )?;
        let (writer, guard) = tracing_appender::non_blocking(appender);
        file_guard = Some(guard);

        layers.push(if config.json {
            json_layer(writer)
        } else {
            human_layer(writer, false)
        });
    }

    if let Some(url) = config.loki_url.as_deref() {
        layers.push(loki_layer(url)?);
    }

    tracing_subscriber::registry()
        .with(filter)
        .with(layers)
        .try_init()?;

    Ok(LogGuard { _file: file_guard })
}
