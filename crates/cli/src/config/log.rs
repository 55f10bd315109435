//! Logging configuration for podprobe binaries.
//!
//! Command output is written to stdout, so by default log records go to
//! stderr. Journald and file sinks can be enabled from the configuration
//! file.
use std::{fs::OpenOptions, path::PathBuf};

use serde::{Deserialize, Serialize};
use serde_with::{DisplayFromStr, serde_as};
use tracing_subscriber::{
    Layer, layer::SubscriberExt, registry::LookupSpan, util::SubscriberInitExt,
};

/// Where log records go and which level passes the filter.
#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogConfig {
    /// Append log records to this file when set.
    #[serde(default = "LogConfig::default_file_path")]
    pub file_path: Option<PathBuf>,

    /// Send log records to the systemd journal.
    #[serde(default = "LogConfig::default_emit_journald")]
    pub emit_journald: bool,

    /// Mix log records into stdout. Off by default so that the output of
    /// `podprobe result` or `podprobe reference` stays parseable.
    #[serde(default = "LogConfig::default_emit_stdout")]
    pub emit_stdout: bool,

    #[serde(default = "LogConfig::default_emit_stderr")]
    pub emit_stderr: bool,

    /// Records below this level are dropped.
    #[serde(default = "LogConfig::default_log_level")]
    #[serde_as(as = "DisplayFromStr")]
    pub level: tracing::Level,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_path: Self::default_file_path(),
            emit_journald: Self::default_emit_journald(),
            emit_stdout: Self::default_emit_stdout(),
            emit_stderr: Self::default_emit_stderr(),
            level: Self::default_log_level(),
        }
    }
}

impl LogConfig {
    #[inline]
    #[must_use]
    pub const fn default_log_level() -> tracing::Level { tracing::Level::INFO }

    #[inline]
    #[must_use]
    pub const fn default_file_path() -> Option<PathBuf> { None }

    #[inline]
    #[must_use]
    pub const fn default_emit_journald() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stdout() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stderr() -> bool { true }

    /// Installs the global `tracing` subscriber described by this
    /// configuration.
    ///
    /// Every enabled sink gets its own layer behind a single level filter, so
    /// a record reaches either all enabled sinks or none. A sink that cannot
    /// be opened, such as an unwritable log file or a host without journald,
    /// is skipped and the remaining sinks still work.
    ///
    /// # Panics
    ///
    /// Panics if a global subscriber has already been installed. The CLI
    /// calls this once, after the configuration is loaded and before the
    /// runtime starts.
    pub fn registry(&self) {
        let Self { emit_journald, file_path, emit_stdout, emit_stderr, level } = self;

        tracing_subscriber::registry()
            .with(tracing_subscriber::filter::LevelFilter::from_level(*level))
            .with(emit_journald.then(|| LogSink::Journald.layer()))
            .with(file_path.clone().map(|path| LogSink::File(path).layer()))
            .with(emit_stdout.then(|| LogSink::Stdout.layer()))
            .with(emit_stderr.then(|| LogSink::Stderr.layer()))
            .init();
    }
}

/// A destination for log records.
#[derive(Clone, Debug)]
enum LogSink {
    Stdout,
    Stderr,
    Journald,
    /// Appended to, created if missing. Written without ANSI colors.
    File(PathBuf),
}

impl LogSink {
    /// Builds the formatting layer for this sink, `None` if the sink cannot
    /// be opened.
    #[allow(clippy::type_repetition_in_bounds)]
    fn layer<S>(self) -> Option<Box<dyn Layer<S> + Send + Sync + 'static>>
    where
        S: tracing::Subscriber,
        for<'a> S: LookupSpan<'a>,
    {
        let fmt = tracing_subscriber::fmt::layer().compact().with_target(true);

        match self {
            Self::Stdout => Some(Box::new(fmt.with_writer(std::io::stdout))),
            Self::Stderr => Some(Box::new(fmt.with_writer(std::io::stderr))),
            Self::File(path) => {
                let file = OpenOptions::new().create(true).append(true).open(path).ok()?;
                Some(Box::new(fmt.with_ansi(false).with_writer(file)))
            }
            Self::Journald => Some(Box::new(tracing_journald::layer().ok()?)),
        }
    }
}
