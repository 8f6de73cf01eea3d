use std::{
    convert::Infallible,
    fmt::{self, Display, Formatter},
    fs::OpenOptions,
    path::PathBuf,
    str::FromStr,
    sync::Mutex,
};

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use snafu::{ResultExt, Snafu};
use tracing_subscriber::{
    filter::EnvFilter,
    fmt::{format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    Layer,
};

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Could not open log file {}, error: {source}", path.display()))]
    OpenLogFile { path: PathBuf, source: std::io::Error },

    #[snafu(display("Could not connect to journald, error: {source}"))]
    ConnectJournald { source: std::io::Error },

    #[snafu(display("Could not install global tracing subscriber, error: {source}"))]
    InstallSubscriber { source: tracing_subscriber::util::TryInitError },
}

// SAFETY: Configuration file needs many bools.
#[allow(clippy::struct_excessive_bools)]
#[serde_as]
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct LogConfig {
    #[serde(default = "LogConfig::default_file_path")]
    pub file_path: Option<PathBuf>,

    #[serde(default = "LogConfig::default_emit_journald")]
    pub emit_journald: bool,

    #[serde(default = "LogConfig::default_emit_stdout")]
    pub emit_stdout: bool,

    #[serde(default = "LogConfig::default_emit_stderr")]
    pub emit_stderr: bool,

    /// Ignored when `RUST_LOG` is set.
    #[serde(default = "LogConfig::default_log_filters")]
    pub log_filters: String,

    #[serde(default = "LogConfig::default_log_formatter")]
    #[serde_as(as = "DisplayFromStr")]
    pub formatter: LogFormatter,

    // Display function latency in logs
    #[serde(default = "LogConfig::default_show_fn_latency")]
    pub show_fn_latency: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            file_path: Self::default_file_path(),
            emit_journald: Self::default_emit_journald(),
            emit_stdout: Self::default_emit_stdout(),
            emit_stderr: Self::default_emit_stderr(),
            log_filters: Self::default_log_filters(),
            formatter: Self::default_log_formatter(),
            show_fn_latency: Self::default_show_fn_latency(),
        }
    }
}

impl LogConfig {
    #[inline]
    #[must_use]
    pub fn default_log_filters() -> String {
        "info,tower_http=info,lettre=warn,mongodb=warn".to_string()
    }

    #[inline]
    #[must_use]
    pub const fn default_file_path() -> Option<PathBuf> { None }

    #[inline]
    #[must_use]
    pub const fn default_emit_journald() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_emit_stdout() -> bool { true }

    #[inline]
    #[must_use]
    pub const fn default_emit_stderr() -> bool { false }

    #[inline]
    #[must_use]
    pub const fn default_log_formatter() -> LogFormatter { LogFormatter::Pretty }

    #[inline]
    #[must_use]
    pub const fn default_show_fn_latency() -> bool { false }

    fn env_filter(&self) -> EnvFilter {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&self.log_filters))
    }

    /// Installs the global `tracing` subscriber described by this
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the log file cannot be opened, journald is
    /// unreachable, or a global subscriber is already installed.
    pub fn install(&self) -> Result<(), Error> {
        let Self {
            file_path,
            emit_journald,
            emit_stdout,
            emit_stderr,
            formatter,
            show_fn_latency,
            ..
        } = self;

        // `XXX_FUNCTION close, time.busy: 37.5µs, time.idle: 2.01s`
        let span_events = if *show_fn_latency { FmtSpan::CLOSE } else { FmtSpan::NONE };

        let log_file = file_path
            .as_ref()
            .map(|path| {
                OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .context(OpenLogFileSnafu { path: path.clone() })
            })
            .transpose()?;

        let journald = if *emit_journald {
            Some(tracing_journald::layer().context(ConnectJournaldSnafu)?)
        } else {
            None
        };

        tracing_subscriber::registry()
            .with(self.env_filter())
            .with(journald)
            .with(log_file.map(|file| {
                output_layer(Mutex::new(file), formatter, span_events.clone())
            }))
            .with(emit_stdout.then(|| output_layer(std::io::stdout, formatter, span_events.clone())))
            .with(emit_stderr.then(|| output_layer(std::io::stderr, formatter, span_events)))
            .try_init()
            .context(InstallSubscriberSnafu)
    }
}

#[allow(clippy::type_repetition_in_bounds)]
fn output_layer<S, W>(
    writer: W,
    formatter: &LogFormatter,
    span_events: FmtSpan,
) -> Box<dyn Layer<S> + Send + Sync + 'static>
where
    S: tracing::Subscriber,
    for<'a> S: LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt = tracing_subscriber::fmt::layer()
        .with_thread_ids(true)
        .with_thread_names(true)
        .with_target(true)
        .with_span_events(span_events)
        .with_writer(writer);

    match formatter {
        LogFormatter::Pretty => fmt.pretty().boxed(),
        LogFormatter::Json => fmt.json().flatten_event(true).boxed(),
    }
}

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum LogFormatter {
    Pretty,
    Json,
}

impl FromStr for LogFormatter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            _ => Ok(Self::Pretty),
        }
    }
}

impl Display for LogFormatter {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Json => write!(f, "json"),
        }
    }
}
