//! provides logging helpers

use std::fmt::{self};
use std::path::Path;

use tracing::field::Field;
use tracing::field::Visit;
use tracing::Event;
use tracing::Subscriber;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::InitError;
use tracing_appender::rolling::RollingFileAppender;
use tracing_appender::rolling::Rotation;
use tracing_subscriber::filter::FilterExt;
use tracing_subscriber::filter::{self};
use tracing_subscriber::fmt::layer;
use tracing_subscriber::fmt::FormatEvent;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry;

/// Target under which delivered events are logged.
pub const EVENTS_TARGET: &str = "events";

/// Writes only the event message, one per line, with no level or timestamp.
struct EventLineFormatter;

#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

impl<S, N> FormatEvent<S, N> for EventLineFormatter
where
    S: Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        writeln!(writer, "{}", visitor.message)
    }
}

fn env_filter() -> filter::EnvFilter {
    filter::EnvFilter::builder()
        .with_default_directive(filter::LevelFilter::INFO.into())
        .from_env_lossy()
}

fn is_event_line(metadata: &tracing::Metadata<'_>) -> bool {
    metadata.target() == EVENTS_TARGET
}

/// initiate the global tracing subscriber
pub fn init() {
    let fmt_layer = layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_filter(env_filter());

    registry().with(fmt_layer).init();
}

/// initiate the global tracing subscriber, routing event lines to `event_log`.
///
/// Diagnostics keep going to stderr. Lines logged under [`EVENTS_TARGET`] are
/// written verbatim to a daily-rotated file instead. Without a path this is the
/// same as [`init`]. The returned guard must be held until shutdown so buffered
/// lines are flushed.
pub fn init_with_event_log<P: AsRef<Path>>(
    event_log: Option<P>,
) -> Result<Option<WorkerGuard>, InitError> {
    let Some(event_log) = event_log else {
        init();
        return Ok(None);
    };
    let event_log = event_log.as_ref();

    let dir = event_log
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let prefix = event_log
        .file_name()
        .and_then(|f| f.to_str())
        .unwrap_or("events.log");

    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(prefix)
        .max_log_files(3)
        .build(dir)?;
    let (file_writer, file_guard) = tracing_appender::non_blocking(appender);

    routed_subscriber(std::io::stderr, file_writer).init();
    Ok(Some(file_guard))
}

/// Diagnostics to `diagnostics`, [`EVENTS_TARGET`] lines only to `events`.
fn routed_subscriber<D, E>(diagnostics: D, events: E) -> impl Subscriber + Send + Sync + 'static
where
    D: for<'w> MakeWriter<'w> + Send + Sync + 'static,
    E: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let fmt_layer = layer()
        .with_writer(diagnostics)
        .with_target(true)
        .with_filter(env_filter().and(filter::filter_fn(|metadata| !is_event_line(metadata))));

    let events_layer = layer()
        .event_format(EventLineFormatter)
        .fmt_fields(tracing_subscriber::fmt::format::DefaultFields::new())
        .with_writer(events)
        .with_ansi(false)
        .with_filter(filter::filter_fn(is_event_line));

    registry().with(fmt_layer).with(events_layer)
}
