use chrono::Local;
use nu_ansi_term::{Color, Style};
use std::fmt;
use tracing::{Event, Level, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    filter::Targets,
    fmt::{format::Writer, FmtContext, FormatEvent, FormatFields},
    prelude::*,
    registry::LookupSpan,
    EnvFilter, Layer,
};

/// Target used for per-transaction result lines.
pub const TASK_RESULT_TARGET: &str = "task_result";

const DEFAULT_CONSOLE_DIRECTIVES: &str = "warn,task_result=info,cor_sender=info,core_logic=info";

/// Installs the console + rolling file subscriber.
///
/// The returned guard flushes the file writer on drop and must be kept alive
/// for the lifetime of the process.
pub fn setup_logger() -> Option<WorkerGuard> {
    // Create logs directory
    std::fs::create_dir_all("logs").ok();

    let file_appender = tracing_appender::rolling::hourly("logs", "sender");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .event_format(FileFormatter)
        .with_filter(default_targets());

    // RUST_LOG takes over the console when set
    let console_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_CONSOLE_DIRECTIVES));

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stdout)
        .with_ansi(true)
        .event_format(TerminalFormatter)
        .with_filter(console_filter);

    let installed = tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .try_init();

    match installed {
        Ok(()) => Some(guard),
        Err(_) => None,
    }
}

fn default_targets() -> Targets {
    Targets::new()
        .with_target(TASK_RESULT_TARGET, Level::INFO)
        .with_target("cor_sender", Level::INFO)
        .with_target("core_logic", Level::INFO)
        .with_default(Level::WARN)
}

// --- Formatters ---

struct MessageVisitor {
    message: String,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        }
    }
    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

fn event_message(event: &Event<'_>) -> String {
    let mut visitor = MessageVisitor {
        message: String::new(),
    };
    event.record(&mut visitor);
    visitor.message
}

/// Highlights SUCCESS / FAILED markers so status lines stand out.
pub fn colorize(msg: &str) -> String {
    if msg.contains("SUCCESS") {
        let green_text = Style::new().fg(Color::LightGreen).bold();
        msg.replace("SUCCESS", &green_text.paint("SUCCESS").to_string())
    } else if msg.contains("FAILED") {
        let red_text = Style::new().fg(Color::LightRed).bold();
        msg.replace("FAILED", &red_text.paint("FAILED").to_string())
    } else {
        msg.to_string()
    }
}

pub struct TerminalFormatter;

impl<S, N> FormatEvent<S, N> for TerminalFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let msg = colorize(&event_message(event));

        match *event.metadata().level() {
            Level::ERROR => write!(writer, "{} ", Color::LightRed.bold().paint("ERROR"))?,
            Level::WARN => write!(writer, "{} ", Color::Yellow.bold().paint("WARN"))?,
            _ => {}
        }

        write!(writer, "{}", msg)?;
        writeln!(writer)
    }
}

pub struct FileFormatter;

impl<S, N> FormatEvent<S, N> for FileFormatter
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
        let level = event.metadata().level();

        write!(writer, "{} [{}] ", timestamp, level)?;
        writeln!(writer, "{}", event_message(event))
    }
}
