//! Rolling Logger
//!
//! Keeps the last N formatted log lines in a circular buffer and forwards
//! every line to the browser console (stderr off-browser). Both `tracing`
//! events and `log` records (emitted by dependencies such as reqwest) end up
//! in the same buffer, which can be dumped on demand.

use std::collections::VecDeque;
use std::fmt;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::field::{Field, Visit};
use tracing::{Event, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};
use tracing_subscriber::registry::Registry;

/// Default number of lines kept in memory
pub const DEFAULT_CAPACITY: usize = 500;

// ========================
// Errors
// ========================

#[derive(Debug, Clone)]
pub enum LoggerError {
    InvalidLevel(String),
    AlreadyInitialized(String),
}

impl fmt::Display for LoggerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoggerError::InvalidLevel(level) => write!(f, "Invalid log level: {}", level),
            LoggerError::AlreadyInitialized(msg) => write!(f, "Logger already initialized: {}", msg),
        }
    }
}

impl std::error::Error for LoggerError {}

// ========================
// Circular Buffer
// ========================

/// Bounded, thread-safe buffer of formatted lines; oldest lines fall out first
#[derive(Debug)]
pub struct RollingBuffer {
    lines: Mutex<VecDeque<String>>,
    capacity: usize,
}

impl RollingBuffer {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            lines: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
        }
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<String>> {
        self.lines.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn push(&self, line: String) {
        let mut lines = self.lock();
        if lines.len() == self.capacity {
            lines.pop_front();
        }
        lines.push_back(line);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Copy of the buffered lines, oldest first
    pub fn snapshot(&self) -> Vec<String> {
        self.lock().iter().cloned().collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        for line in self.snapshot() {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    /// Not available in the browser (no filesystem); used by native tooling
    pub fn dump_to_file(&self, path: &Path) -> io::Result<()> {
        let mut file = File::create(path)?;
        self.write_to(&mut file)
    }
}

// ========================
// Formatting & Output
// ========================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Severity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<tracing::Level> for Severity {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Severity::Error,
            tracing::Level::WARN => Severity::Warn,
            tracing::Level::INFO => Severity::Info,
            tracing::Level::DEBUG => Severity::Debug,
            _ => Severity::Trace,
        }
    }
}

impl From<log::Level> for Severity {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Error => Severity::Error,
            log::Level::Warn => Severity::Warn,
            log::Level::Info => Severity::Info,
            log::Level::Debug => Severity::Debug,
            log::Level::Trace => Severity::Trace,
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Error => "ERROR",
            Severity::Warn => "WARN",
            Severity::Info => "INFO",
            Severity::Debug => "DEBUG",
            Severity::Trace => "TRACE",
        };
        f.write_str(s)
    }
}

fn format_line(app_name: &str, severity: Severity, target: &str, message: &str) -> String {
    format!(
        "[{}] [{}] {:<5} {}: {}",
        chrono::Local::now().format("%H:%M:%S%.3f"),
        app_name,
        severity,
        target,
        message
    )
}

#[cfg(target_arch = "wasm32")]
fn emit(severity: Severity, line: &str) {
    match severity {
        Severity::Error => web_sys::console::error_1(&line.into()),
        Severity::Warn => web_sys::console::warn_1(&line.into()),
        Severity::Debug | Severity::Trace => web_sys::console::debug_1(&line.into()),
        Severity::Info => web_sys::console::log_1(&line.into()),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_severity: Severity, line: &str) {
    eprintln!("{}", line);
}

/// Collects the message and `key=value` fields of one event
#[derive(Default)]
struct LineVisitor {
    message: String,
    fields: Vec<String>,
}

impl LineVisitor {
    fn finish(self) -> String {
        if self.fields.is_empty() {
            self.message
        } else if self.message.is_empty() {
            self.fields.join(" ")
        } else {
            format!("{} {}", self.message, self.fields.join(" "))
        }
    }
}

impl Visit for LineVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields.push(format!("{}={}", field.name(), value));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{:?}", value);
        } else {
            self.fields.push(format!("{}={:?}", field.name(), value));
        }
    }
}

// ========================
// tracing Layer
// ========================

/// `tracing_subscriber` layer feeding the rolling buffer
pub struct RollingLayer {
    app_name: String,
    buffer: Arc<RollingBuffer>,
    echo: bool,
}

impl RollingLayer {
    pub fn new(app_name: &str, buffer: Arc<RollingBuffer>) -> Self {
        Self {
            app_name: app_name.to_string(),
            buffer,
            echo: true,
        }
    }

    /// Keep lines in the buffer only, without console output
    pub fn quiet(mut self) -> Self {
        self.echo = false;
        self
    }
}

impl<S: Subscriber> Layer<S> for RollingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut visitor = LineVisitor::default();
        event.record(&mut visitor);
        let meta = event.metadata();
        let severity = Severity::from(*meta.level());
        let line = format_line(&self.app_name, severity, meta.target(), &visitor.finish());
        if self.echo {
            emit(severity, &line);
        }
        self.buffer.push(line);
    }
}

// ========================
// log bridge
// ========================

struct LogBridge {
    app_name: String,
    buffer: Arc<RollingBuffer>,
    level: log::LevelFilter,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &log::Record<'_>) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let severity = Severity::from(record.level());
        let line = format_line(&self.app_name, severity, record.target(), &record.args().to_string());
        emit(severity, &line);
        self.buffer.push(line);
    }

    fn flush(&self) {}
}

fn to_log_filter(level: LevelFilter) -> log::LevelFilter {
    match level.into_level().map(Severity::from) {
        None => log::LevelFilter::Off,
        Some(Severity::Error) => log::LevelFilter::Error,
        Some(Severity::Warn) => log::LevelFilter::Warn,
        Some(Severity::Info) => log::LevelFilter::Info,
        Some(Severity::Debug) => log::LevelFilter::Debug,
        Some(Severity::Trace) => log::LevelFilter::Trace,
    }
}

/// Install the rolling logger as the global `tracing` subscriber and `log`
/// logger. Returns the shared buffer.
pub fn init_logger(app_name: &str, capacity: usize, level: &str) -> Result<Arc<RollingBuffer>, LoggerError> {
    let level_filter = LevelFilter::from_str(level).map_err(|_| LoggerError::InvalidLevel(level.to_string()))?;
    let buffer = Arc::new(RollingBuffer::new(capacity));

    let subscriber = Registry::default().with(RollingLayer::new(app_name, buffer.clone()).with_filter(level_filter));
    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;

    let bridge = LogBridge {
        app_name: app_name.to_string(),
        buffer: buffer.clone(),
        level: to_log_filter(level_filter),
    };
    log::set_boxed_logger(Box::new(bridge)).map_err(|e| LoggerError::AlreadyInitialized(e.to_string()))?;
    log::set_max_level(to_log_filter(level_filter));

    tracing::info!(app = app_name, capacity, level, "logger initialized");
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_drops_oldest() {
        let buffer = RollingBuffer::new(3);
        for i in 0..5 {
            buffer.push(format!("line {}", i));
        }
        assert_eq!(buffer.len(), 3);
        assert_eq!(buffer.snapshot(), vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let buffer = RollingBuffer::new(0);
        buffer.push("a".to_string());
        buffer.push("b".to_string());
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.snapshot(), vec!["b"]);
    }

    #[test]
    fn test_layer_captures_message_and_fields() {
        let buffer = Arc::new(RollingBuffer::new(10));
        let subscriber = Registry::default().with(RollingLayer::new("Test", buffer.clone()).quiet());
        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(item = "abc", position = 3, "reordered");
            tracing::debug!("plain");
        });

        let lines = buffer.snapshot();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[Test]"));
        assert!(lines[0].contains("INFO"));
        assert!(lines[0].contains("reordered item=abc position=3"));
        assert!(lines[1].contains("DEBUG"));
        assert!(lines[1].ends_with("plain"));
    }

    #[test]
    fn test_dump_to_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("app.log");
        let buffer = RollingBuffer::new(4);
        buffer.push("first".to_string());
        buffer.push("second".to_string());
        buffer.dump_to_file(&path).expect("dump");

        let content = std::fs::read_to_string(&path).expect("read back");
        assert_eq!(content, "first\nsecond\n");
    }

    #[test]
    fn test_invalid_level_rejected() {
        let err = init_logger("Test", 10, "loud").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidLevel(_)));
    }
}
