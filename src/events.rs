use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    pub at: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
}

/// Event collector owned by a single ranking/processing request.
///
/// Each `record` is also forwarded to `tracing`, so process-wide logging
/// still sees everything while callers get only their own events back.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RequestLog {
    events: Vec<LogEvent>,
}

impl RequestLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Info => tracing::info!("{}", message),
            LogLevel::Warn => tracing::warn!("{}", message),
            LogLevel::Error => tracing::error!("{}", message),
        }
        self.events.push(LogEvent {
            at: Utc::now(),
            level,
            message,
        });
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.record(LogLevel::Info, message);
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.record(LogLevel::Warn, message);
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.record(LogLevel::Error, message);
    }

    pub fn events(&self) -> &[LogEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Append another request's events (used when one request drives another)
    pub fn extend(&mut self, other: RequestLog) {
        self.events.extend(other.events);
    }

    /// One line per event, oldest first
    pub fn render(&self) -> String {
        self.events
            .iter()
            .map(|e| {
                let level = match e.level {
                    LogLevel::Info => "INFO",
                    LogLevel::Warn => "WARN",
                    LogLevel::Error => "ERROR",
                };
                format!("{} {:<5} {}", e.at.format("%H:%M:%S%.3f"), level, e.message)
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
