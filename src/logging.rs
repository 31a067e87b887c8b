// src/logging.rs
// Timestamped log lines for the console. They go to stderr so the call sheet on
// stdout stays clean; redirect with `2>console.log` to keep a game journal.

use chrono::Local;

/// Log level enum
#[derive(Debug, Clone, Copy)]
pub enum LogLevel {
    Info,
    Error,
    Warning,
}

impl LogLevel {
    fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARNING",
        }
    }
}

pub fn format_message(level: LogLevel, message: &str) -> String {
    let timestamp = Local::now().format("%Y-%m-%d %H:%M:%S");
    format!("{} - {} - {}", timestamp, level.as_str(), message)
}

pub fn log_message(level: LogLevel, message: &str) {
    eprintln!("{}", format_message(level, message));
}

pub fn log_info(message: &str) {
    log_message(LogLevel::Info, message);
}

pub fn log_error(message: &str) {
    log_message(LogLevel::Error, message);
}

pub fn log_warning(message: &str) {
    log_message(LogLevel::Warning, message);
}
