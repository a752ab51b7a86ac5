//! Fire-and-forget diagnostics logging
//!
//! Logging never affects control flow. Implementations may filter by
//! level or drop messages entirely.

/// Message severity, most severe first
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
    Verbose,
}

pub trait Logger {
    fn log(&mut self, level: LogLevel, message: &str);

    fn error(&mut self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    fn warning(&mut self, message: &str) {
        self.log(LogLevel::Warning, message);
    }

    fn info(&mut self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    fn debug(&mut self, message: &str) {
        self.log(LogLevel::Debug, message);
    }
}

/// Logger that drops everything; handy default for tests
pub struct NullLogger;

impl Logger for NullLogger {
    fn log(&mut self, _level: LogLevel, _message: &str) {}
}
