use std::{fmt, str::FromStr};

use chrono::{DateTime, Local};

use crate::error::LogError;

/// Severity of a record.
///
/// The numeric values are the classic logging levels, so thresholds read from
/// external configuration compare the same way.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Level {
    NotSet = 0,
    Debug = 10,
    #[default]
    Info = 20,
    Warning = 30,
    Error = 40,
    Critical = 50,
}

impl Level {
    /// Alias of [`Level::Critical`].
    pub const FATAL: Level = Level::Critical;
    /// Alias of [`Level::Warning`].
    pub const WARN: Level = Level::Warning;

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Maps a numeric level back to its variant.
    pub fn from_value(value: u8) -> Result<Self, LogError> {
        match value {
            0 => Ok(Level::NotSet),
            10 => Ok(Level::Debug),
            20 => Ok(Level::Info),
            30 => Ok(Level::Warning),
            40 => Ok(Level::Error),
            50 => Ok(Level::Critical),
            other => Err(LogError::InvalidLevel(other.to_string())),
        }
    }

    /// Upper-case name used in formatted lines.
    pub const fn name(self) -> &'static str {
        match self {
            Level::NotSet => "NOTSET",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = LogError;

    fn try_from(value: u8) -> Result<Self, <Level as TryFrom<u8>>::Error> {
        Level::from_value(value)
    }
}

impl FromStr for Level {
    type Err = LogError;

    /// Accepts level names in any case, the `WARN`/`FATAL` aliases and
    /// numeric values.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if let Ok(value) = name.parse::<u8>() {
            return Level::from_value(value);
        }
        match name.to_ascii_uppercase().as_str() {
            "NOTSET" => Ok(Level::NotSet),
            "DEBUG" => Ok(Level::Debug),
            "INFO" => Ok(Level::Info),
            "WARNING" | "WARN" => Ok(Level::Warning),
            "ERROR" => Ok(Level::Error),
            "CRITICAL" | "FATAL" => Ok(Level::Critical),
            _ => Err(LogError::InvalidLevel(s.to_string())),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Logger method a record originated from.
///
/// Host sinks choose their escalation from this tag rather than from the
/// record's level: a record sent through [`Method::Log`] at CRITICAL does not
/// open a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Debug,
    Info,
    Warning,
    Error,
    Exception,
    Fatal,
    Critical,
    /// Generic `log(level, message)` path.
    Log,
}

impl Method {
    pub const fn name(self) -> &'static str {
        match self {
            Method::Debug => "debug",
            Method::Info => "info",
            Method::Warning => "warning",
            Method::Error => "error",
            Method::Exception => "exception",
            Method::Fatal => "fatal",
            Method::Critical => "critical",
            Method::Log => "log",
        }
    }

    /// Whether host sinks raise an alert for this method.
    pub const fn is_escalating(self) -> bool {
        matches!(self, Method::Fatal | Method::Critical)
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A single log event, built when a logger method is called and dropped once
/// every sink has seen it.
#[derive(Debug, Clone)]
pub struct Record {
    timestamp: DateTime<Local>,
    name: String,
    level: Level,
    method: Method,
    message: String,
}

impl Record {
    pub fn new(name: &str, level: Level, method: Method, message: impl fmt::Display) -> Self {
        Self {
            timestamp: Local::now(),
            name: name.to_string(),
            level,
            method,
            message: message.to_string(),
        }
    }

    /// Replaces the creation time.
    pub fn with_timestamp(self, timestamp: DateTime<Local>) -> Self {
        Self { timestamp, ..self }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn level(&self) -> Level {
        self.level
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
