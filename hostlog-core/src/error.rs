use std::{io, path::PathBuf};

use thiserror::Error;

use crate::host::HostKind;

/// Errors surfaced by loggers and sinks.
#[derive(Debug, Error)]
pub enum LogError {
    /// A level value or name that does not map to a known level.
    #[error("invalid log level: {0}")]
    InvalidLevel(String),
    /// The log file could not be opened or written.
    #[error("unable to write log file {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// Console delivery failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Lookup of a logger attribute that does not exist.
    #[error("No attribute {0}")]
    NoAttribute(String),
    #[error("a {0} host bridge is already installed")]
    HostAlreadyInstalled(HostKind),
    /// The receiving side of a host channel is gone.
    #[error("host bridge disconnected")]
    HostDisconnected,
    #[error("a global `log` backend is already installed")]
    LoggerAlreadySet,
}

pub type Result<T, E = LogError> = std::result::Result<T, E>;
