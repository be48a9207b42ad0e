//! # hostlog-core
//! Core utilities for hostlog - records, formatting, sinks and host bridges.

mod config;
mod error;
mod format;
mod host;
mod host_sink;
mod record;
mod sink;

pub use config::{HOSTLOG_CONFIG, HostLogConfig};
pub use error::{LogError, Result};
pub use format::{DATE_FORMAT, format_record, format_record_colored};
pub use host::{
    Alert, ChannelHost, HostBridge, HostEvent, HostKind, PendingAlert, host_available,
    install_host, installed_host,
};
pub use host_sink::{MayaSink, NukeSink};
pub use record::{Level, Method, Record};
pub use sink::{ConsoleSink, FileSink, Sink, SinkKind};
