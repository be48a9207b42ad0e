//! # hostlog
//! Named loggers writing to the console, log files and the script editors of
//! Maya and Nuke.
//!
//! ## Usage
//! ```toml
//! // Cargo.toml
//! ...
//! [dependencies]
//! hostlog = "0.1.0"
//! ```
//!
//! ```rust
//! use hostlog::get_logger;
//!
//! let log = get_logger("mylogger");
//! log.info("log something").unwrap();
//! // prints "2024-03-09 14:05:07 mylogger INFO : log something"
//! ```
//!
//! ## Levels
//! ```rust
//! use hostlog::{Level, logger_config};
//!
//! let log = logger_config().with_level(Level::Debug).get("verbose");
//! log.debug("visible").unwrap();
//! log.set_level(Level::Warning);
//! log.info("dropped").unwrap();
//! ```
//!
//! ## Logging to files
//! The log file is created if it does not exist and appended to if it does.
//! It is opened on the first record; failures are returned by that call.
//!
//! ```rust
//! use hostlog::logger_config;
//!
//! let path = std::env::temp_dir().join("hostlog_doc.log");
//! let log = logger_config()
//!     .with_log_file(&path)
//!     .no_stdout()
//!     .get("to-file");
//! log.warning("written to the file").unwrap();
//! assert!(std::fs::read_to_string(&path).unwrap().ends_with("to-file WARNING : written to the file\n"));
//! ```
//!
//! ## Host script editors
//! An embedding host installs its bridge once; loggers created afterwards also
//! write to its script editor. `critical` and `fatal` raise a dialog there
//! unless the host runs in batch mode.
//!
//! ```rust
//! use std::sync::Arc;
//! use hostlog::{ChannelHost, HostEvent, logger_config};
//!
//! let (host, events) = ChannelHost::new(true);
//! let log = logger_config()
//!     .no_stdout()
//!     .with_nuke_bridge(Arc::new(host))
//!     .get("comp");
//! log.critical("missing plate").unwrap();
//! assert!(matches!(events.try_recv(), Ok(HostEvent::Error(_))));
//! ```

mod bridge;
mod logger;

use std::{
    collections::HashMap,
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, LazyLock, Mutex, PoisonError},
};

pub use bridge::init_log_bridge;
pub use hostlog_core::{
    Alert, ChannelHost, ConsoleSink, FileSink, HostBridge, HostEvent, HostKind, Level, LogError,
    MayaSink, Method, NukeSink, PendingAlert, Record, Result, Sink, SinkKind, format_record,
    host_available, install_host,
};
use hostlog_core::installed_host;
pub use logger::{Attribute, Logger};

/// Every logger created in this process, by name. Entries are never removed.
static REGISTRY: LazyLock<Mutex<HashMap<String, Arc<Logger>>>> =
    LazyLock::new(|| Mutex::new(HashMap::new()));

/// Builder for the sinks and level of a named logger.
pub struct ConfigBuilder {
    stdout: bool,
    console_writer: Option<Box<dyn Write + Send>>,
    maya: Option<bool>,
    nuke: Option<bool>,
    maya_bridge: Option<Arc<dyn HostBridge>>,
    nuke_bridge: Option<Arc<dyn HostBridge>>,
    log_file: Option<PathBuf>,
    log_level: Level,
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self {
            stdout: true,
            console_writer: None,
            maya: None,
            nuke: None,
            maya_bridge: None,
            nuke_bridge: None,
            log_file: None,
            log_level: Level::Info,
        }
    }
}

/// Resolves the bridge of a host sink: off when disabled, otherwise the
/// explicit bridge or the installed one.
fn host_bridge(
    kind: HostKind,
    enabled: Option<bool>,
    explicit: Option<Arc<dyn HostBridge>>,
) -> Option<Arc<dyn HostBridge>> {
    if enabled == Some(false) {
        return None;
    }
    explicit.or_else(|| installed_host(kind))
}

impl ConfigBuilder {
    fn build_sinks(self) -> Vec<Box<dyn Sink>> {
        let Self {
            stdout,
            console_writer,
            maya,
            nuke,
            maya_bridge,
            nuke_bridge,
            log_file,
            log_level: _,
        } = self;
        let mut sinks: Vec<Box<dyn Sink>> = Vec::new();
        if stdout {
            sinks.push(match console_writer {
                Some(writer) => Box::new(ConsoleSink::with_writer(writer)),
                None => Box::new(ConsoleSink::stdout()),
            });
        }
        if let Some(path) = log_file {
            sinks.push(Box::new(FileSink::new(path)));
        }
        if let Some(bridge) = host_bridge(HostKind::Maya, maya, maya_bridge) {
            sinks.push(Box::new(MayaSink::new(bridge)));
        }
        if let Some(bridge) = host_bridge(HostKind::Nuke, nuke, nuke_bridge) {
            sinks.push(Box::new(NukeSink::new(bridge)));
        }
        sinks
    }

    /// Sets a log file.
    pub fn with_log_file<P: AsRef<Path>>(self, path: P) -> Self {
        Self {
            log_file: Some(path.as_ref().to_path_buf()),
            ..self
        }
    }
    /// Maybe sets a log file.
    pub fn maybe_with_log_file<P: AsRef<Path>>(self, path: Option<P>) -> Self {
        Self {
            log_file: path.map(|p| p.as_ref().to_path_buf()),
            ..self
        }
    }
    /// Attaches no console sink.
    pub fn no_stdout(self) -> Self {
        Self {
            stdout: false,
            ..self
        }
    }
    /// Attaches the console sink only when `yes`.
    pub fn with_stdout(self, yes: bool) -> Self {
        Self {
            stdout: yes,
            ..self
        }
    }
    /// Console lines go to `writer` instead of stdout. Turns the console sink
    /// on, overriding an earlier [`ConfigBuilder::no_stdout`].
    pub fn with_console_writer<W: Write + Send + 'static>(self, writer: W) -> Self {
        Self {
            stdout: true,
            console_writer: Some(Box::new(writer)),
            ..self
        }
    }
    /// Write to the Maya script editor. Defaults to whether a Maya bridge is
    /// installed; enabling it without a bridge attaches nothing.
    pub fn with_maya(self, yes: bool) -> Self {
        Self {
            maya: Some(yes),
            ..self
        }
    }
    /// Write to the Nuke script editor, same rules as [`ConfigBuilder::with_maya`].
    pub fn with_nuke(self, yes: bool) -> Self {
        Self {
            nuke: Some(yes),
            ..self
        }
    }
    pub fn with_maya_bridge(self, bridge: Arc<dyn HostBridge>) -> Self {
        Self {
            maya_bridge: Some(bridge),
            ..self
        }
    }
    pub fn with_nuke_bridge(self, bridge: Arc<dyn HostBridge>) -> Self {
        Self {
            nuke_bridge: Some(bridge),
            ..self
        }
    }
    /// Sets the log level, INFO by default.
    pub fn with_level(self, level: Level) -> Self {
        Self {
            log_level: level,
            ..self
        }
    }

    /// Returns the logger registered under `name`, creating it with this
    /// configuration's sinks on first use.
    ///
    /// An existing logger keeps its sinks; only the level is applied to it.
    pub fn get(self, name: &str) -> Arc<Logger> {
        let mut registry = REGISTRY.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(logger) = registry.get(name) {
            logger.set_level(self.log_level);
            return Arc::clone(logger);
        }
        let level = self.log_level;
        let logger = Arc::new(Logger::new(name, level, self.build_sinks()));
        registry.insert(name.to_string(), Arc::clone(&logger));
        logger
    }
}

/// Starts a logger configuration: console on, installed hosts, no file, INFO.
pub fn logger_config() -> ConfigBuilder {
    ConfigBuilder::default()
}

/// Logger `name` with the default configuration: stdout, installed hosts, no
/// file, INFO.
pub fn get_logger(name: &str) -> Arc<Logger> {
    logger_config().get(name)
}
