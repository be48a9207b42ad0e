use std::{
    error::Error,
    fmt::{self, Display},
    sync::atomic::{AtomicBool, AtomicU8, Ordering},
};

use hostlog_core::{Level, LogError, Method, Record, Result, Sink, SinkKind};

/// Value returned by [`Logger::attribute`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attribute {
    Name(String),
    Level(Level),
    Disabled(bool),
    Sinks(Vec<SinkKind>),
}

/// Named logging handle.
///
/// Obtained from [`crate::get_logger`] or [`crate::logger_config`]; the same
/// name always yields the same instance.
pub struct Logger {
    name: String,
    level: AtomicU8,
    disabled: AtomicBool,
    /// Attachment order, one sink per kind. Fixed at construction.
    sinks: Vec<Box<dyn Sink>>,
}

impl Logger {
    pub(crate) fn new(name: &str, level: Level, sinks: Vec<Box<dyn Sink>>) -> Self {
        let mut attached: Vec<Box<dyn Sink>> = Vec::with_capacity(sinks.len());
        for sink in sinks {
            if attached.iter().all(|other| other.kind() != sink.kind()) {
                attached.push(sink);
            }
        }
        Self {
            name: name.to_string(),
            level: AtomicU8::new(level.value()),
            disabled: AtomicBool::new(false),
            sinks: attached,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the minimum level dispatched to the sinks.
    pub fn set_level(&self, level: Level) {
        self.level.store(level.value(), Ordering::Relaxed);
    }

    pub fn level(&self) -> Level {
        Level::from_value(self.level.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Loggers have no parent, so this is the logger's own level.
    pub fn effective_level(&self) -> Level {
        self.level()
    }

    pub fn is_enabled_for(&self, level: Level) -> bool {
        !self.disabled() && level >= self.level()
    }

    pub fn disabled(&self) -> bool {
        self.disabled.load(Ordering::Relaxed)
    }

    /// A disabled logger drops every record.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::Relaxed);
    }

    /// Kinds of the attached sinks, in attachment order.
    pub fn sinks(&self) -> Vec<SinkKind> {
        self.sinks.iter().map(|sink| sink.kind()).collect()
    }

    pub fn has_sinks(&self) -> bool {
        !self.sinks.is_empty()
    }

    pub fn debug(&self, message: impl Display) -> Result<()> {
        self.dispatch(Level::Debug, Method::Debug, message)
    }

    pub fn info(&self, message: impl Display) -> Result<()> {
        self.dispatch(Level::Info, Method::Info, message)
    }

    pub fn warning(&self, message: impl Display) -> Result<()> {
        self.dispatch(Level::Warning, Method::Warning, message)
    }

    pub fn error(&self, message: impl Display) -> Result<()> {
        self.dispatch(Level::Error, Method::Error, message)
    }

    /// Logs at ERROR with the chain of sources of `error` appended.
    pub fn exception<E: Error + ?Sized>(&self, message: impl Display, error: &E) -> Result<()> {
        let mut text = format!("{message}: {error}");
        let mut source = error.source();
        while let Some(cause) = source {
            text.push_str(&format!("\n  caused by: {cause}"));
            source = cause.source();
        }
        self.dispatch(Level::Error, Method::Exception, text)
    }

    /// Same severity as [`Logger::critical`]; host sinks raise an alert.
    pub fn fatal(&self, message: impl Display) -> Result<()> {
        self.dispatch(Level::FATAL, Method::Fatal, message)
    }

    /// Host sinks raise an alert for these records.
    pub fn critical(&self, message: impl Display) -> Result<()> {
        self.dispatch(Level::Critical, Method::Critical, message)
    }

    /// Logs at an arbitrary level. Records sent this way never escalate in
    /// host sinks, whatever their level.
    pub fn log(&self, level: Level, message: impl Display) -> Result<()> {
        self.dispatch(level, Method::Log, message)
    }

    fn dispatch(&self, level: Level, method: Method, message: impl Display) -> Result<()> {
        if !self.is_enabled_for(level) {
            return Ok(());
        }
        self.handle(&Record::new(&self.name, level, method, message))
    }

    /// Sends `record` to every sink, bypassing the level threshold.
    ///
    /// All sinks see the record even when one fails; the first failure is
    /// returned. A blocking host dialog holds up only the calling thread.
    pub fn handle(&self, record: &Record) -> Result<()> {
        if self.disabled() {
            return Ok(());
        }
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(error) = sink.emit(record) {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    pub fn flush(&self) -> Result<()> {
        let mut first_error = None;
        for sink in &self.sinks {
            if let Err(error) = sink.flush() {
                first_error.get_or_insert(error);
            }
        }
        first_error.map_or(Ok(()), Err)
    }

    /// Looks up a logger property by name, for callers driven by
    /// configuration strings.
    pub fn attribute(&self, name: &str) -> Result<Attribute> {
        match name {
            "name" => Ok(Attribute::Name(self.name.clone())),
            "level" => Ok(Attribute::Level(self.level())),
            "effective_level" => Ok(Attribute::Level(self.effective_level())),
            "disabled" => Ok(Attribute::Disabled(self.disabled())),
            "sinks" | "handlers" => Ok(Attribute::Sinks(self.sinks())),
            other => Err(LogError::NoAttribute(other.to_string())),
        }
    }
}

impl fmt::Display for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Logger({} Level:{})", self.name, self.level().value())
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex},
    };

    use super::*;

    #[derive(Default)]
    struct Counts {
        emitted: Vec<(Level, Method)>,
    }

    struct CountingSink {
        kind: SinkKind,
        counts: Arc<Mutex<Counts>>,
        fail: bool,
    }

    impl Sink for CountingSink {
        fn kind(&self) -> SinkKind {
            self.kind
        }
        fn emit(&self, record: &Record) -> Result<()> {
            self.counts
                .lock()
                .unwrap()
                .emitted
                .push((record.level(), record.method()));
            if self.fail {
                return Err(io::Error::other("sink down").into());
            }
            Ok(())
        }
    }

    fn counting(kind: SinkKind, counts: &Arc<Mutex<Counts>>, fail: bool) -> Box<dyn Sink> {
        Box::new(CountingSink {
            kind,
            counts: Arc::clone(counts),
            fail,
        })
    }

    #[test]
    fn test_threshold_filters_records() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let logger = Logger::new(
            "threshold",
            Level::Warning,
            vec![
                counting(SinkKind::Console, &counts, false),
                counting(SinkKind::File, &counts, false),
            ],
        );
        logger.debug("d").unwrap();
        logger.info("i").unwrap();
        assert!(counts.lock().unwrap().emitted.is_empty());

        logger.warning("w").unwrap();
        logger.error("e").unwrap();
        logger.critical("c").unwrap();
        let emitted = &counts.lock().unwrap().emitted;
        assert_eq!(emitted.len(), 6);
        assert_eq!(emitted[0], (Level::Warning, Method::Warning));
        assert_eq!(emitted[5], (Level::Critical, Method::Critical));
    }

    #[test]
    fn test_duplicate_sink_kinds_dropped() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let logger = Logger::new(
            "dupes",
            Level::Info,
            vec![
                counting(SinkKind::Console, &counts, false),
                counting(SinkKind::Console, &counts, false),
                counting(SinkKind::Maya, &counts, false),
            ],
        );
        assert_eq!(logger.sinks(), vec![SinkKind::Console, SinkKind::Maya]);
    }

    #[test]
    fn test_failure_reaches_remaining_sinks() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let logger = Logger::new(
            "failing",
            Level::Info,
            vec![
                counting(SinkKind::File, &counts, true),
                counting(SinkKind::Console, &counts, false),
            ],
        );
        assert!(matches!(logger.fatal("x"), Err(LogError::Io(_))));
        assert_eq!(counts.lock().unwrap().emitted.len(), 2);
    }

    #[test]
    fn test_fatal_and_critical_share_level() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let logger = Logger::new(
            "fatal",
            Level::Critical,
            vec![counting(SinkKind::Console, &counts, false)],
        );
        logger.error("dropped").unwrap();
        logger.fatal("kept").unwrap();
        logger.critical("kept").unwrap();
        let emitted = &counts.lock().unwrap().emitted;
        assert_eq!(
            *emitted,
            vec![
                (Level::Critical, Method::Fatal),
                (Level::Critical, Method::Critical)
            ]
        );
    }

    #[test]
    fn test_disabled_logger_drops_records() {
        let counts = Arc::new(Mutex::new(Counts::default()));
        let logger = Logger::new(
            "disabled",
            Level::NotSet,
            vec![counting(SinkKind::Console, &counts, false)],
        );
        logger.set_disabled(true);
        logger.critical("quiet").unwrap();
        assert!(!logger.is_enabled_for(Level::Critical));
        logger.set_disabled(false);
        logger.log(Level::NotSet, "loud").unwrap();
        assert_eq!(
            counts.lock().unwrap().emitted,
            vec![(Level::NotSet, Method::Log)]
        );
    }

    #[test]
    fn test_attribute_lookup() {
        let logger = Logger::new("attrs", Level::Debug, Vec::new());
        assert_eq!(
            logger.attribute("level").unwrap(),
            Attribute::Level(Level::Debug)
        );
        assert_eq!(logger.attribute("handlers").unwrap(), Attribute::Sinks(Vec::new()));
        let error = logger.attribute("propagate").unwrap_err();
        assert!(matches!(error, LogError::NoAttribute(ref name) if name == "propagate"));
        assert_eq!(error.to_string(), "No attribute propagate");
    }

    #[test]
    fn test_display() {
        let logger = Logger::new("display", Level::Warning, Vec::new());
        assert_eq!(logger.to_string(), "Logger(display Level:30)");
        assert!(!logger.has_sinks());
    }
}
