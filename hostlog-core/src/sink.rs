use std::{
    fmt,
    fs::File,
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
    sync::{Mutex, MutexGuard, PoisonError},
};

use crate::{
    config::HOSTLOG_CONFIG,
    error::{LogError, Result},
    format::{format_record, format_record_colored},
    record::Record,
};

/// Destination type of a sink. A logger holds at most one sink per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Console,
    File,
    Maya,
    Nuke,
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SinkKind::Console => "console",
            SinkKind::File => "file",
            SinkKind::Maya => "maya",
            SinkKind::Nuke => "nuke",
        };
        f.write_str(name)
    }
}

/// A destination receiving records from a logger.
///
/// `emit` takes `&self` so a sink that blocks (a host dialog) holds up only
/// the calling thread; sinks owning a handle lock it themselves.
pub trait Sink: Send + Sync {
    fn kind(&self) -> SinkKind;
    fn emit(&self, record: &Record) -> Result<()>;
    fn flush(&self) -> Result<()> {
        Ok(())
    }
}

enum ConsoleOut {
    Stdout,
    Writer(Mutex<Box<dyn Write + Send>>),
}

/// Writes formatted lines to the process stdout.
///
/// `io::stdout` is file descriptor 1 itself, so lines reach the terminal once
/// even when a host captures its own script-level output.
pub struct ConsoleSink {
    out: ConsoleOut,
    colored: bool,
}

impl ConsoleSink {
    pub fn stdout() -> Self {
        Self {
            out: ConsoleOut::Stdout,
            colored: HOSTLOG_CONFIG.COLOR,
        }
    }

    /// Console sink writing to `writer` instead of stdout.
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            out: ConsoleOut::Writer(Mutex::new(Box::new(writer))),
            colored: false,
        }
    }

    pub fn colored(self, yes: bool) -> Self {
        Self {
            colored: yes,
            ..self
        }
    }
}

impl Sink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn emit(&self, record: &Record) -> Result<()> {
        let line = if self.colored {
            format_record_colored(record)
        } else {
            format_record(record)
        };
        match &self.out {
            ConsoleOut::Stdout => {
                let mut stdout = io::stdout().lock();
                writeln!(stdout, "{line}")?;
                stdout.flush()?;
            }
            ConsoleOut::Writer(writer) => {
                let mut writer = writer.lock().unwrap_or_else(PoisonError::into_inner);
                writeln!(writer, "{line}")?;
                writer.flush()?;
            }
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        match &self.out {
            ConsoleOut::Stdout => io::stdout().flush()?,
            ConsoleOut::Writer(writer) => writer
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .flush()?,
        }
        Ok(())
    }
}

/// Appends formatted lines to a file.
///
/// The file is created if missing and opened on the first record, then kept
/// open for the lifetime of the sink.
pub struct FileSink {
    path: PathBuf,
    file: Mutex<Option<BufWriter<File>>>,
}

impl FileSink {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            file: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_open(&self) -> bool {
        self.lock_file().is_some()
    }

    fn lock_file(&self) -> MutexGuard<'_, Option<BufWriter<File>>> {
        self.file.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn file_error(&self, source: io::Error) -> LogError {
        LogError::File {
            path: self.path.clone(),
            source,
        }
    }
}

fn open_log_file(path: &Path) -> io::Result<BufWriter<File>> {
    let file = File::options().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

impl Sink for FileSink {
    fn kind(&self) -> SinkKind {
        SinkKind::File
    }

    fn emit(&self, record: &Record) -> Result<()> {
        let line = format_record(record);
        let mut guard = self.lock_file();
        let file = match guard.take() {
            Some(file) => file,
            None => open_log_file(&self.path).map_err(|source| self.file_error(source))?,
        };
        let file = guard.insert(file);
        writeln!(file, "{line}")
            .and_then(|()| file.flush())
            .map_err(|source| self.file_error(source))
    }

    fn flush(&self) -> Result<()> {
        if let Some(file) = self.lock_file().as_mut() {
            file.flush().map_err(|source| self.file_error(source))?;
        }
        Ok(())
    }
}
