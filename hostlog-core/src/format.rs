use std::fmt::Display;

use colored::Colorize;

use crate::record::{Level, Record};

/// Timestamp layout of every formatted line, second resolution, local time.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Renders `YYYY-MM-DD HH:MM:SS <name> <LEVELNAME> : <message>`.
pub fn format_record(record: &Record) -> String {
    render(record, record.level().name())
}

/// Same layout as [`format_record`] with the level name coloured for terminals.
pub fn format_record_colored(record: &Record) -> String {
    let level = match record.level() {
        Level::Critical => "CRITICAL".red().bold(),
        Level::Error => "ERROR".red(),
        Level::Warning => "WARNING".yellow(),
        Level::Info => "INFO".green(),
        Level::Debug => "DEBUG".blue(),
        Level::NotSet => "NOTSET".purple(),
    };
    render(record, level)
}

fn render(record: &Record, level: impl Display) -> String {
    let time = record.timestamp().format(DATE_FORMAT);
    format!("{time} {} {level} : {}", record.name(), record.message())
}
