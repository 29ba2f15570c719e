//! Leveled, injectable console logging.

use std::cell::RefCell;
use std::fmt;
use std::io::Write;

use console::style;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug,
    Info,
    Warn,
    Error,
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        };
        f.write_str(name)
    }
}

pub trait Logger {
    fn log(&self, level: Level, message: &str);

    fn debug(&self, message: &str) {
        self.log(Level::Debug, message)
    }

    fn info(&self, message: &str) {
        self.log(Level::Info, message)
    }

    fn warn(&self, message: &str) {
        self.log(Level::Warn, message)
    }

    fn error(&self, message: &str) {
        self.log(Level::Error, message)
    }
}

/// Writes messages to stderr, colored by level.
#[derive(Debug, Clone)]
pub struct ConsoleLogger {
    min_level: Level,
    color: bool,
}

impl ConsoleLogger {
    pub fn new(min_level: Level, color: bool) -> Self {
        Self { min_level, color }
    }
}

impl Default for ConsoleLogger {
    fn default() -> Self {
        Self::new(Level::Info, true)
    }
}

impl ConsoleLogger {
    /// Colored message, or `[level] message` when color is off.
    pub fn format_line(&self, level: Level, message: &str) -> String {
        if !self.color {
            return format!("[{level}] {message}");
        }

        let styled = style(message).for_stderr();
        let styled = match level {
            Level::Debug => styled.blue(),
            Level::Info => styled.green(),
            Level::Warn => styled.yellow(),
            Level::Error => styled.red(),
        };
        styled.to_string()
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, level: Level, message: &str) {
        if level < self.min_level {
            return;
        }

        // Nothing sensible to do if stderr itself is gone.
        let _ = writeln!(std::io::stderr().lock(), "{}", self.format_line(level, message));
    }
}

/// Keeps every message in memory, in the order it was logged.
#[derive(Debug, Default)]
pub struct MemoryLogger {
    records: RefCell<Vec<(Level, String)>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(Level, String)> {
        self.records.borrow().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter(|(lvl, _)| *lvl == level)
            .map(|(_, message)| message.clone())
            .collect()
    }
}

impl Logger for MemoryLogger {
    fn log(&self, level: Level, message: &str) {
        self.records.borrow_mut().push((level, message.to_string()));
    }
}
