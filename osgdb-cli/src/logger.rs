//! Console logger behind the `log` facade.
//!
//! Info goes to stdout, warnings and errors to stderr. `--quiet` keeps only
//! warnings and errors, `--verbose` adds debug messages from the osgdb
//! crates and prefixes every line with a timestamp. `--logfile` copies every
//! printed line to a file with ANSI escapes removed.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stderr;

pub(crate) struct CliLogger {
    level: LevelFilter,
    timestamps: bool,
    file: Option<Mutex<File>>,
}

impl CliLogger {
    pub(crate) fn new(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<Self> {
        let level = if quiet {
            LevelFilter::Warn
        } else if verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        };
        let file = match logfile {
            Some(path) => Some(Mutex::new(File::create(path)?)),
            None => None,
        };
        Ok(Self {
            level,
            timestamps: verbose,
            file,
        })
    }

    pub(crate) fn level(&self) -> LevelFilter {
        self.level
    }

    /// Install as the global logger.
    pub(crate) fn install(self) -> Result<(), log::SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level);
        Ok(())
    }

    fn format_line(&self, record: &Record) -> String {
        let message = record.args().to_string();
        let message = match record.level() {
            Level::Error => format!(
                "{} {message}",
                "error:".if_supports_color(Stderr, |t| t.red())
            ),
            _ => message,
        };
        if self.timestamps {
            format!(
                "[{} {:<5}] {message}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level()
            )
        } else {
            message
        }
    }
}

impl Log for CliLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        if metadata.level() > self.level {
            return false;
        }
        // dependencies are noisy below warn
        metadata.level() <= Level::Warn || metadata.target().starts_with("osgdb")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = self.format_line(record);
        if record.level() <= Level::Warn {
            eprintln!("{line}");
        } else {
            println!("{line}");
        }

        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = writeln!(file, "{}", strip_ansi_escapes::strip_str(&line));
            }
        }
    }

    fn flush(&self) {
        let _ = io::stdout().flush();
        if let Some(file) = &self.file {
            if let Ok(mut file) = file.lock() {
                let _ = file.flush();
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/logger_tests.rs"]
mod tests;
