use chrono::{DateTime, Local};
use std::fmt;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::ScraperResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

/// Append-only lifecycle log for one process run.
///
/// Lines look like `[INFO] (2026-10-19 12:00:00.123456) message`. Each line is
/// also forwarded to the `log` facade so console output and the file agree.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Creates `log-<started_at>.txt` under `dir`.
    pub fn create<P: AsRef<Path>>(dir: P, started_at: DateTime<Local>) -> ScraperResult<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(format!(
            "log-{}.txt",
            started_at.format("%Y-%m-%d_%H-%M-%S%.6f")
        ));
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Info, message.as_ref());
    }

    pub fn error(&self, message: impl AsRef<str>) {
        self.write(LogLevel::Error, message.as_ref());
    }

    pub fn write(&self, level: LogLevel, message: &str) {
        match level {
            LogLevel::Info => log::info!("{}", message),
            LogLevel::Error => log::error!("{}", message),
        }

        let line = format_line(level, Local::now(), message);
        let result = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        // Log write failures are reported, never propagated.
        if let Err(e) = result {
            log::warn!("Failed to write to {}: {}", self.path.display(), e);
        }
    }
}

pub fn format_line(level: LogLevel, at: DateTime<Local>, message: &str) -> String {
    format!(
        "[{}] ({}) {}\n",
        level,
        at.format("%Y-%m-%d %H:%M:%S%.6f"),
        message
    )
}
