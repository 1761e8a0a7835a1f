use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;

use chrono::Utc;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
  Debug,
  Info,
  Warn,
  Error,
}

impl LogLevel {
  pub fn parse(value: &str) -> Self {
    match value.to_ascii_lowercase().as_str() {
      "debug" => LogLevel::Debug,
      "warn" | "warning" => LogLevel::Warn,
      "error" => LogLevel::Error,
      _ => LogLevel::Info,
    }
  }

  fn as_str(self) -> &'static str {
    match self {
      LogLevel::Debug => "DEBUG",
      LogLevel::Info => "INFO",
      LogLevel::Warn => "WARN",
      LogLevel::Error => "ERROR",
    }
  }
}

pub struct Logger {
  min_level: LogLevel,
  file: Mutex<std::fs::File>,
}

impl Logger {
  pub fn new(path: &Path, min_level: LogLevel) -> anyhow::Result<Self> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(Self {
      min_level,
      file: Mutex::new(file),
    })
  }

  pub fn log(&self, level: LogLevel, message: &str) {
    if level < self.min_level {
      return;
    }
    let ts = Utc::now().to_rfc3339();
    let line = format!("[{ts}] {}: {message}", level.as_str());
    eprintln!("{line}");
    if let Ok(mut file) = self.file.lock() {
      let _ = writeln!(file, "{line}");
    }
  }

  pub fn debug(&self, message: &str) {
    self.log(LogLevel::Debug, message);
  }

  pub fn info(&self, message: &str) {
    self.log(LogLevel::Info, message);
  }

  pub fn warn(&self, message: &str) {
    self.log(LogLevel::Warn, message);
  }

  pub fn error(&self, message: &str) {
    self.log(LogLevel::Error, message);
  }
}
