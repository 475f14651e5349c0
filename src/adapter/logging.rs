//! Logging Setup
//!
//! `LOG_LEVEL` の解決と env_logger の初期化

use anyhow::{Context, Result};
use chrono::Local;
use log::{Level, LevelFilter};
use std::fmt::{Arguments, Display};
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;

pub const LOG_LEVEL_KEY: &str = "LOG_LEVEL";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%z";

/// Accepted `LOG_LEVEL` values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
    Fatal,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown log level \"{0}\"")]
pub struct UnknownLogLevel(pub String);

impl FromStr for LogLevel {
    type Err = UnknownLogLevel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "DEBUG" => Ok(Self::Debug),
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            "FATAL" => Ok(Self::Fatal),
            _ => Err(UnknownLogLevel(s.to_string())),
        }
    }
}

/// Outcome of reading `LOG_LEVEL`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelResolution {
    pub level: LogLevel,
    /// The raw value when it was not accepted and INFO was used instead.
    pub rejected: Option<String>,
}

impl LogLevel {
    /// Resolves the effective level. Never fails: unknown values fall back to INFO.
    pub fn resolve(raw: Option<&str>) -> LevelResolution {
        match raw.filter(|v| !v.trim().is_empty()) {
            None => LevelResolution {
                level: LogLevel::Info,
                rejected: None,
            },
            Some(value) => match value.parse::<LogLevel>() {
                Ok(level) => LevelResolution {
                    level,
                    rejected: None,
                },
                Err(_) => LevelResolution {
                    level: LogLevel::Info,
                    rejected: Some(value.to_string()),
                },
            },
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARNING",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// `log` has no FATAL, so it shares ERROR's filter.
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Warning => LevelFilter::Warn,
            LogLevel::Error | LogLevel::Fatal => LevelFilter::Error,
        }
    }
}

fn level_label(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARNING",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

/// Builds one log line (without the trailing newline).
fn format_line(
    timestamp: impl Display,
    level: Level,
    file: Option<&str>,
    line: Option<u32>,
    args: &Arguments<'_>,
) -> String {
    format!(
        "{} {:<4} [{}:{}] - {}",
        timestamp,
        level_label(level),
        file.unwrap_or("unknown"),
        line.unwrap_or(0),
        args
    )
}

/// Installs the global logger.
///
/// Lines look like `2026-10-16T09:30:00+0000 INFO [src/main.rs:40] - message`.
/// `RUST_LOG` is not consulted.
#[cfg_attr(coverage_nightly, coverage(off))]
pub fn init_logger(level: LogLevel) -> Result<()> {
    env_logger::Builder::new()
        .filter_level(level.to_level_filter())
        .format(|buf, record| {
            writeln!(
                buf,
                "{}",
                format_line(
                    Local::now().format(TIMESTAMP_FORMAT),
                    record.level(),
                    record.file(),
                    record.line(),
                    record.args(),
                )
            )
        })
        .try_init()
        .context("Failed to initialize logger")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_accepted_levels() {
        for (raw, expected) in [
            ("DEBUG", LogLevel::Debug),
            ("INFO", LogLevel::Info),
            ("WARNING", LogLevel::Warning),
            ("ERROR", LogLevel::Error),
            ("FATAL", LogLevel::Fatal),
        ] {
            let resolution = LogLevel::resolve(Some(raw));
            assert_eq!(resolution.level, expected, "{}", raw);
            assert_eq!(resolution.rejected, None);
        }
    }

    #[test]
    fn test_resolve_is_case_insensitive() {
        assert_eq!(LogLevel::resolve(Some("debug")).level, LogLevel::Debug);
        assert_eq!(LogLevel::resolve(Some(" Warning ")).level, LogLevel::Warning);
    }

    #[test]
    fn test_resolve_unknown_falls_back_to_info() {
        for raw in ["VERBOSE", "WARN", "CRITICAL", "10", "trace"] {
            let resolution = LogLevel::resolve(Some(raw));
            assert_eq!(resolution.level, LogLevel::Info, "{}", raw);
            assert_eq!(resolution.rejected.as_deref(), Some(raw));
        }
    }

    #[test]
    fn test_resolve_unset_is_info_without_warning() {
        assert_eq!(
            LogLevel::resolve(None),
            LevelResolution {
                level: LogLevel::Info,
                rejected: None
            }
        );
        assert_eq!(LogLevel::resolve(Some("")).rejected, None);
    }

    #[test]
    fn test_level_filter_mapping() {
        assert_eq!(LogLevel::Warning.to_level_filter(), LevelFilter::Warn);
        assert_eq!(LogLevel::Fatal.to_level_filter(), LevelFilter::Error);
        assert_eq!(LogLevel::Debug.to_level_filter(), LevelFilter::Debug);
    }

    #[test]
    fn test_level_label_uses_warning() {
        assert_eq!(level_label(Level::Warn), "WARNING");
        assert_eq!(level_label(Level::Info), "INFO");
    }

    #[test]
    fn test_format_line_layout() {
        let line = format_line(
            "2026-10-16T09:30:00+0000",
            Level::Info,
            Some("src/x.rs"),
            Some(7),
            &format_args!("msg {}", 1),
        );
        assert_eq!(line, "2026-10-16T09:30:00+0000 INFO [src/x.rs:7] - msg 1");
    }

    #[test]
    fn test_format_line_warning_label_and_missing_location() {
        let warn = format_line("ts", Level::Warn, Some("a.rs"), Some(1), &format_args!("w"));
        assert_eq!(warn, "ts WARNING [a.rs:1] - w");

        let unknown = format_line("ts", Level::Trace, None, None, &format_args!("t"));
        assert_eq!(unknown, "ts TRACE [unknown:0] - t");
    }

    #[test]
    fn test_format_line_with_chrono_timestamp() {
        let ts = chrono::NaiveDate::from_ymd_opt(2026, 10, 16)
            .and_then(|d| d.and_hms_opt(9, 30, 0))
            .unwrap()
            .and_utc();
        let line = format_line(
            ts.format(TIMESTAMP_FORMAT),
            Level::Error,
            Some("src/main.rs"),
            Some(40),
            &format_args!("boom"),
        );
        assert_eq!(line, "2026-10-16T09:30:00+0000 ERROR [src/main.rs:40] - boom");
    }

    #[test]
    fn test_as_str_round_trips() {
        for level in [
            LogLevel::Debug,
            LogLevel::Info,
            LogLevel::Warning,
            LogLevel::Error,
            LogLevel::Fatal,
        ] {
            assert_eq!(level.as_str().parse::<LogLevel>().unwrap(), level);
        }
    }
}
