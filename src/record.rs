use crate::convert::{epoch_now, split_epoch};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Level {
    Debug,
    Info,
    #[serde(alias = "WARN")]
    Warning,
    Error,
    #[serde(alias = "FATAL")]
    Critical,
}

impl Level {
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
            Level::Critical => "CRITICAL",
        }
    }

    /// Numeric severity, spaced by ten so intermediate levels can slot in.
    pub fn number(self) -> u32 {
        match self {
            Level::Debug => 10,
            Level::Info => 20,
            Level::Warning => 30,
            Level::Error => 40,
            Level::Critical => 50,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_name() -> String {
    "root".to_string()
}

/// A single log event as seen by the formatter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Epoch seconds at which the event was created.
    pub created: f64,
    #[serde(rename = "levelname")]
    pub level: Level,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(rename = "msg", alias = "message")]
    pub message: String,
}

impl LogRecord {
    pub fn new(
        created: f64,
        level: Level,
        name: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            created,
            level,
            name: name.into(),
            message: message.into(),
        }
    }

    /// Stamp a record with the current wall clock.
    pub fn now(level: Level, name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(epoch_now(), level, name, message)
    }

    /// Millisecond part of `created`, taken from the same floored split the
    /// converter uses, so it stays below 1000.
    pub fn msecs(&self) -> f64 {
        split_epoch(self.created).map_or(0.0, |(_, nanos)| f64::from(nanos) / 1e6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_json_line() {
        let record: LogRecord = serde_json::from_str(
            r#"{"created": 1709294400.25, "levelname": "INFO", "name": "tcs", "msg": "slewing"}"#,
        )
        .unwrap();

        assert_eq!(record.created, 1709294400.25);
        assert_eq!(record.level, Level::Info);
        assert_eq!(record.name, "tcs");
        assert_eq!(record.message, "slewing");
    }

    #[test]
    fn test_deserialize_defaults_and_aliases() {
        let record: LogRecord =
            serde_json::from_str(r#"{"created": 0, "levelname": "FATAL", "message": "down"}"#)
                .unwrap();

        assert_eq!(record.level, Level::Critical);
        assert_eq!(record.name, "root");
        assert_eq!(record.message, "down");

        let warn: Level = serde_json::from_str(r#""WARN""#).unwrap();
        assert_eq!(warn, Level::Warning);
    }

    #[test]
    fn test_unknown_level_is_rejected() {
        let result = serde_json::from_str::<LogRecord>(
            r#"{"created": 0, "levelname": "NOTICE", "msg": "x"}"#,
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_msecs() {
        let record = LogRecord::new(10.5, Level::Debug, "a", "b");
        assert_eq!(record.msecs(), 500.0);

        let before_epoch = LogRecord::new(-0.25, Level::Debug, "a", "b");
        assert_eq!(before_epoch.msecs(), 750.0);
    }

    #[test]
    fn test_msecs_below_one_second_for_tiny_negative() {
        let record = LogRecord::new(-1e-17, Level::Debug, "a", "b");
        assert!(record.msecs() < 1000.0);
        assert_eq!(record.msecs().trunc(), 999.0);
    }

    #[test]
    fn test_level_ordering_and_numbers() {
        assert!(Level::Debug < Level::Critical);
        assert_eq!(Level::Warning.number(), 30);
        assert_eq!(Level::Warning.to_string(), "WARNING");
    }

    #[test]
    fn test_now_is_after_2020() {
        let record = LogRecord::now(Level::Info, "clock", "tick");
        assert!(record.created > 1_577_836_800.0);
    }
}
