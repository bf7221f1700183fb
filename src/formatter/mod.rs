pub mod pattern;
pub mod strftime;

use crate::convert::{subsec_millis, BrokenDownTime, ConvertError, TimeConverter, UtcConverter};
use crate::record::LogRecord;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

pub use pattern::Pattern;

pub const DEFAULT_FORMAT: &str = "%(asctime)s %(levelname)s %(name)s: %(message)s";
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Error, PartialEq)]
pub enum FormatError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("invalid date format '{datefmt}': {reason}")]
    InvalidDateFormat {
        datefmt: String,
        reason: &'static str,
    },

    #[error("unknown record field '{0}'")]
    UnknownField(String),

    #[error("invalid format pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("converter produced fields that are not a calendar instant: {0:?}")]
    InvalidTime(BrokenDownTime),

    #[error("JSON encoding failed: {0}")]
    Json(String),
}

/// Turns log records into text.
///
/// The time field goes through the installed [`TimeConverter`]. Nothing
/// about it is read from the process environment: a formatter built with
/// [`LogFormatter::utc`] renders the same text on every host.
#[derive(Clone)]
pub struct LogFormatter {
    pattern: Pattern,
    datefmt: Option<String>,
    converter: Arc<dyn TimeConverter>,
}

impl LogFormatter {
    pub fn new<C>(fmt: &str, datefmt: Option<&str>, converter: C) -> Result<Self, FormatError>
    where
        C: TimeConverter + 'static,
    {
        let pattern = Pattern::parse(fmt)?;
        if let Some(datefmt) = datefmt {
            strftime::validate(datefmt)?;
        }

        Ok(Self {
            pattern,
            datefmt: datefmt.map(str::to_string),
            converter: Arc::new(converter),
        })
    }

    pub fn utc(fmt: &str, datefmt: Option<&str>) -> Result<Self, FormatError> {
        Self::new(fmt, datefmt, UtcConverter)
    }

    /// Replace the time-conversion strategy on this instance.
    pub fn set_converter<C>(&mut self, converter: C)
    where
        C: TimeConverter + 'static,
    {
        self.converter = Arc::new(converter);
    }

    pub fn with_converter<C>(mut self, converter: C) -> Self
    where
        C: TimeConverter + 'static,
    {
        self.set_converter(converter);
        self
    }

    pub fn converter(&self) -> &dyn TimeConverter {
        self.converter.as_ref()
    }

    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn datefmt(&self) -> Option<&str> {
        self.datefmt.as_deref()
    }

    /// Render the record's creation time.
    ///
    /// With a `datefmt` the pattern alone decides the output. Without one the
    /// result is `YYYY-MM-DD HH:MM:SS,mmm`.
    pub fn format_time(&self, record: &LogRecord) -> Result<String, FormatError> {
        self.render_time(record, DEFAULT_DATE_FORMAT, ',')
    }

    fn render_time(
        &self,
        record: &LogRecord,
        fallback: &str,
        millis_separator: char,
    ) -> Result<String, FormatError> {
        let tm = self.converter.convert(record.created)?;

        match &self.datefmt {
            Some(datefmt) => strftime::render(&tm, datefmt),
            None => {
                let base = strftime::render(&tm, fallback)?;
                let millis = subsec_millis(record.created);
                Ok(format!("{base}{millis_separator}{millis:03}"))
            }
        }
    }

    pub fn format(&self, record: &LogRecord) -> Result<String, FormatError> {
        let asctime = if self.pattern.uses_time() {
            Some(self.format_time(record)?)
        } else {
            None
        };

        Ok(self.pattern.render(record, asctime.as_deref()))
    }

    /// Render the record as one JSON object in the aggregator layout.
    ///
    /// Without a `datefmt` the timestamp is ISO-8601 with milliseconds,
    /// `YYYY-MM-DDTHH:MM:SS.mmm`.
    pub fn format_json(&self, record: &LogRecord) -> Result<String, FormatError> {
        let timestamp = self.render_time(record, ISO_DATE_FORMAT, '.')?;
        let line = serde_json::json!({
            "@timestamp": timestamp,
            "@severity": record.level.as_str(),
            "@name": record.name,
            "message": record.message,
        });

        serde_json::to_string(&line).map_err(|e| FormatError::Json(e.to_string()))
    }
}

impl Default for LogFormatter {
    fn default() -> Self {
        Self {
            pattern: Pattern::parse(DEFAULT_FORMAT).expect("default format is valid"),
            datefmt: None,
            converter: Arc::new(UtcConverter),
        }
    }
}

impl fmt::Debug for LogFormatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogFormatter")
            .field("pattern", &self.pattern.as_str())
            .field("datefmt", &self.datefmt)
            .finish_non_exhaustive()
    }
}
