use crate::convert::{epoch_now, subsec_millis, TimeConverter, UtcConverter};
use crate::formatter::{strftime, FormatError, ISO_DATE_FORMAT};
use std::fmt::{self, Write};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::FormatTime;

/// Timestamp strategy for `tracing_subscriber` fmt layers backed by a [`TimeConverter`].
///
/// ```no_run
/// use utclog::timer::ConverterTimer;
///
/// tracing_subscriber::fmt()
///     .with_timer(ConverterTimer::utc())
///     .init();
/// ```
#[derive(Debug, Clone)]
pub struct ConverterTimer<C = UtcConverter> {
    converter: C,
    datefmt: String,
    millis: bool,
    suffix: String,
}

impl ConverterTimer<UtcConverter> {
    /// `2024-03-01T12:00:00.000Z`
    pub fn utc() -> Self {
        Self {
            converter: UtcConverter,
            datefmt: ISO_DATE_FORMAT.to_string(),
            millis: true,
            suffix: "Z".to_string(),
        }
    }
}

impl<C: TimeConverter> ConverterTimer<C> {
    pub fn new(converter: C, datefmt: impl Into<String>) -> Result<Self, FormatError> {
        let datefmt = datefmt.into();
        strftime::validate(&datefmt)?;

        Ok(Self {
            converter,
            datefmt,
            millis: false,
            suffix: String::new(),
        })
    }

    pub fn with_millis(mut self, millis: bool) -> Self {
        self.millis = millis;
        self
    }

    pub fn with_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.suffix = suffix.into();
        self
    }

    pub fn render_at(&self, secs: f64) -> Result<String, FormatError> {
        let tm = self.converter.convert(secs)?;
        let mut out = strftime::render(&tm, &self.datefmt)?;

        if self.millis {
            out.push_str(&format!(".{:03}", subsec_millis(secs)));
        }
        out.push_str(&self.suffix);

        Ok(out)
    }
}

impl<C: TimeConverter> FormatTime for ConverterTimer<C> {
    fn format_time(&self, w: &mut Writer<'_>) -> fmt::Result {
        // Never log from here: this runs inside the subscriber.
        let text = self.render_at(epoch_now()).map_err(|_| fmt::Error)?;
        w.write_str(&text)
    }
}
