use crate::config::ConverterKind;
use crate::convert::{BrokenDownTime, ConvertError, LocalConverter, TimeConverter, UtcConverter};
use serde::Serialize;
use std::io::{self, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertCommandError {
    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error("output error: {0}")]
    Io(#[from] io::Error),

    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize)]
struct Conversion<'a> {
    secs: f64,
    converter: ConverterKind,
    time: &'a BrokenDownTime,
}

pub fn convert(timestamps: &[f64], kind: ConverterKind) -> Result<(), ConvertCommandError> {
    let stdout = io::stdout();
    write_conversions(&mut stdout.lock(), timestamps, kind)
}

/// Write one JSON object per timestamp. The first conversion failure stops output
/// and is returned as-is.
pub fn write_conversions<W: Write>(
    out: &mut W,
    timestamps: &[f64],
    kind: ConverterKind,
) -> Result<(), ConvertCommandError> {
    let converter: &dyn TimeConverter = match kind {
        ConverterKind::Utc => &UtcConverter,
        ConverterKind::Local => &LocalConverter,
    };

    for &secs in timestamps {
        let time = converter.convert(secs)?;
        let line = serde_json::to_string(&Conversion {
            secs,
            converter: kind,
            time: &time,
        })?;
        writeln!(out, "{line}")?;
    }

    Ok(())
}
