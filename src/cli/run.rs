use crate::config::{load_config, Config, ConfigError, OutputFormat};
use crate::formatter::{FormatError, LogFormatter};
use crate::record::LogRecord;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum RunError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("formatter error: {0}")]
    Formatter(#[from] FormatError),

    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("line {line}: malformed record: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StreamStats {
    pub formatted: usize,
    pub skipped: usize,
}

pub fn run(config_path: Option<PathBuf>, input: Option<PathBuf>) -> Result<(), RunError> {
    let config = match config_path {
        Some(path) => {
            info!(config_path = %path.display(), "Loading configuration");
            load_config(&path)?
        }
        None => {
            info!("No config file found, using built-in defaults");
            Config::default()
        }
    };

    let formatter = config.formatter.build()?;
    info!(
        converter = ?config.formatter.converter,
        output = ?config.formatter.output,
        "Formatter ready"
    );

    let stdout = io::stdout();
    let mut out = stdout.lock();

    let output = config.formatter.output;
    let stats = match input {
        Some(path) => format_stream(open_input(&path)?, &mut out, &formatter, output)?,
        None => format_stream(io::stdin().lock(), &mut out, &formatter, output)?,
    };

    info!(
        formatted = stats.formatted,
        skipped = stats.skipped,
        "Input exhausted"
    );

    Ok(())
}

fn open_input(path: &Path) -> Result<BufReader<File>, RunError> {
    let file = File::open(path).map_err(|e| {
        io::Error::new(e.kind(), format!("failed to open '{}': {}", path.display(), e))
    })?;
    Ok(BufReader::new(file))
}

/// Format JSON-line records from `reader` into `writer`, one output line each.
///
/// Records whose timestamp cannot be converted are dropped with a warning.
/// Malformed JSON and every other failure end the stream.
pub fn format_stream<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
    formatter: &LogFormatter,
    output: OutputFormat,
) -> Result<StreamStats, RunError> {
    let mut stats = StreamStats::default();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = index + 1;

        if line.trim().is_empty() {
            continue;
        }

        let record: LogRecord =
            serde_json::from_str(&line).map_err(|source| RunError::MalformedRecord {
                line: line_number,
                source,
            })?;

        let rendered = match output {
            OutputFormat::Text => formatter.format(&record),
            OutputFormat::Json => formatter.format_json(&record),
        };

        match rendered {
            Ok(text) => {
                writeln!(writer, "{text}")?;
                stats.formatted += 1;
            }
            Err(FormatError::Convert(e)) => {
                warn!(
                    line = line_number,
                    error = %e,
                    "Dropping record with unconvertible timestamp"
                );
                stats.skipped += 1;
            }
            Err(e) => return Err(e.into()),
        }
    }

    writer.flush()?;
    debug!(?stats, "Stream formatted");

    Ok(stats)
}
