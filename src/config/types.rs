use crate::convert::{LocalConverter, UtcConverter};
use crate::formatter::{FormatError, LogFormatter, DEFAULT_FORMAT};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub formatter: FormatterConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FormatterConfig {
    #[serde(default = "default_format")]
    pub format: String,
    #[serde(default)]
    pub datefmt: Option<String>,
    #[serde(default)]
    pub converter: ConverterKind,
    #[serde(default)]
    pub output: OutputFormat,
}

fn default_format() -> String {
    DEFAULT_FORMAT.to_string()
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            datefmt: None,
            converter: ConverterKind::default(),
            output: OutputFormat::default(),
        }
    }
}

impl FormatterConfig {
    pub fn build(&self) -> Result<LogFormatter, FormatError> {
        let datefmt = self.datefmt.as_deref();
        match self.converter {
            ConverterKind::Utc => LogFormatter::new(&self.format, datefmt, UtcConverter),
            ConverterKind::Local => LogFormatter::new(&self.format, datefmt, LocalConverter),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConverterKind {
    #[default]
    Utc,
    Local,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}
