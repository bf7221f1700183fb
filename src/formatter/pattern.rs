use super::FormatError;
use crate::record::LogRecord;
use regex::Regex;
use std::sync::OnceLock;

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(concat!(
            r"%(?:(?P<percent>%)|\((?P<key>[A-Za-z_]+)\)",
            r"(?P<flags>[-0]*)(?P<width>[1-9][0-9]*)?(?:\.(?P<prec>[0-9]+))?",
            r"(?P<conv>[sdf]))",
        ))
        .expect("placeholder regex is valid")
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Asctime,
    Created,
    Msecs,
    Levelname,
    Levelno,
    Name,
    Message,
}

impl Field {
    fn parse(key: &str) -> Option<Self> {
        let field = match key {
            "asctime" => Field::Asctime,
            "created" => Field::Created,
            "msecs" => Field::Msecs,
            "levelname" => Field::Levelname,
            "levelno" => Field::Levelno,
            "name" => Field::Name,
            "message" => Field::Message,
            _ => return None,
        };
        Some(field)
    }

    fn is_numeric(self) -> bool {
        matches!(self, Field::Created | Field::Msecs | Field::Levelno)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Conversion {
    Str,
    Int,
    Float,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Placeholder {
    field: Field,
    conversion: Conversion,
    left_align: bool,
    zero_pad: bool,
    width: usize,
    precision: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Placeholder),
}

/// A record layout such as `%(asctime)s %(levelname)s: %(message)s`, parsed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn parse(source: &str) -> Result<Self, FormatError> {
        let invalid = |reason: String| FormatError::InvalidPattern {
            pattern: source.to_string(),
            reason,
        };

        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut last = 0;

        for caps in placeholder_regex().captures_iter(source) {
            let whole = caps.get(0).expect("group 0 always matches");
            push_literal(&mut literal, &source[last..whole.start()]).map_err(&invalid)?;
            last = whole.end();

            if caps.name("percent").is_some() {
                literal.push('%');
                continue;
            }

            let key = &caps["key"];
            let field =
                Field::parse(key).ok_or_else(|| FormatError::UnknownField(key.to_string()))?;
            let conversion = match &caps["conv"] {
                "d" => Conversion::Int,
                "f" => Conversion::Float,
                _ => Conversion::Str,
            };
            if conversion != Conversion::Str && !field.is_numeric() {
                return Err(invalid(format!(
                    "'{key}' is text and cannot use a numeric conversion"
                )));
            }

            if !literal.is_empty() {
                segments.push(Segment::Literal(std::mem::take(&mut literal)));
            }
            // '-' wins over '0', as in printf
            let flags = caps.name("flags").map_or("", |f| f.as_str());
            let left_align = flags.contains('-');

            segments.push(Segment::Field(Placeholder {
                field,
                conversion,
                left_align,
                zero_pad: !left_align && flags.contains('0'),
                width: caps
                    .name("width")
                    .map_or(Ok(0), |w| w.as_str().parse())
                    .map_err(|e| invalid(format!("bad width: {e}")))?,
                precision: caps
                    .name("prec")
                    .map(|p| p.as_str().parse())
                    .transpose()
                    .map_err(|e| invalid(format!("bad precision: {e}")))?,
            }));
        }

        push_literal(&mut literal, &source[last..]).map_err(&invalid)?;
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether rendering needs the time field at all.
    pub fn uses_time(&self) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Field(p) if p.field == Field::Asctime))
    }

    /// Substitute record values. `asctime` must be supplied when [`Pattern::uses_time`] is true.
    pub fn render(&self, record: &LogRecord, asctime: Option<&str>) -> String {
        let mut out = String::new();

        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(placeholder) => {
                    let value = match placeholder.field {
                        Field::Asctime => Value::Text(asctime.unwrap_or_default()),
                        Field::Created => Value::Float(record.created),
                        Field::Msecs => Value::Float(record.msecs()),
                        Field::Levelname => Value::Text(record.level.as_str()),
                        Field::Levelno => Value::Int(i64::from(record.level.number())),
                        Field::Name => Value::Text(&record.name),
                        Field::Message => Value::Text(&record.message),
                    };
                    out.push_str(&placeholder.apply(value));
                }
            }
        }

        out
    }
}

fn push_literal(literal: &mut String, text: &str) -> Result<(), String> {
    if let Some(pos) = text.find('%') {
        return Err(format!("stray '%' near '{}'", &text[pos..]));
    }
    literal.push_str(text);
    Ok(())
}

enum Value<'a> {
    Text(&'a str),
    Int(i64),
    Float(f64),
}

impl Placeholder {
    fn apply(&self, value: Value<'_>) -> String {
        if self.left_align {
            let width = self.width;
            let text = Placeholder {
                left_align: false,
                width: 0,
                ..self.clone()
            }
            .apply(value);
            return format!("{text:<width$}");
        }

        let width = self.width;

        match (self.conversion, value) {
            (Conversion::Str, Value::Text(text)) => format!("{text:>width$}"),
            (Conversion::Str, Value::Int(n)) => format!("{n:>width$}"),
            (Conversion::Str, Value::Float(x)) => format!("{x:>width$}"),
            (Conversion::Int, value) => {
                let n = match value {
                    Value::Int(n) => n,
                    Value::Float(x) => x.trunc() as i64,
                    Value::Text(_) => 0,
                };
                if self.zero_pad {
                    format!("{n:0width$}")
                } else {
                    format!("{n:>width$}")
                }
            }
            (Conversion::Float, value) => {
                let x = match value {
                    Value::Int(n) => n as f64,
                    Value::Float(x) => x,
                    Value::Text(_) => 0.0,
                };
                let precision = self.precision.unwrap_or(6);
                if self.zero_pad {
                    format!("{x:0width$.precision$}")
                } else {
                    format!("{x:>width$.precision$}")
                }
            }
        }
    }
}
