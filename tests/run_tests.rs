use std::io::Cursor;
use utclog::cli::run::{format_stream, RunError, StreamStats};
use utclog::config::{load_config_str, OutputFormat};
use utclog::formatter::{LogFormatter, DEFAULT_FORMAT, ISO_DATE_FORMAT};

const INPUT: &str = r#"{"created": 0, "levelname": "INFO", "name": "a", "msg": "first"}

{"created": 1e20, "levelname": "ERROR", "name": "a", "msg": "too far"}
{"created": 1709294400, "levelname": "WARN", "name": "b", "msg": "second"}
"#;

#[test]
fn test_text_output_drops_unconvertible() {
    let formatter = LogFormatter::utc(DEFAULT_FORMAT, Some(ISO_DATE_FORMAT)).unwrap();
    let mut out = Vec::new();

    let stats =
        format_stream(Cursor::new(INPUT), &mut out, &formatter, OutputFormat::Text).unwrap();

    assert_eq!(
        stats,
        StreamStats {
            formatted: 2,
            skipped: 1
        }
    );
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "1970-01-01T00:00:00 INFO a: first\n2024-03-01T12:00:00 WARNING b: second\n"
    );
}

#[test]
fn test_json_output() {
    let formatter = LogFormatter::utc(DEFAULT_FORMAT, Some(ISO_DATE_FORMAT)).unwrap();
    let mut out = Vec::new();

    format_stream(Cursor::new(INPUT), &mut out, &formatter, OutputFormat::Json).unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<serde_json::Value> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1]["@timestamp"], "2024-03-01T12:00:00");
    assert_eq!(lines[1]["@severity"], "WARNING");
}

#[test]
fn test_json_output_from_config_uses_iso_time() {
    let config = load_config_str("formatter:\n  output: json\n").unwrap();
    let formatter = config.formatter.build().unwrap();
    let input = r#"{"created": 1709294400.5, "levelname": "INFO", "msg": "x"}"#;
    let mut out = Vec::new();

    format_stream(Cursor::new(input), &mut out, &formatter, config.formatter.output).unwrap();

    let line: serde_json::Value = serde_json::from_slice(&out).unwrap();
    assert_eq!(line["@timestamp"], "2024-03-01T12:00:00.500");
    assert_eq!(line["@name"], "root");
}

#[test]
fn test_malformed_line_is_an_error() {
    let formatter = LogFormatter::default();
    let mut out = Vec::new();
    let input = "{\"created\": 0, \"levelname\": \"INFO\", \"msg\": \"ok\"}\nnot json\n";

    let result = format_stream(Cursor::new(input), &mut out, &formatter, OutputFormat::Text);

    assert!(matches!(result, Err(RunError::MalformedRecord { line: 2, .. })));
}
