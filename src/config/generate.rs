pub fn generate_starter_config() -> String {
    r#"# =============================================================================
# UTCLOG CONFIGURATION
# =============================================================================
# Controls how `utclog run` renders log records.
#
# Config file locations (in order of precedence):
#   1. Path specified via --config argument
#   2. ~/.config/utclog/config.yml
#   3. /etc/utclog/config.yml
#
# Environment variables can be referenced as $env{...} anywhere in this file;
# they are substituted before parsing.

formatter:
  # Record layout. Available fields:
  #   %(asctime)s    time of the record, rendered through `converter`
  #   %(created)f    epoch seconds
  #   %(msecs)03d    millisecond part of the time
  #   %(levelname)s  DEBUG, INFO, WARNING, ERROR or CRITICAL
  #   %(levelno)d    10, 20, 30, 40 or 50
  #   %(name)s       logger name
  #   %(message)s    log message
  # Width and precision work as in printf: %(levelname)8s pads to 8 columns,
  # %(levelname)-8s pads on the right,
  # %(msecs)03d zero-pads, %(created).3f limits decimals. Write %% for '%'.
  format: '%(asctime)s %(levelname)s %(name)s: %(message)s'

  # strftime pattern for %(asctime)s. When omitted the time is written as
  # 'YYYY-MM-DD HH:MM:SS,mmm' for text output and 'YYYY-MM-DDTHH:MM:SS.mmm'
  # for json output. Timezone directives (%z, %Z) are rejected
  # because rendered times carry no offset.
  # datefmt: '%Y-%m-%dT%H:%M:%S'

  # How epoch seconds become calendar time:
  #   utc    Coordinated Universal Time, identical on every host
  #   local  the host's configured timezone
  converter: utc

  # text: one line per record using `format`
  # json: {"@timestamp", "@severity", "@name", "message"} objects
  output: text
"#
    .to_string()
}
