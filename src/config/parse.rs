use super::types::*;
use crate::config::{expand_env_vars, unexpanded_env_vars};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("validation failed:\n{}", .0.join("\n"))]
    ValidationList(Vec<String>),

    #[error("validation failed: {0}")]
    Validation(String),
}

pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let yaml_string = fs::read_to_string(path).map_err(|e| {
        ConfigError::Io(std::io::Error::new(
            e.kind(),
            format!("failed to read config file '{}': {}", path.display(), e),
        ))
    })?;

    load_config_str(&yaml_string)
}

/// Parse and validate config text. An empty document yields the defaults.
pub fn load_config_str(yaml_string: &str) -> Result<Config, ConfigError> {
    let yaml_string = expand_env_vars(yaml_string);
    check_unexpanded_vars(&yaml_string)?;

    let config: Config = if yaml_string.trim().is_empty() {
        Config::default()
    } else {
        serde_yaml::from_str(&yaml_string)?
    };

    validate_config(&config)?;

    Ok(config)
}

fn check_unexpanded_vars(yaml_string: &str) -> Result<(), ConfigError> {
    let unexpanded = unexpanded_env_vars(yaml_string);

    match unexpanded.as_slice() {
        [] => Ok(()),
        [name] => Err(ConfigError::Validation(format!(
            "Environment variable $env{{{name}}} is not set.\n\
             \n\
             Either export {name} or replace $env{{{name}}} in the config file with a literal value"
        ))),
        names => Err(ConfigError::Validation(format!(
            "Environment variables are not set: {}",
            names.join(", ")
        ))),
    }
}

fn validate_config(config: &Config) -> Result<(), ConfigError> {
    let mut errors = Vec::new();
    let formatter = &config.formatter;

    if let Err(e) = crate::formatter::Pattern::parse(&formatter.format) {
        errors.push(format!("formatter.format: {e}"));
    }

    if let Some(datefmt) = &formatter.datefmt {
        if let Err(e) = crate::formatter::strftime::validate(datefmt) {
            errors.push(format!("formatter.datefmt: {e}"));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationList(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = load_config_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.formatter.converter, ConverterKind::Utc);
    }

    #[test]
    fn test_collects_all_errors() {
        let result = load_config_str(
            r#"
formatter:
  format: '%(asctime)s %(thread)s'
  datefmt: '%H %Z'
"#,
        );

        match result {
            Err(ConfigError::ValidationList(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors[0].starts_with("formatter.format"));
                assert!(errors[1].starts_with("formatter.datefmt"));
            }
            other => panic!("expected validation list, got {other:?}"),
        }
    }

    #[test]
    fn test_unset_env_var_is_reported() {
        let result = load_config_str("formatter:\n  datefmt: '$env{UTCLOG_SURELY_UNSET}'\n");

        match result {
            Err(ConfigError::Validation(msg)) => assert!(msg.contains("UTCLOG_SURELY_UNSET")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_key_is_rejected() {
        let result = load_config_str("formatter:\n  timezone: EST\n");
        assert!(matches!(result, Err(ConfigError::YamlParse(_))));
    }
}
