pub mod generate;
pub mod parse;
pub mod types;

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

pub use parse::{load_config, load_config_str, ConfigError};
pub use types::{Config, ConverterKind, FormatterConfig, OutputFormat};

const USER_CONFIG: &str = ".config/utclog/config.yml";
const SYSTEM_CONFIG: &str = "/etc/utclog/config.yml";

fn env_var_regex() -> &'static Regex {
    static ENV_VAR: OnceLock<Regex> = OnceLock::new();
    ENV_VAR.get_or_init(|| {
        Regex::new(r"\$env\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("env var regex is valid")
    })
}

/// Expands `$env{VAR_NAME}` references. Unset variables are left as written
/// so validation can name them.
pub fn expand_env_vars(text: &str) -> String {
    env_var_regex()
        .replace_all(text, |caps: &regex::Captures| {
            std::env::var(&caps[1]).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Names of `$env{...}` references still present in `text`, sorted and deduplicated.
pub fn unexpanded_env_vars(text: &str) -> Vec<String> {
    let mut names: Vec<String> = env_var_regex()
        .captures_iter(text)
        .map(|caps| caps[1].to_string())
        .collect();
    names.sort();
    names.dedup();
    names
}

/// Replaces a leading `~` with the home directory when one is known.
pub fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    match (path_str.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        (None, Some(home)) if path_str == "~" => home,
        _ => path.to_path_buf(),
    }
}

/// Path of the per-user config file, if a home directory is known.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(USER_CONFIG))
}

pub fn system_config_path() -> PathBuf {
    PathBuf::from(SYSTEM_CONFIG)
}

/// Picks the config file to load:
/// 1. explicit path (tilde-expanded, not checked for existence)
/// 2. ~/.config/utclog/config.yml
/// 3. /etc/utclog/config.yml
///
/// None means built-in defaults apply.
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(expand_tilde(path));
    }

    user_config_path()
        .filter(|path| path.exists())
        .or_else(|| Some(system_config_path()).filter(|path| path.exists()))
}
