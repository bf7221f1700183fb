use crate::config::generate::generate_starter_config;
use crate::config::{load_config, system_config_path, user_config_path};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::warn;

pub fn init(stdout: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config_content = generate_starter_config();

    if stdout {
        print!("{}", config_content);
        return Ok(());
    }

    let config_path = default_write_path();
    write_config(&config_path, &config_content)?;
    println!("Config file written to {}", config_path.display());
    Ok(())
}

/// The user config location when its directory can be created, else the system one.
fn default_write_path() -> PathBuf {
    if let Some(user_config) = user_config_path() {
        match user_config.parent().map(fs::create_dir_all) {
            Some(Ok(())) => return user_config,
            Some(Err(e)) => warn!(
                path = %user_config.display(),
                error = %e,
                "Could not create user config directory, falling back to system config"
            ),
            None => {}
        }
    }

    system_config_path()
}

/// Write a config file, refusing to replace an existing one.
pub fn write_config(path: &Path, config_content: &str) -> io::Result<()> {
    if path.exists() {
        return Err(io::Error::new(
            io::ErrorKind::AlreadyExists,
            format!(
                "config file already exists at {}; remove it first or use --stdout",
                path.display()
            ),
        ));
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, config_content)
}

pub fn validate(config_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    let path = config_path.ok_or("No config file found. Use --config to specify a path.")?;

    println!("Validating config file: {}", path.display());

    match load_config(&path) {
        Ok(_) => {
            println!("✓ Config is valid");
            Ok(())
        }
        Err(e) => {
            eprintln!("✗ Config validation failed:\n{}", e);
            Err(e.into())
        }
    }
}
