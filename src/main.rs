use clap::{Parser, Subcommand};
use std::path::PathBuf;
use utclog::config::{resolve_config_path, ConverterKind};

#[derive(Parser)]
#[command(name = "utclog")]
#[command(about = "Log record formatting with UTC timestamps", long_about = None)]
struct Cli {
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Format JSON-line records from a file or stdin
    Run {
        #[arg(long)]
        input: Option<PathBuf>,
    },
    /// Print the broken-down time of epoch timestamps
    Convert {
        #[arg(required = true, allow_negative_numbers = true)]
        timestamps: Vec<f64>,

        /// Use the host timezone instead of UTC
        #[arg(long)]
        local: bool,
    },
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    Init {
        #[arg(long)]
        stdout: bool,
    },
    Validate,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    utclog::logging::init();

    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());

    match cli.command {
        Some(Commands::Run { input }) => utclog::cli::run::run(config_path, input)?,
        // Default behavior is to run on stdin
        None => utclog::cli::run::run(config_path, None)?,
        Some(Commands::Convert { timestamps, local }) => {
            let kind = if local {
                ConverterKind::Local
            } else {
                ConverterKind::Utc
            };
            utclog::cli::convert::convert(&timestamps, kind)?;
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Init { stdout } => utclog::cli::config::init(stdout)?,
            ConfigAction::Validate => utclog::cli::config::validate(config_path)?,
        },
    }

    Ok(())
}
