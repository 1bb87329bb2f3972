#![forbid(unsafe_code)]
//! DocBlock header command line interface

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use docblock::commands::{execute_fix, execute_show_config, execute_tags, FixOptions};
use docblock::config::DEFAULT_CONFIG_FILE;
use docblock::Config;

#[derive(Parser)]
#[command(name = "docblock")]
#[command(about = "Add or update DocBlock headers on PHP declarations")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Add or update headers in the given files and directories
    Fix {
        /// Files or directories to process
        #[arg(default_value = ".")]
        paths: Vec<PathBuf>,

        /// Report files that would change without writing them
        #[arg(long)]
        check: bool,

        /// Print a unified diff for each changed file
        #[arg(long)]
        diff: bool,
    },

    /// Print the resolved rule configuration
    ShowConfig,

    /// List the annotation names accepted in a configuration
    Tags,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = Config::load_or_default(&cli.config)?;
    let base_dir = cli
        .config
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."))
        .to_path_buf();

    match cli.command {
        Commands::Fix { paths, check, diff } => {
            let options = FixOptions {
                paths,
                check,
                diff,
                base_dir,
                verbose: cli.verbose,
            };
            execute_fix(options, config)?;
        }

        Commands::ShowConfig => {
            execute_show_config(config, &base_dir)?;
        }

        Commands::Tags => {
            execute_tags()?;
        }
    }

    Ok(())
}
