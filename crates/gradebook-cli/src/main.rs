//! gradebook CLI: runs registry scripts and prints status lines.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "gradebook",
    version,
    about = "In-memory student record manager"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the built-in demonstration (default)
    Demo {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Run a TOML script
    Run {
        /// Path to a .toml script
        #[arg(long)]
        script: PathBuf,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,

        /// Print the resulting students and courses afterwards
        #[arg(long)]
        roster: bool,
    },

    /// Check TOML scripts for steps the registry would reject
    Validate {
        /// Path to a script file or directory
        #[arg(long)]
        script: PathBuf,
    },

    /// Create a starter config and example script
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("gradebook=info")),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Demo { config: None }) {
        Commands::Demo { config } => commands::demo::execute(config),
        Commands::Run {
            script,
            config,
            roster,
        } => commands::run::execute(script, config, roster),
        Commands::Validate { script } => commands::validate::execute(script),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
