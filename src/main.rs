use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use fxgather::OutputFormat;
use fxgather::core::log::init_logging;
use std::time::Duration;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Fetch live exchange rates and print them
    Gather {
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Line)]
        format: OutputFormat,

        /// Keep gathering every N seconds
        #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => fxgather::cli::setup::setup(),
        Some(Commands::Gather { format, interval }) => {
            let command = fxgather::AppCommand::Gather {
                format,
                interval: interval.map(Duration::from_secs),
            };
            fxgather::run_command(command, cli.config_path.as_deref()).await
        }
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
