//! # MQ Debug CLI
//!
//! Command-line interface for inspecting and draining DBAL message queues.

mod cli;

use anyhow::Context;
use clap::{Parser, Subcommand};
use mq_debug::config::ConfigLoader;
use mq_debug::logging::init_cli_logging;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::debug;

use cli::{handle_list_command, handle_process_command};

#[derive(Parser, Debug)]
#[command(name = "mq-debug")]
#[command(about = "Debugging tools for a database-backed message queue")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Configuration file path (default: ./mq-debug.toml, then ./config/mq-debug.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output level (use multiple times for more verbosity)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Subcommands
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all message queue destinations with processors and message counts
    List {
        /// Filter by queue/destination name (case-insensitive substring)
        #[arg(long, num_args = 0..=1, default_missing_value = "")]
        queue: Option<String>,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Process message(s) from a queue for debugging
    #[command(after_help = PROCESS_EXAMPLES)]
    Process {
        /// Queue/destination name to consume from (e.g. default); all when omitted
        queue: Option<String>,
        /// Process only with this processor
        #[arg(short, long, num_args = 0..=1, default_missing_value = "")]
        processor: Option<String>,
        /// Process N messages and exit; 0 or less removes the limit
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        message_limit: i64,
        /// Exit after this time (e.g. 0:0:30, 30s, +5min, now + 1h, an RFC 3339 timestamp)
        #[arg(short, long)]
        time_limit: Option<String>,
    },
}

const PROCESS_EXAMPLES: &str = "\
Examples:

  Process one message from any queue:
    mq-debug process -m 1

  Process from a specific queue:
    mq-debug process default -m 1

  Process with a specific processor (when the queue has several):
    mq-debug process default -p oro_message_queue.async.unique_message_processor -m 1

  Process up to 5 messages, giving up after thirty seconds:
    mq-debug process -m 5 -t 0:0:30";

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    init_cli_logging(cli.verbose);

    let mut loader = ConfigLoader::new();
    if let Some(path) = cli.config {
        loader = loader.with_file(path);
    }
    let config = loader.load().context("failed to load configuration")?;

    debug!(
        table = %config.transport.table_name,
        destinations = config.destinations.len(),
        "MQ debug starting"
    );

    let status = match cli.command {
        Commands::List { queue, json } => handle_list_command(queue, json, &config).await?,
        Commands::Process {
            queue,
            processor,
            message_limit,
            time_limit,
        } => handle_process_command(queue, processor, message_limit, time_limit, &config).await?,
    };

    Ok(status.into())
}
