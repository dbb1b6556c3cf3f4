use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use nodeterm::{ConfigLoader, TerminalError, TerminalService, builtin};

mod commands;

use commands::{ListFormat, NodeArgs, invoke_command, list_command, serve_command};

const DEFAULT_CONFIG_PATH: &str = "terminal.yml";

#[derive(Parser)]
#[command(
    name = "nodeterm",
    about = "Discover and invoke terminal commands of a content backend",
    version,
    author,
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the terminal configuration file [default: terminal.yml]
    #[arg(short, long, global = true, env = "NODETERM_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output (use -vv for debug output)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available commands
    List {
        /// Output format
        #[arg(short, long, value_enum, default_value = "json")]
        format: ListFormat,
    },

    /// Invoke a command by name
    Invoke {
        /// Name of the command to invoke
        command_name: String,

        /// Argument passed to the command
        argument: Option<String>,

        #[command(flatten)]
        nodes: NodeArgs,
    },

    /// Answer line-delimited JSON requests on stdin
    Serve,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging based on verbose flag
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            match error.downcast::<TerminalError>() {
                Ok(terminal_error) => eprintln!("{:?}", miette::Report::new(terminal_error)),
                Err(error) => eprintln!("Error: {error:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => ConfigLoader::load(path)?,
        None => ConfigLoader::load_or_default(std::path::Path::new(DEFAULT_CONFIG_PATH))?,
    };
    let service = Arc::new(TerminalService::from_config(&config, builtin::catalog()));

    match cli.command {
        Commands::List { format } => list_command(&service, format),
        Commands::Invoke {
            command_name,
            argument,
            nodes,
        } => invoke_command(&service, command_name, argument, nodes),
        Commands::Serve => serve_command(service),
    }
}

fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::new("nodeterm=warn"), // Default: warnings and errors only
        1 => EnvFilter::new("nodeterm=info"), // -v: info messages
        _ => EnvFilter::new("nodeterm=debug"), // -vv or more: full debug
    };

    // stdout carries command output, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}
