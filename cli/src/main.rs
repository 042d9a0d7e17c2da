//! portguard CLI - Monitor and manage localhost ports
//!
//! A command-line tool for listing listening ports, inspecting a port or a
//! range, killing the processes behind a port and cleaning up leftover dev
//! servers.

mod commands;
mod config;
mod display;
mod prompt;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use portguard_core::{system_service, Platform};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use commands::Context;
use display::Palette;

#[derive(Parser)]
#[command(name = "portguard")]
#[command(author, version, about = "Monitor and manage localhost ports")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Specific port to check
    port: Option<String>,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Read settings from this JSON file
    #[arg(long, global = true, env = "PORTGUARD_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// List all listening ports
    #[command(alias = "ls")]
    List,

    /// Analyze usage of a port range
    Range {
        /// First port of the range
        start: String,
        /// Last port of the range (inclusive)
        end: String,
    },

    /// Kill process on specific port
    Kill {
        /// Port number to kill
        port: String,

        /// Force kill (SIGKILL)
        #[arg(short, long, conflicts_with = "escalate")]
        force: bool,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,

        /// Send SIGTERM, then SIGKILL if the process is still alive
        #[arg(short, long)]
        escalate: bool,
    },

    /// Kill common zombie processes (node, python, etc.)
    Clean {
        /// Force kill (SIGKILL)
        #[arg(short, long)]
        force: bool,

        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Continuous monitoring mode
    Watch {
        /// Refresh interval in seconds
        #[arg(short, long)]
        interval: Option<u64>,
    },
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli, palette: &Palette) -> anyhow::Result<ExitCode> {
    let settings = config::load(cli.config.as_deref()).await?;
    let platform = Platform::current();
    debug!(platform = %platform, "Starting portguard");

    let service = system_service(platform, &settings);
    let ctx = Context {
        service: &service,
        settings: &settings,
        palette,
        json: cli.json,
    };

    match cli.command {
        Some(Commands::List) => commands::list::run(&ctx).await,
        Some(Commands::Range { start, end }) => commands::range::run(&ctx, &start, &end).await,
        Some(Commands::Kill {
            port,
            force,
            yes,
            escalate,
        }) => commands::kill::run(&ctx, &port, force, yes, escalate).await,
        Some(Commands::Clean { force, yes }) => commands::clean::run(&ctx, force, yes).await,
        Some(Commands::Watch { interval }) => commands::watch::run(&ctx, interval).await,
        None => match cli.port {
            Some(port) => commands::info::run(&ctx, &port).await,
            None => commands::list::run(&ctx).await,
        },
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let palette = Palette::detect();
    match run(cli, &palette).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}{:#}", palette.error("Error: "), e);
            ExitCode::FAILURE
        }
    }
}
