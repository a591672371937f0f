mod cli;
mod commands;
mod config;
mod error;
mod output;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tickets_core::{Coordinator, ServiceRegistry};

use crate::cli::{Cli, Command, GlobalOpts};
use crate::error::CliError;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.global);

    if let Err(err) = run(cli).await {
        let code = err.exit_code();
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(code);
    }
}

/// Logs go to stderr so stdout stays parseable. `RUST_LOG` wins over `-v`.
fn init_tracing(global: &GlobalOpts) {
    let level = match (global.quiet, global.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, 2) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let global = cli.global;
    let registry = ServiceRegistry::with_default_services();

    let cmd = match cli.command {
        Command::Config(args) => return commands::config_cmd::handle(args, &global),
        Command::Services => {
            commands::services::handle_list(&registry, &global);
            return Ok(());
        }
        Command::Completions(args) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "tickets",
                &mut std::io::stdout(),
            );
            return Ok(());
        }
        cmd => cmd,
    };

    let coordinator = Coordinator::new(config::resolve_coordinator_config(&global)?)?;
    tracing::debug!(command = ?cmd, mode = coordinator.api().mode(), "dispatching command");

    let result = commands::dispatch(cmd, &coordinator, &registry, &global).await;
    coordinator.shutdown().await;
    result
}
