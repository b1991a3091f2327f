use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{Generator, Shell, generate};
use confstate::cli::{Cli, Commands};
use confstate::output::{self, Verbosity};
use confstate::{StateContext, commands};
use std::io;
use std::process;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "CONFSTATE_LOG";

/// Write a completion script for `generator` to stdout
fn print_completions<G: Generator>(generator: G, cmd: &mut clap::Command) {
    generate(
        generator,
        cmd,
        cmd.get_name().to_string(),
        &mut io::stdout(),
    );
}

/// Install the stderr `tracing` subscriber
fn init_logging(verbose: bool) {
    let default = if verbose { "confstate=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() {
    match run() {
        Ok(code) => process::exit(code),
        Err(e) => {
            output::error(&format!("Error: {e:#}"));
            process::exit(2);
        }
    }
}

/// Dispatch the parsed command and return the process exit code
fn run() -> Result<i32> {
    let cli = Cli::parse();

    init_logging(cli.verbose);
    output::set_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose));

    if let Commands::Completion { shell } = cli.command {
        let mut cmd = Cli::command();
        print_completions::<Shell>(shell, &mut cmd);
        return Ok(0);
    }

    let mut ctx = StateContext::new()?;
    if let Some(state_file) = cli.state_file {
        ctx = ctx.with_state_file(state_file);
    }

    match cli.command {
        Commands::Record { paths, glob } => {
            commands::record::execute(&ctx, &paths, glob)?;
        }
        Commands::Check {
            paths,
            force,
            record,
            glob,
            exit_code,
        } => {
            let any_stale = commands::check::execute(&ctx, &paths, force, record, glob)?;
            if exit_code && !any_stale {
                return Ok(1);
            }
        }
        Commands::List => commands::list::execute(&ctx)?,
        Commands::Config => commands::config::execute(&ctx)?,
        Commands::Completion { .. } => unreachable!("handled above"),
    }

    Ok(0)
}
