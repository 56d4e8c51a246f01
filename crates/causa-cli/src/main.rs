//! `causa`: discover causal structure in a numeric dataset and estimate
//! linear effects over it.

mod args;
mod commands;
mod context;
mod output;

use std::path::PathBuf;
use std::process::ExitCode;

use causa_core::errors::error_code::{CLI_ERROR, USAGE_ERROR};
use causa_core::errors::{CausaErrorCode, PipelineError};
use causa_core::types::OutputFormat;
use clap::error::ErrorKind;
use clap::{Parser, Subcommand};

use crate::commands::{config, discover, effects, orient, roles};
use crate::context::CliContext;

#[derive(Debug, Parser)]
#[command(name = "causa", version, about = "Constraint-based causal discovery and linear effect estimation")]
struct Cli {
    /// Project directory searched for `causa.toml`.
    #[arg(long, global = true, value_name = "DIR", env = "CAUSA_CONFIG_DIR", default_value = ".")]
    config_dir: PathBuf,

    /// Field delimiter for delimited input files.
    #[arg(long, global = true, default_value_t = ',')]
    delimiter: char,

    /// Report format: text or json.
    #[arg(long, global = true)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run skeleton discovery and PC orientation over a dataset.
    Discover(discover::DiscoverArgs),
    /// Orient candidate pairs around a chosen collider.
    Orient(orient::OrientArgs),
    /// Fit a linear SEM over the given edges and report effect sizes.
    Effects(effects::EffectsArgs),
    /// List confounders, colliders and mediators for a cause/effect pair.
    Roles(roles::RolesArgs),
    /// Print the effective configuration.
    Config,
}

fn main() -> ExitCode {
    causa_core::tracing::init_tracing();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => return usage_failure(&e),
    };

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<PipelineError>() {
                Some(p) => eprintln!("{}", p.coded_string()),
                None => eprintln!("[{CLI_ERROR}] {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

/// Help and version requests succeed; every other parse failure is a
/// coded usage error with exit status 1.
fn usage_failure(e: &clap::Error) -> ExitCode {
    if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) {
        let _ = e.print();
        return ExitCode::SUCCESS;
    }
    let rendered = e.to_string();
    let message: Vec<&str> = rendered
        .lines()
        .map(str::trim)
        .take_while(|l| !l.is_empty() && !l.starts_with("Usage:"))
        .map(|l| l.trim_start_matches("error: "))
        .collect();
    eprintln!("[{USAGE_ERROR}] {}", message.join(" "));
    ExitCode::FAILURE
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Discover(args) => {
            let ctx = CliContext::load(&cli.config_dir, cli.delimiter, cli.format, args.overrides())?;
            discover::execute(&ctx, &args)
        }
        Command::Orient(args) => {
            let ctx = CliContext::load(&cli.config_dir, cli.delimiter, cli.format, args.overrides())?;
            orient::execute(&ctx, &args)
        }
        Command::Effects(args) => {
            let ctx = CliContext::load(&cli.config_dir, cli.delimiter, cli.format, Default::default())?;
            effects::execute(&ctx, &args)
        }
        Command::Roles(args) => {
            let ctx = CliContext::load(&cli.config_dir, cli.delimiter, cli.format, Default::default())?;
            roles::execute(&ctx, &args)
        }
        Command::Config => {
            let ctx = CliContext::load(&cli.config_dir, cli.delimiter, cli.format, Default::default())?;
            config::execute(&ctx)
        }
    }
}
