//! `causa effects`: linear SEM fit and effect sizes.

use std::path::PathBuf;

use causa_core::errors::PipelineError;
use causa_core::types::OutputFormat;
use causa_effects::{EffectReport, Equation, LinearSem};
use clap::Args;
use serde::Serialize;

use crate::args::parse_edge;
use crate::context::CliContext;
use crate::output;

#[derive(Debug, Args)]
pub struct EffectsArgs {
    /// CSV or JSON dataset.
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Causal edge (A->B). Repeatable.
    #[arg(long = "edge", value_parser = parse_edge, required = true)]
    pub edges: Vec<(String, String)>,

    /// Cause whose effect is reported.
    #[arg(long, requires = "to")]
    pub from: Option<String>,

    /// Effect variable.
    #[arg(long, requires = "from")]
    pub to: Option<String>,
}

#[derive(Serialize)]
struct EffectsOutput<'a> {
    edges: Vec<(String, String, f64)>,
    equations: &'a [Equation],
    #[serde(skip_serializing_if = "Option::is_none")]
    effect: Option<EffectReport>,
}

pub fn execute(ctx: &CliContext, args: &EffectsArgs) -> anyhow::Result<()> {
    let data = ctx.load_data(&args.data)?;
    let sem = LinearSem::fit(&data, &args.edges, &ctx.config.estimation).map_err(PipelineError::from)?;

    let effect = match (&args.from, &args.to) {
        (Some(from), Some(to)) => Some(sem.report(&data, from, to).map_err(PipelineError::from)?),
        _ => None,
    };

    match ctx.format() {
        OutputFormat::Json => output::json(&EffectsOutput {
            edges: sem.edges(),
            equations: sem.equations(),
            effect,
        })?,
        OutputFormat::Text => {
            let precision = ctx.precision();
            print!("{sem:.precision$}");
            if let Some(report) = effect {
                println!();
                println!("{report:.precision$}");
            }
        }
    }
    Ok(())
}
