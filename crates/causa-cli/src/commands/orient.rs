//! `causa orient`: collider rule over candidate pairs.

use std::path::PathBuf;

use causa_core::config::CliOverrides;
use causa_core::errors::PipelineError;
use causa_core::types::{CiTestKind, OutputFormat, SkeletonStrategy};
use causa_discovery::{orient_with_collider, PcAlgorithm};
use clap::Args;
use serde::Serialize;

use crate::args::parse_pair;
use crate::context::CliContext;
use crate::output;

#[derive(Debug, Args)]
pub struct OrientArgs {
    /// CSV or JSON dataset.
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// The middle node every pair is oriented around.
    #[arg(long)]
    pub collider: String,

    /// Candidate pair (A,B). Repeatable.
    #[arg(long = "pair", value_parser = parse_pair, required = true)]
    pub pairs: Vec<(String, String)>,

    #[arg(long)]
    pub alpha: Option<f64>,

    #[arg(long)]
    pub strategy: Option<SkeletonStrategy>,

    #[arg(long = "test")]
    pub ci_test: Option<CiTestKind>,
}

impl OrientArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            alpha: self.alpha,
            ci_test: self.ci_test,
            strategy: self.strategy,
            max_conditioning: None,
            format: None,
        }
    }
}

#[derive(Serialize)]
struct OrientReport<'a> {
    collider: &'a str,
    skeleton_table: &'a [causa_discovery::skeleton::SkeletonRow],
    causal_table: &'a causa_discovery::CausalTable,
}

pub fn execute(ctx: &CliContext, args: &OrientArgs) -> anyhow::Result<()> {
    let data = ctx.load_data(&args.data)?;

    let skeleton = PcAlgorithm::new(ctx.config.discovery.clone())
        .with_candidates(args.pairs.clone())
        .skeleton(&data)
        .map_err(PipelineError::from)?;
    let table =
        orient_with_collider(&skeleton, &args.pairs, &args.collider).map_err(PipelineError::from)?;

    match ctx.format() {
        OutputFormat::Json => output::json(&OrientReport {
            collider: &args.collider,
            skeleton_table: skeleton.table.rows(),
            causal_table: &table,
        })?,
        OutputFormat::Text => {
            let precision = ctx.precision();
            print!("{:.precision$}", skeleton.table);
            println!();
            print!("{table}");
        }
    }
    Ok(())
}
