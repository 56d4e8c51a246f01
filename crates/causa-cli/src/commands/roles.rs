//! `causa roles`: structural roles of third variables.

use causa_core::errors::PipelineError;
use causa_core::types::OutputFormat;
use causa_discovery::graph::PartiallyDirectedGraph;
use causa_discovery::roles;
use clap::Args;

use crate::args::parse_edge;
use crate::context::CliContext;
use crate::output;

#[derive(Debug, Args)]
pub struct RolesArgs {
    /// Causal edge (A->B). Repeatable.
    #[arg(long = "edge", value_parser = parse_edge, required = true)]
    pub edges: Vec<(String, String)>,

    #[arg(long)]
    pub from: String,

    #[arg(long)]
    pub to: String,
}

pub fn execute(ctx: &CliContext, args: &RolesArgs) -> anyhow::Result<()> {
    let mut variables: Vec<String> = Vec::new();
    for (a, b) in &args.edges {
        for v in [a, b] {
            if !variables.contains(v) {
                variables.push(v.clone());
            }
        }
    }
    let graph =
        PartiallyDirectedGraph::from_directed(&variables, &args.edges).map_err(PipelineError::from)?;
    let report = roles::classify(&graph, &args.from, &args.to).map_err(PipelineError::from)?;

    match ctx.format() {
        OutputFormat::Json => output::json(&report)?,
        OutputFormat::Text => {
            println!("{} -> {}", report.cause, report.effect);
            println!("  confounders: {}", report.confounders.join(", "));
            println!("  colliders:   {}", report.colliders.join(", "));
            println!("  mediators:   {}", report.mediators.join(", "));
        }
    }
    Ok(())
}
