//! `causa discover`: skeleton table, final skeleton and PC orientation.

use std::path::PathBuf;

use causa_core::config::CliOverrides;
use causa_core::errors::PipelineError;
use causa_core::types::{CiTestKind, OutputFormat, SkeletonStrategy};
use causa_discovery::PcAlgorithm;
use clap::Args;

use crate::args::parse_pair;
use crate::context::CliContext;
use crate::output;

#[derive(Debug, Args)]
pub struct DiscoverArgs {
    /// CSV or JSON dataset.
    #[arg(long, value_name = "FILE")]
    pub data: PathBuf,

    /// Significance level; a pair is separated when p > alpha.
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Adjacency search: exhaustive or pc-stable.
    #[arg(long)]
    pub strategy: Option<SkeletonStrategy>,

    /// CI test: partial-correlation or fisher-z.
    #[arg(long = "test")]
    pub ci_test: Option<CiTestKind>,

    /// Largest conditioning set to try.
    #[arg(long)]
    pub max_conditioning: Option<usize>,

    /// Only test these pairs (A,B). Repeatable.
    #[arg(long = "pair", value_parser = parse_pair)]
    pub pairs: Vec<(String, String)>,

    /// Print the oriented graph as Graphviz DOT instead of a report.
    #[arg(long)]
    pub dot: bool,
}

impl DiscoverArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            alpha: self.alpha,
            ci_test: self.ci_test,
            strategy: self.strategy,
            max_conditioning: self.max_conditioning,
            format: None,
        }
    }
}

pub fn execute(ctx: &CliContext, args: &DiscoverArgs) -> anyhow::Result<()> {
    let data = ctx.load_data(&args.data)?;

    let mut pc = PcAlgorithm::new(ctx.config.discovery.clone());
    if !args.pairs.is_empty() {
        pc = pc.with_candidates(args.pairs.clone());
    }
    let result = pc.run(&data).map_err(PipelineError::from)?;

    if args.dot {
        print!("{}", result.graph.to_dot());
        return Ok(());
    }

    match ctx.format() {
        OutputFormat::Json => output::json(&result.report())?,
        OutputFormat::Text => {
            let precision = ctx.precision();
            println!("Skeleton table ({} tests):", result.skeleton.table.len());
            print!("{:.precision$}", result.skeleton.table);
            println!();
            output::pairs("Skeleton edges", &result.skeleton.edges, "-");
            output::pairs("Dependent edges", &result.skeleton.dependent_edges, "-");
            println!();
            output::pairs("Directed", &result.graph.directed_edges(), "->");
            output::pairs("Undirected", &result.graph.undirected_edges(), "-");
            println!(
                "v-structures: {}, meek orientations: {}",
                result.v_structures.len(),
                result.meek_oriented
            );
        }
    }
    Ok(())
}
