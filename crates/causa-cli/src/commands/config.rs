//! `causa config`: the effective configuration after every layer is applied.

use causa_core::constants::PROJECT_CONFIG_FILE;
use causa_core::errors::PipelineError;
use causa_core::types::OutputFormat;

use crate::context::CliContext;
use crate::output;

pub fn execute(ctx: &CliContext) -> anyhow::Result<()> {
    match ctx.format() {
        OutputFormat::Json => output::json(&ctx.config)?,
        OutputFormat::Text => {
            let project = ctx.config_dir.join(PROJECT_CONFIG_FILE);
            if project.exists() {
                println!("# project config: {}", project.display());
            }
            print!("{}", ctx.config.to_toml().map_err(PipelineError::from)?);
        }
    }
    Ok(())
}
