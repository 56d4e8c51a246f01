//! Shared state for every subcommand: resolved config and data loading.

use std::path::{Path, PathBuf};

use causa_core::config::CliOverrides;
use causa_core::errors::PipelineError;
use causa_core::types::OutputFormat;
use causa_core::{CausaConfig, Dataset};

pub struct CliContext {
    pub config: CausaConfig,
    pub config_dir: PathBuf,
    pub delimiter: char,
}

impl CliContext {
    pub fn load(
        config_dir: &Path,
        delimiter: char,
        format: Option<OutputFormat>,
        mut overrides: CliOverrides,
    ) -> Result<Self, PipelineError> {
        if format.is_some() {
            overrides.format = format;
        }
        let config = CausaConfig::load(config_dir, Some(&overrides))?;
        Ok(Self {
            config,
            config_dir: config_dir.to_path_buf(),
            delimiter,
        })
    }

    pub fn load_data(&self, path: &Path) -> Result<Dataset, PipelineError> {
        let data = Dataset::from_path(path, self.delimiter)?;
        tracing::info!(
            path = %path.display(),
            rows = data.n_rows(),
            columns = data.n_columns(),
            "dataset loaded"
        );
        Ok(data)
    }

    pub fn format(&self) -> OutputFormat {
        self.config.output.effective_format()
    }

    pub fn precision(&self) -> usize {
        self.config.output.effective_precision()
    }
}
