#![deny(missing_docs)]

//! # Generate Command
//!
//! Builds the Movies contract, generates the OpenAPI document and writes
//! `openapi.json` and `openapi.yaml`.

use crate::movies;
use apicontract_core::{publish, AppResult, DuplicatePolicy, GeneratorConfig};
use std::path::PathBuf;

/// Arguments for the generate command.
#[derive(clap::Args, Debug, Clone)]
pub struct GenerateArgs {
    /// YAML configuration file (document metadata, output, schema policy).
    #[clap(long, env = "APICONTRACT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory receiving the artifacts. Overrides `output.dir`.
    #[clap(long, env = "APICONTRACT_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Fail when a schema name is registered twice instead of replacing it.
    #[clap(long)]
    pub reject_duplicate_schemas: bool,
}

impl GenerateArgs {
    /// Resolves the effective configuration from the file and flag overrides.
    pub fn resolve(&self) -> AppResult<GeneratorConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                GeneratorConfig::load(path)?
            }
            None => movies::default_config(),
        };
        if let Some(dir) = &self.output_dir {
            config.output.dir = dir.clone();
        }
        if self.reject_duplicate_schemas {
            config.schema_policy = DuplicatePolicy::Reject;
        }
        Ok(config)
    }
}

/// Executes the generate command, returning the written artifact paths.
pub fn execute(args: &GenerateArgs) -> AppResult<Vec<PathBuf>> {
    let config = args.resolve()?;
    let contract = movies::movies_contract(config.schema_policy)?;
    tracing::info!(
        schemas = contract.schemas.len(),
        operations = contract.paths.len(),
        "contract registered"
    );

    let written = publish(&contract, &config)?;
    for path in &written {
        tracing::info!(path = %path.display(), "artifact ready");
    }
    Ok(written)
}
