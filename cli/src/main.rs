#![deny(missing_docs)]

//! # API Contract CLI
//!
//! Publishes the Movies API contract as OpenAPI 3.1 JSON and YAML.
//!
//! Supported Commands:
//! - `generate`: Registers schemas and routes, then writes `openapi.json` and `openapi.yaml`.
//!
//! Log verbosity is controlled with `RUST_LOG` (default `info`).

use apicontract_core::AppResult;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod generate;
mod movies;

#[derive(Parser, Debug)]
#[clap(author, version, about = "OpenAPI contract publisher")]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate and write the OpenAPI document.
    Generate(generate::GenerateArgs),
}

fn main() -> AppResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Generate(args) => {
            if let Err(e) = generate::execute(args) {
                tracing::error!(error = %e, "generation failed");
                return Err(e);
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli_structure() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_generate_flags() {
        let cli = Cli::parse_from([
            "apicontract",
            "generate",
            "--output-dir",
            "docs",
            "--reject-duplicate-schemas",
        ]);
        let Commands::Generate(args) = cli.command;
        assert_eq!(args.output_dir, Some(std::path::PathBuf::from("docs")));
        assert!(args.reject_duplicate_schemas);
        assert!(args.config.is_none());
    }
}
