//! # AuthMig CLI
//!
//! Command-line interface for the OAuth migration tool.
//!
//! ## Usage
//!
//! ```bash
//! # Translate the master configuration of the host this runs on
//! authmig translate
//!
//! # Translate a copied configuration tree
//! authmig translate \
//!     --master-config ./backup/etc/origin/master/master-config.yaml \
//!     --source-dir ./backup --output-dir ./out
//!
//! # Machine-readable skip report
//! authmig translate --report json
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use crate::constants::DEFAULT_MASTER_CONFIG_PATH;
use crate::error::Diagnostic;
use crate::extract::{extract_identity_providers, load_master_config, FileResolver};
use crate::manifest::{render, write_manifests};
use crate::transform::oauth::translate;

/// Package version stamped with the build's git hash
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "-", env!("BUILD_GIT_HASH"));

/// OAuth migration CLI
#[derive(Debug, Parser)]
#[command(
    name = "authmig",
    version = VERSION,
    about = "Translates the OAuth section of a legacy OpenShift 3 master configuration into OpenShift 4 manifests",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Translate a master configuration into OAuth manifests
    Translate {
        /// Path to the legacy master configuration file
        #[arg(long, default_value = DEFAULT_MASTER_CONFIG_PATH)]
        master_config: PathBuf,

        /// Root directory the configuration's file references resolve under.
        /// Point it at a copied configuration tree when not running on the
        /// master host.
        #[arg(long, default_value = "/")]
        source_dir: PathBuf,

        /// Directory the manifests/ tree is written into
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,

        /// Skip report format
        #[arg(long, value_enum, default_value = "text")]
        report: ReportFormat,
    },
}

/// Output format for the skipped-provider report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable summary on stdout
    Text,
    /// JSON array of skip diagnostics on stdout
    Json,
}

impl Cli {
    /// Run the parsed command to completion.
    ///
    /// # Errors
    ///
    /// Returns an error when the master configuration cannot be loaded, a
    /// provider fragment is corrupt, or the manifests cannot be written.
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Translate {
                master_config,
                source_dir,
                output_dir,
                report,
            } => translate_command(&master_config, &source_dir, &output_dir, report).await,
        }
    }
}

/// End-to-end pipeline: load, extract, translate, render, write, report.
async fn translate_command(
    master_config: &Path,
    source_dir: &Path,
    output_dir: &Path,
    report: ReportFormat,
) -> Result<()> {
    info!(
        "Reading master configuration from {}",
        master_config.display()
    );
    let config = load_master_config(master_config).await?;

    let resolver = FileResolver::new(source_dir);
    let providers = extract_identity_providers(&config, &resolver).await?;
    info!("Extracted {} identity providers", providers.len());

    let outcome = translate(&providers).context("Failed to translate identity providers")?;
    let manifests = render(&outcome.bundle).context("Failed to render manifests")?;
    write_manifests(output_dir, &manifests).await?;

    report_diagnostics(&outcome.diagnostics, report)
}

fn report_diagnostics(diagnostics: &[Diagnostic], format: ReportFormat) -> Result<()> {
    match format {
        ReportFormat::Text => {
            if !diagnostics.is_empty() {
                println!("Skipped {} identity providers:", diagnostics.len());
                for diagnostic in diagnostics {
                    println!(
                        "  [{}] {}: {}",
                        diagnostic.index, diagnostic.name, diagnostic.message
                    );
                }
            }
        }
        ReportFormat::Json => {
            let encoded = serde_json::to_string_pretty(diagnostics)
                .context("Failed to encode the skip report")?;
            println!("{encoded}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_translate_defaults() {
        let cli = Cli::parse_from(["authmig", "translate"]);
        match cli.command {
            Commands::Translate {
                master_config,
                source_dir,
                output_dir,
                report,
            } => {
                assert_eq!(
                    master_config,
                    PathBuf::from("/etc/origin/master/master-config.yaml")
                );
                assert_eq!(source_dir, PathBuf::from("/"));
                assert_eq!(output_dir, PathBuf::from("."));
                assert_eq!(report, ReportFormat::Text);
            }
        }
    }

    #[test]
    fn test_report_format_json_is_accepted() {
        let cli = Cli::parse_from(["authmig", "translate", "--report", "json"]);
        match cli.command {
            Commands::Translate { report, .. } => assert_eq!(report, ReportFormat::Json),
        }
    }

    #[test]
    fn test_version_carries_the_build_hash() {
        assert!(VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(VERSION.len() > env!("CARGO_PKG_VERSION").len());
    }
}
