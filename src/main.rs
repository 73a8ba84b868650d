//! # AuthMig
//!
//! Translates the OAuth section of a legacy OpenShift 3 master configuration
//! into OpenShift 4 manifests.
//!
//! ## Overview
//!
//! The `translate` command runs a four-stage pipeline:
//!
//! 1. **Extraction** - Reads the master configuration and resolves the file
//!    references its identity providers carry (htpasswd files, CA bundles,
//!    TLS client cert/key pairs)
//! 2. **Translation** - Maps each supported legacy identity provider onto its
//!    OpenShift 4 shape; unsupported or undecodable providers are skipped
//!    and reported instead of failing the run
//! 3. **Rendering** - Serializes the cluster OAuth resource and its companion
//!    Secret/ConfigMap documents under deterministic file names
//! 4. **Writing** - Materializes the documents under `<output>/manifests/`
//!
//! ## Usage
//!
//! See the [README.md](../README.md) for detailed usage instructions and examples.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use authmig::cli::{Cli, VERSION};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "authmig=info".into()),
        )
        .init();

    info!("Starting AuthMig {}", VERSION);

    let cli = Cli::parse();
    cli.run().await
}
