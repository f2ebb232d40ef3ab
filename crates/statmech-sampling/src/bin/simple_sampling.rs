//! Generates the fair and biased coin-flip sequences into `output/`.
//!
//! A `sampling.yaml` in the working directory overrides the defaults.

use std::error::Error;
use std::path::Path;

use statmech_sampling::{run_suite, SuiteConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config_path = Path::new("sampling.yaml");
    let config = if config_path.exists() {
        SuiteConfig::from_yaml_path(config_path)?
    } else {
        SuiteConfig::default()
    };

    let outputs = run_suite(&config)?;
    info!(files = outputs.len(), output_dir = %config.output_dir.display(), "done");
    Ok(())
}
