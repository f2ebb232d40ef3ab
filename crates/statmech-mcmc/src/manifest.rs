use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use statmech_core::StatmechError;

use crate::config::RunConfig;
use crate::metrics::ObservableSummary;

/// Structured manifest describing a completed measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunManifest {
    /// Configuration used for the run.
    pub config: RunConfig,
    /// Master seed used to derive chain substreams.
    pub master_seed: u64,
    /// Optional seed label captured from the configuration.
    pub seed_label: Option<String>,
    /// Sites per lattice.
    pub lattice_size: usize,
    /// Averages pooled over every chain.
    pub pooled: ObservableSummary,
    /// Acceptance rate pooled over every chain.
    pub acceptance_rate: f64,
    /// Metrics file produced during the run (relative to the run directory).
    pub metrics_file: Option<PathBuf>,
}

impl RunManifest {
    /// Writes the manifest to a JSON file, creating parent directories.
    pub fn write(&self, path: &Path) -> Result<(), StatmechError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| StatmechError::io("manifest-mkdir", err, parent))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|err| StatmechError::io("manifest-serialize", err, path))?;
        fs::write(path, json).map_err(|err| StatmechError::io("manifest-write", err, path))
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, StatmechError> {
        let contents = fs::read_to_string(path)
            .map_err(|err| StatmechError::io("manifest-read", err, path))?;
        serde_json::from_str(&contents)
            .map_err(|err| StatmechError::io("manifest-parse", err, path))
    }
}
