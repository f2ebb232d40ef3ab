use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use statmech_core::errors::ErrorInfo;
use statmech_core::{Boundary, StatmechError};

/// YAML-configurable parameters governing a measurement run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Hamiltonian and boundary of every chain's lattice.
    pub lattice: LatticeConfig,
    /// Temperature in units of `J / k_B`.
    #[serde(default = "default_temperature")]
    pub temperature: f64,
    /// Number of recorded sweeps (post burn-in).
    #[serde(default = "default_sweeps")]
    pub sweeps: usize,
    /// Number of initial sweeps discarded before recording.
    #[serde(default)]
    pub burn_in: usize,
    /// Interval, in sweeps, between recorded samples.
    #[serde(default = "default_thinning")]
    pub thinning: usize,
    /// Number of independent chains, each with its own lattice.
    #[serde(default = "default_chains")]
    pub chains: usize,
    /// Master seed and substream policy.
    #[serde(default)]
    pub seed_policy: SeedPolicy,
    /// Output directory configuration.
    #[serde(default)]
    pub output: OutputConfig,
}

fn default_temperature() -> f64 {
    1.0
}

fn default_sweeps() -> usize {
    1_000
}

fn default_thinning() -> usize {
    1
}

fn default_chains() -> usize {
    1
}

impl RunConfig {
    /// Default run parameters on a lattice with the given boundary.
    ///
    /// There is no `Default` impl: the boundary condition is always explicit.
    pub fn for_boundary(boundary: Boundary) -> Self {
        Self {
            lattice: LatticeConfig::new(boundary),
            temperature: default_temperature(),
            sweeps: default_sweeps(),
            burn_in: 0,
            thinning: default_thinning(),
            chains: default_chains(),
            seed_policy: SeedPolicy::default(),
            output: OutputConfig::default(),
        }
    }

    /// Parses and validates a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, StatmechError> {
        let config: RunConfig = serde_yaml::from_str(contents).map_err(|err| {
            StatmechError::Config(ErrorInfo::new("config-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_yaml_path(path: &Path) -> Result<Self, StatmechError> {
        let contents =
            fs::read_to_string(path).map_err(|err| StatmechError::io("config-read", err, path))?;
        Self::from_yaml_str(&contents).map_err(|err| match err {
            StatmechError::Config(info) => {
                StatmechError::Config(info.with_context("path", path.display()))
            }
            other => other,
        })
    }

    /// Checks the invariants the sampler relies on.
    pub fn validate(&self) -> Result<(), StatmechError> {
        if !(self.temperature.is_finite() && self.temperature > 0.0) {
            return Err(StatmechError::Config(
                ErrorInfo::new("temperature", "temperature must be positive and finite")
                    .with_context("temperature", self.temperature),
            ));
        }
        if self.thinning == 0 {
            return Err(StatmechError::Config(
                ErrorInfo::new("thinning", "thinning interval must be at least 1")
                    .with_hint("use thinning: 1 to record every sweep"),
            ));
        }
        if self.burn_in.checked_add(self.sweeps).is_none() {
            return Err(StatmechError::Config(
                ErrorInfo::new("sweep-count", "burn_in + sweeps overflows the sweep counter")
                    .with_context("burn_in", self.burn_in)
                    .with_context("sweeps", self.sweeps),
            ));
        }
        if self.chains == 0 {
            return Err(StatmechError::Config(ErrorInfo::new(
                "chains",
                "at least one chain is required",
            )));
        }
        if !self.lattice.coupling.is_finite() || !self.lattice.field.is_finite() {
            return Err(StatmechError::Config(
                ErrorInfo::new("hamiltonian", "coupling and field must be finite")
                    .with_context("coupling", self.lattice.coupling)
                    .with_context("field", self.lattice.field),
            ));
        }
        Ok(())
    }
}

/// Lattice parameters shared by all chains.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatticeConfig {
    /// Boundary condition. Required; never defaulted.
    pub boundary: Boundary,
    /// Coupling constant `J`.
    #[serde(default = "default_coupling")]
    pub coupling: f64,
    /// External field `H`.
    #[serde(default)]
    pub field: f64,
    /// Starting configuration.
    #[serde(default)]
    pub initial: InitialState,
}

fn default_coupling() -> f64 {
    1.0
}

impl LatticeConfig {
    /// Ferromagnetic zero-field lattice with an ordered start.
    pub fn new(boundary: Boundary) -> Self {
        Self {
            boundary,
            coupling: default_coupling(),
            field: 0.0,
            initial: InitialState::default(),
        }
    }
}

/// Initial spin configuration of each chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InitialState {
    /// All spins up.
    #[default]
    Ordered,
    /// Independent uniform spins drawn from the chain's initial-state substream.
    Random,
}

/// Deterministic seeding configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPolicy {
    /// Master seed used for the run.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Optional label recorded in the manifest.
    #[serde(default)]
    pub label: Option<String>,
}

fn default_master_seed() -> u64 {
    0x1517_1D1D_5EED_0001
}

impl Default for SeedPolicy {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            label: None,
        }
    }
}

/// Output directory layout configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Root directory for run artefacts. Nothing is written when unset.
    #[serde(default)]
    pub run_directory: Option<PathBuf>,
    /// Metrics filename relative to `run_directory`.
    #[serde(default = "default_metrics_filename")]
    pub metrics_file: PathBuf,
    /// Manifest filename relative to `run_directory`.
    #[serde(default = "default_manifest_filename")]
    pub manifest_file: PathBuf,
}

fn default_metrics_filename() -> PathBuf {
    PathBuf::from("metrics.csv")
}

fn default_manifest_filename() -> PathBuf {
    PathBuf::from("manifest.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            run_directory: None,
            metrics_file: default_metrics_filename(),
            manifest_file: default_manifest_filename(),
        }
    }
}
