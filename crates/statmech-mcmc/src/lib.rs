#![deny(missing_docs)]

//! Metropolis measurement harness for statmech lattices.
//!
//! A [`LatticeMeasurement`] pairs a lattice size with an integer observable and
//! its single-flip delta. [`LatticeMeasurement::run`] samples independent
//! chains at a fixed temperature, tracking energy, magnetization and the
//! observable incrementally, and optionally writes a metrics CSV plus a JSON
//! manifest.

/// YAML configuration schema and defaults.
pub mod config;
/// Deterministic seed derivation helpers.
pub mod determinism;
/// Exact infinite-chain results for comparison.
pub mod exact;
/// Metropolis kernel and the `run` entry point.
pub mod kernel;
/// Run manifest serialization helpers.
pub mod manifest;
/// Observable bundles driving a run.
pub mod measurement;
/// Sample records, summaries and CSV export.
pub mod metrics;

pub use config::{InitialState, LatticeConfig, OutputConfig, RunConfig, SeedPolicy};
pub use kernel::{metropolis_accept, run, ChainState, ChainSummary, RunSummary};
pub use manifest::RunManifest;
pub use measurement::{experiment, Experiment, LatticeMeasurement};
pub use metrics::{MetricSample, MetricsRecorder, ObservableSummary};
