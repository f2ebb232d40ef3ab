use std::path::PathBuf;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statmech_core::{Lattice, RngHandle, StatmechError};
use statmech_lattice::Lattice1D;
use tracing::{debug, info, warn};

use crate::config::{InitialState, RunConfig};
use crate::determinism;
use crate::manifest::RunManifest;
use crate::measurement::LatticeMeasurement;
use crate::metrics::{MetricSample, MetricsRecorder, ObservableSummary};

/// Per-chain results.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChainSummary {
    /// Chain index.
    pub chain: usize,
    /// Averages over this chain's samples.
    pub statistics: ObservableSummary,
    /// Accepted flips after burn-in.
    pub accepted: usize,
    /// Proposed flips after burn-in.
    pub proposed: usize,
    /// `accepted / proposed`, zero when nothing was proposed.
    pub acceptance_rate: f64,
    /// `|tracked energy - recomputed energy|` at the end of the chain.
    pub energy_drift: f64,
    /// `|tracked magnetization - recomputed magnetization|` at the end of the chain.
    pub magnetization_drift: f64,
    /// Tracked observable minus `action` on the final configuration.
    pub observable_drift: i64,
    /// Energy of the final configuration.
    pub final_energy: f64,
    /// Magnetization of the final configuration.
    pub final_magnetization: f64,
}

/// Summary returned to callers after a run completes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    /// Sites per lattice.
    pub lattice_size: usize,
    /// Sampling temperature.
    pub temperature: f64,
    /// Averages pooled over every chain.
    pub pooled: ObservableSummary,
    /// Acceptance rate pooled over every chain.
    pub acceptance_rate: f64,
    /// Per-chain breakdown, ordered by chain index.
    pub chains: Vec<ChainSummary>,
    /// Metrics CSV written during the run.
    pub metrics_path: Option<PathBuf>,
    /// Manifest path, if emitted.
    pub manifest_path: Option<PathBuf>,
    /// Every recorded sample, grouped by chain.
    pub samples: Vec<MetricSample>,
}

/// Metropolis rule: always accept downhill moves, otherwise accept with
/// probability `exp(-delta / T)`.
pub fn metropolis_accept(delta_energy: f64, temperature: f64, rng: &mut RngHandle) -> bool {
    delta_energy <= 0.0 || rng.uniform() < (-delta_energy / temperature).exp()
}

/// Lattice plus the quantities tracked incrementally alongside it.
#[derive(Debug, Clone)]
pub struct ChainState {
    lattice: Lattice1D,
    energy: f64,
    magnetization: f64,
    observable: i64,
}

impl ChainState {
    /// Seeds the tracked quantities from a full evaluation of `lattice`.
    pub fn new(lattice: Lattice1D, measurement: &LatticeMeasurement) -> Self {
        let energy = lattice.energy();
        let magnetization = lattice.magnetization();
        let observable = measurement.measure(&lattice);
        Self {
            lattice,
            energy,
            magnetization,
            observable,
        }
    }

    /// Current lattice configuration.
    pub fn lattice(&self) -> &Lattice1D {
        &self.lattice
    }

    /// Incrementally tracked energy.
    pub fn energy(&self) -> f64 {
        self.energy
    }

    /// Incrementally tracked magnetization.
    pub fn magnetization(&self) -> f64 {
        self.magnetization
    }

    /// Incrementally tracked observable.
    pub fn observable(&self) -> i64 {
        self.observable
    }

    /// Proposes `num_sites` single-site flips at uniformly random sites.
    ///
    /// Returns the number of accepted flips.
    pub fn sweep(
        &mut self,
        measurement: &LatticeMeasurement,
        temperature: f64,
        rng: &mut RngHandle,
    ) -> usize {
        let n = self.lattice.num_sites();
        let mut accepted = 0;
        for _ in 0..n {
            let site = rng.site(n);
            let delta_energy = self.lattice.energy_diff(site);
            if metropolis_accept(delta_energy, temperature, rng) {
                let delta_observable = measurement.measure_diff(&self.lattice, site);
                self.energy += delta_energy;
                self.magnetization += self.lattice.flip_fetch_magnetization_diff(site);
                self.observable += delta_observable;
                accepted += 1;
            }
        }
        accepted
    }
}

struct ChainRun {
    summary: ChainSummary,
    samples: Vec<MetricSample>,
}

/// Runs every chain of `config` and aggregates the results.
pub fn run(
    measurement: &LatticeMeasurement,
    config: &RunConfig,
) -> Result<RunSummary, StatmechError> {
    config.validate()?;
    if config.sweeps == 0 {
        warn!("sweeps is zero; no samples will be recorded");
    }

    let runs: Vec<ChainRun> = (0..config.chains)
        .into_par_iter()
        .map(|chain| run_chain(measurement, config, chain))
        .collect::<Result<Vec<_>, StatmechError>>()?;

    let num_sites = measurement.lattice_size();
    let mut recorder = MetricsRecorder::new();
    let mut chains = Vec::with_capacity(runs.len());
    for run in runs {
        recorder.extend(run.samples);
        chains.push(run.summary);
    }

    let pooled =
        ObservableSummary::from_samples(recorder.samples(), num_sites, config.temperature);
    let accepted: usize = chains.iter().map(|c| c.accepted).sum();
    let proposed: usize = chains.iter().map(|c| c.proposed).sum();
    let acceptance_rate = ratio(accepted, proposed);

    let mut metrics_path = None;
    let mut manifest_path = None;
    if let Some(run_dir) = &config.output.run_directory {
        std::fs::create_dir_all(run_dir)
            .map_err(|err| StatmechError::io("run-dir-create", err, run_dir))?;
        let path = run_dir.join(&config.output.metrics_file);
        recorder.write_csv(&path)?;
        metrics_path = Some(path);

        let manifest = RunManifest {
            config: config.clone(),
            master_seed: config.seed_policy.master_seed,
            seed_label: config.seed_policy.label.clone(),
            lattice_size: num_sites,
            pooled: pooled.clone(),
            acceptance_rate,
            metrics_file: Some(config.output.metrics_file.clone()),
        };
        let path = run_dir.join(&config.output.manifest_file);
        manifest.write(&path)?;
        manifest_path = Some(path);
    }

    info!(
        lattice_size = num_sites,
        temperature = config.temperature,
        chains = config.chains,
        samples = pooled.samples,
        energy_per_site = pooled.energy_per_site,
        abs_magnetization_per_site = pooled.abs_magnetization_per_site,
        acceptance_rate,
        "measurement run complete"
    );

    Ok(RunSummary {
        lattice_size: num_sites,
        temperature: config.temperature,
        pooled,
        acceptance_rate,
        chains,
        metrics_path,
        manifest_path,
        samples: recorder.into_samples(),
    })
}

fn run_chain(
    measurement: &LatticeMeasurement,
    config: &RunConfig,
    chain: usize,
) -> Result<ChainRun, StatmechError> {
    let lattice_config = &config.lattice;
    let master_seed = config.seed_policy.master_seed;
    let mut lattice = Lattice1D::new(
        measurement.lattice_size(),
        lattice_config.coupling,
        lattice_config.field,
        lattice_config.boundary,
    )?;
    if lattice_config.initial == InitialState::Random {
        let mut init_rng =
            RngHandle::from_seed(determinism::initial_state_seed(master_seed, chain));
        lattice.randomize(&mut init_rng);
    }

    let mut rng = RngHandle::from_seed(determinism::chain_seed(master_seed, chain));
    let mut state = ChainState::new(lattice, measurement);
    let num_sites = state.lattice().num_sites();
    let mut samples = Vec::with_capacity(config.sweeps / config.thinning + 1);
    let mut accepted_total = 0;
    let mut proposed_total = 0;

    for sweep in 0..config.burn_in + config.sweeps {
        let accepted = state.sweep(measurement, config.temperature, &mut rng);
        let Some(recorded) = sweep.checked_sub(config.burn_in) else {
            continue;
        };
        accepted_total += accepted;
        proposed_total += num_sites;
        if recorded % config.thinning == 0 {
            samples.push(MetricSample {
                chain,
                sweep: recorded,
                energy: state.energy(),
                magnetization: state.magnetization(),
                observable: state.observable(),
                accepted,
                proposed: num_sites,
            });
        }
    }

    let final_energy = state.lattice().energy();
    let final_magnetization = state.lattice().magnetization();
    let summary = ChainSummary {
        chain,
        statistics: ObservableSummary::from_samples(&samples, num_sites, config.temperature),
        accepted: accepted_total,
        proposed: proposed_total,
        acceptance_rate: ratio(accepted_total, proposed_total),
        energy_drift: (state.energy() - final_energy).abs(),
        magnetization_drift: (state.magnetization() - final_magnetization).abs(),
        observable_drift: state.observable() - measurement.measure(state.lattice()),
        final_energy,
        final_magnetization,
    };
    debug!(
        chain,
        samples = samples.len(),
        acceptance_rate = summary.acceptance_rate,
        energy_drift = summary.energy_drift,
        "chain finished"
    );
    Ok(ChainRun { summary, samples })
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}
