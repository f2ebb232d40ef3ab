use std::path::Path;

use serde::{Deserialize, Serialize};
use statmech_core::StatmechError;

/// Observables of one chain recorded after a sweep.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MetricSample {
    /// Chain index.
    pub chain: usize,
    /// Sweep number counted from the end of burn-in.
    pub sweep: usize,
    /// Incrementally tracked total energy.
    pub energy: f64,
    /// Incrementally tracked total magnetization.
    pub magnetization: f64,
    /// Incrementally tracked value of the measured observable.
    pub observable: i64,
    /// Accepted flips within the sweep.
    pub accepted: usize,
    /// Proposed flips within the sweep.
    pub proposed: usize,
}

/// Sample averages of the thermodynamic observables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ObservableSummary {
    /// Number of samples the averages are taken over.
    pub samples: usize,
    /// `<E> / N`.
    pub energy_per_site: f64,
    /// `<M> / N`.
    pub magnetization_per_site: f64,
    /// `<|M|> / N`.
    pub abs_magnetization_per_site: f64,
    /// Mean of the measured observable.
    pub mean_observable: f64,
    /// `Var(E) / (T² N)`.
    pub specific_heat: f64,
    /// `Var(M) / (T N)`.
    pub susceptibility: f64,
}

impl ObservableSummary {
    /// Averages `samples` taken on a lattice of `num_sites` at `temperature`.
    ///
    /// Returns zeros when no samples were recorded.
    pub fn from_samples<'a, I>(samples: I, num_sites: usize, temperature: f64) -> Self
    where
        I: IntoIterator<Item = &'a MetricSample>,
    {
        let mut energies = Vec::new();
        let mut magnetizations = Vec::new();
        let mut observable_total = 0.0;
        for sample in samples {
            energies.push(sample.energy);
            magnetizations.push(sample.magnetization);
            observable_total += sample.observable as f64;
        }
        let count = energies.len();
        if count == 0 {
            return Self {
                samples: 0,
                energy_per_site: 0.0,
                magnetization_per_site: 0.0,
                abs_magnetization_per_site: 0.0,
                mean_observable: 0.0,
                specific_heat: 0.0,
                susceptibility: 0.0,
            };
        }
        let n = num_sites as f64;
        let abs_mean = magnetizations.iter().map(|m| m.abs()).sum::<f64>() / count as f64;
        Self {
            samples: count,
            energy_per_site: mean(&energies) / n,
            magnetization_per_site: mean(&magnetizations) / n,
            abs_magnetization_per_site: abs_mean / n,
            mean_observable: observable_total / count as f64,
            specific_heat: variance(&energies) / (temperature * temperature * n),
            susceptibility: variance(&magnetizations) / (temperature * n),
        }
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn variance(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let mean = mean(values);
    let sq_mean = values.iter().map(|v| v * v).sum::<f64>() / values.len() as f64;
    (sq_mean - mean * mean).max(0.0)
}

/// Collects samples from every chain for CSV export.
#[derive(Debug, Default)]
pub struct MetricsRecorder {
    samples: Vec<MetricSample>,
}

impl MetricsRecorder {
    /// Creates a new recorder instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the samples of one chain.
    pub fn extend(&mut self, samples: impl IntoIterator<Item = MetricSample>) {
        self.samples.extend(samples);
    }

    /// Returns an immutable view over the recorded samples.
    pub fn samples(&self) -> &[MetricSample] {
        &self.samples
    }

    /// Consumes the recorder, returning the samples.
    pub fn into_samples(self) -> Vec<MetricSample> {
        self.samples
    }

    /// Writes the recorded samples to a CSV file with a header row.
    pub fn write_csv(&self, path: &Path) -> Result<(), StatmechError> {
        let mut writer = csv::Writer::from_path(path)
            .map_err(|err| StatmechError::io("metrics-open", err, path))?;
        for sample in &self.samples {
            writer
                .serialize(sample)
                .map_err(|err| StatmechError::io("metrics-write", err, path))?;
        }
        writer
            .flush()
            .map_err(|err| StatmechError::io("metrics-flush", err, path))
    }
}
