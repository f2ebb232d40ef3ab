use std::fs;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use statmech_core::errors::ErrorInfo;
use statmech_core::{derive_substream_seed, RngHandle, StatmechError};
use tracing::{debug, info, warn};

use crate::coins::{biased_real, uniform_real, BiasedCoins};
use crate::histogram::Histogram;

/// Draws generated per RNG substream.
pub const CHUNK_SIZE: usize = 65_536;

const UNIFORM_FAMILY: u64 = 0;
const BIASED_FAMILY: u64 = 1;

/// YAML-configurable sampling experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    /// Directory receiving the histogram CSV files.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Bins per histogram.
    #[serde(default = "default_bins")]
    pub bins: usize,
    /// Sample counts of the fair-coin sequences.
    #[serde(default = "default_uniform_sizes")]
    pub uniform_sizes: Vec<usize>,
    /// Bias parameters of the biased sequences.
    #[serde(default = "default_lambdas")]
    pub lambdas: Vec<f64>,
    /// Sample count of every biased sequence.
    #[serde(default = "default_biased_size")]
    pub biased_size: usize,
    /// Seed all sequence substreams derive from.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

fn default_bins() -> usize {
    100
}

fn default_uniform_sizes() -> Vec<usize> {
    vec![100, 10_000, 1_000_000]
}

fn default_lambdas() -> Vec<f64> {
    vec![0.0, 0.5, 1.0, 2.0]
}

fn default_biased_size() -> usize {
    1_000_000
}

fn default_master_seed() -> u64 {
    0xC014_F11F_5EED_0002
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            bins: default_bins(),
            uniform_sizes: default_uniform_sizes(),
            lambdas: default_lambdas(),
            biased_size: default_biased_size(),
            master_seed: default_master_seed(),
        }
    }
}

impl SuiteConfig {
    /// Parses and validates a YAML document.
    pub fn from_yaml_str(contents: &str) -> Result<Self, StatmechError> {
        let config: SuiteConfig = serde_yaml::from_str(contents).map_err(|err| {
            StatmechError::Config(ErrorInfo::new("config-parse", err.to_string()))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a YAML file.
    pub fn from_yaml_path(path: &Path) -> Result<Self, StatmechError> {
        let contents =
            fs::read_to_string(path).map_err(|err| StatmechError::io("config-read", err, path))?;
        Self::from_yaml_str(&contents)
    }

    /// Rejects configurations that cannot produce histograms.
    pub fn validate(&self) -> Result<(), StatmechError> {
        if self.bins == 0 {
            return Err(StatmechError::Config(
                ErrorInfo::new("bins", "histograms need at least one bin")
                    .with_hint("the default is 100 bins"),
            ));
        }
        if let Some(lambda) = self.lambdas.iter().find(|l| !l.is_finite()) {
            return Err(StatmechError::Config(
                ErrorInfo::new("lambda", "bias parameters must be finite")
                    .with_context("lambda", lambda),
            ));
        }
        Ok(())
    }
}

/// File name of the fair sequence with `samples` draws.
pub fn uniform_file_name(samples: usize) -> String {
    format!("sequence{samples}.csv")
}

/// File name of the biased sequence for `lambda`, keyed by `10 * lambda`
/// truncated towards zero.
pub fn biased_file_name(lambda: f64) -> String {
    format!("sequence_biased{}.csv", (lambda * 10.0).trunc() as i64)
}

/// One histogram written by [`run_suite`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteOutput {
    /// CSV file written.
    pub path: PathBuf,
    /// Number of values histogrammed.
    pub samples: usize,
    /// Bias parameter, `None` for fair sequences.
    pub lambda: Option<f64>,
    /// The histogram itself.
    pub histogram: Histogram,
}

/// Histograms `samples` values drawn by `draw`.
///
/// The draws are split into [`CHUNK_SIZE`] chunks generated in parallel, chunk
/// `k` using substream `k` of `seed`, so the result does not depend on the
/// thread count.
pub fn sample_histogram<F>(
    samples: usize,
    bins: usize,
    seed: u64,
    draw: F,
) -> Result<Histogram, StatmechError>
where
    F: Fn(&mut RngHandle) -> f64 + Sync,
{
    let empty = Histogram::new(bins)?;
    let chunks = samples.div_ceil(CHUNK_SIZE);
    (0..chunks)
        .into_par_iter()
        .map(|chunk| -> Result<Histogram, StatmechError> {
            let start = chunk * CHUNK_SIZE;
            let len = CHUNK_SIZE.min(samples - start);
            let mut rng = RngHandle::substream(seed, chunk as u64);
            let mut histogram = empty.clone();
            for _ in 0..len {
                histogram.add(draw(&mut rng));
            }
            Ok(histogram)
        })
        .try_reduce(
            || empty.clone(),
            |mut left, right| {
                left.merge(&right)?;
                Ok(left)
            },
        )
}

/// Histogram of `samples` fair coin-flip reals.
pub fn uniform_histogram(
    samples: usize,
    bins: usize,
    seed: u64,
) -> Result<Histogram, StatmechError> {
    sample_histogram(samples, bins, seed, uniform_real)
}

/// Histogram of `samples` biased coin-flip reals.
pub fn biased_histogram(
    lambda: f64,
    samples: usize,
    bins: usize,
    seed: u64,
) -> Result<Histogram, StatmechError> {
    let coins = BiasedCoins::new(lambda)?;
    sample_histogram(samples, bins, seed, |rng| biased_real(&coins, rng))
}

/// Generates every configured sequence and writes one CSV histogram per sequence.
pub fn run_suite(config: &SuiteConfig) -> Result<Vec<SuiteOutput>, StatmechError> {
    config.validate()?;
    fs::create_dir_all(&config.output_dir)
        .map_err(|err| StatmechError::io("output-dir-create", err, &config.output_dir))?;

    let mut outputs: Vec<SuiteOutput> = Vec::with_capacity(config.uniform_sizes.len() + config.lambdas.len());

    info!(sequences = config.uniform_sizes.len(), "generating fair sequences");
    let uniform_seed = derive_substream_seed(config.master_seed, UNIFORM_FAMILY);
    for (index, &samples) in config.uniform_sizes.iter().enumerate() {
        let path = config.output_dir.join(uniform_file_name(samples));
        if outputs.iter().any(|output| output.path == path) {
            warn!(samples, path = %path.display(), "file name collides, overwriting");
        }
        let seed = derive_substream_seed(uniform_seed, index as u64);
        let histogram = uniform_histogram(samples, config.bins, seed)?;
        histogram.write_csv(&path)?;
        info!(samples, path = %path.display(), "fair sequence written");
        outputs.push(SuiteOutput {
            path,
            samples,
            lambda: None,
            histogram,
        });
    }

    info!(sequences = config.lambdas.len(), "generating biased sequences");
    let biased_seed = derive_substream_seed(config.master_seed, BIASED_FAMILY);
    for (index, &lambda) in config.lambdas.iter().enumerate() {
        let path = config.output_dir.join(biased_file_name(lambda));
        if outputs.iter().any(|output| output.path == path) {
            warn!(lambda, path = %path.display(), "file name collides, overwriting");
        }
        let seed = derive_substream_seed(biased_seed, index as u64);
        let histogram = biased_histogram(lambda, config.biased_size, config.bins, seed)?;
        histogram.write_csv(&path)?;
        info!(
            lambda,
            samples = config.biased_size,
            path = %path.display(),
            "biased sequence written"
        );
        outputs.push(SuiteOutput {
            path,
            samples: config.biased_size,
            lambda: Some(lambda),
            histogram,
        });
    }

    debug!(files = outputs.len(), "sampling suite finished");
    Ok(outputs)
}
