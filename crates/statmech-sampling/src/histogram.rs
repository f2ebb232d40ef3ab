use std::path::Path;

use serde::{Deserialize, Serialize};
use statmech_core::errors::ErrorInfo;
use statmech_core::StatmechError;

/// Equal-width histogram over `[0, 1)`.
///
/// Values below `0` (and NaN) land in the first bin, values at or above `1` in
/// the last one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "HistogramRecord")]
pub struct Histogram {
    counts: Vec<u64>,
}

#[derive(Deserialize)]
struct HistogramRecord {
    counts: Vec<u64>,
}

impl TryFrom<HistogramRecord> for Histogram {
    type Error = StatmechError;

    fn try_from(record: HistogramRecord) -> Result<Self, Self::Error> {
        let mut histogram = Histogram::new(record.counts.len())?;
        histogram.counts = record.counts;
        Ok(histogram)
    }
}

#[derive(Serialize)]
struct BinRow {
    lower_edge: f64,
    count: u64,
}

impl Histogram {
    /// Creates an empty histogram with `bins` bins.
    pub fn new(bins: usize) -> Result<Self, StatmechError> {
        if bins == 0 {
            return Err(StatmechError::Sampling(
                ErrorInfo::new("empty-histogram", "a histogram needs at least one bin")
                    .with_hint("set bins to a positive value"),
            ));
        }
        Ok(Self {
            counts: vec![0; bins],
        })
    }

    /// Number of bins.
    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    /// Counts each value in its bin.
    pub fn add(&mut self, value: f64) {
        let bins = self.counts.len();
        // float-to-int casts saturate, NaN becomes 0
        let index = ((value * bins as f64) as usize).min(bins - 1);
        self.counts[index] += 1;
    }

    /// Per-bin counts, lowest bin first.
    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// Total number of recorded values.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Lower edge of bin `index`.
    pub fn bin_lower_edge(&self, index: usize) -> f64 {
        index as f64 / self.counts.len() as f64
    }

    /// Adds the counts of `other` into `self`.
    pub fn merge(&mut self, other: &Histogram) -> Result<(), StatmechError> {
        if other.bins() != self.bins() {
            return Err(StatmechError::Sampling(
                ErrorInfo::new("bin-mismatch", "histograms must have the same number of bins")
                    .with_context("left", self.bins())
                    .with_context("right", other.bins()),
            ));
        }
        for (count, extra) in self.counts.iter_mut().zip(&other.counts) {
            *count += extra;
        }
        Ok(())
    }

    /// Writes `lower_edge,count` rows, one per bin, with a header.
    pub fn write_csv(&self, path: &Path) -> Result<(), StatmechError> {
        let mut writer = csv::Writer::from_path(path)
            .map_err(|err| StatmechError::io("histogram-open", err, path))?;
        for (index, &count) in self.counts.iter().enumerate() {
            writer
                .serialize(BinRow {
                    lower_edge: self.bin_lower_edge(index),
                    count,
                })
                .map_err(|err| StatmechError::io("histogram-write", err, path))?;
        }
        writer
            .flush()
            .map_err(|err| StatmechError::io("histogram-flush", err, path))
    }
}
