//! Real numbers from simulated coin flips, histogrammed.
//!
//! [`uniform_real`] and [`biased_real`] accumulate 32 flips into a binary
//! fraction; [`run_suite`] generates the configured sequences in parallel and
//! writes one `lower_edge,count` CSV histogram per sequence.

#![deny(missing_docs)]

/// Fair and biased coin-flip reals.
pub mod coins;
/// Fixed-width histograms on the unit interval.
pub mod histogram;
/// Sequence generation and CSV output.
pub mod suite;

pub use coins::{biased_real, uniform_real, BiasedCoins, FLIPS};
pub use histogram::Histogram;
pub use suite::{
    biased_file_name, biased_histogram, run_suite, sample_histogram, uniform_file_name,
    uniform_histogram, SuiteConfig, SuiteOutput, CHUNK_SIZE,
};
