#![deny(missing_docs)]
//! Core traits and data types shared by the statmech simulation crates.
//!
//! The central abstraction is [`Lattice`]: a fixed set of two-state sites that
//! can report its energy and magnetization, and the change in either quantity
//! caused by flipping a single site. Concrete topologies live in
//! `statmech-lattice`; the Monte Carlo harness in `statmech-mcmc` only ever talks
//! to `&dyn Lattice`.

use serde::{Deserialize, Serialize};

pub mod errors;
pub mod rng;

pub use errors::{ErrorInfo, StatmechError};
pub use rng::{derive_substream_seed, RngHandle};

/// Value of a single spin. Always exactly `+1` or `-1`.
pub type Spin = i8;

/// Spin pointing up.
pub const SPIN_UP: Spin = 1;

/// Spin pointing down.
pub const SPIN_DOWN: Spin = -1;

/// Returns `true` when `value` is a legal spin.
pub fn is_valid_spin(value: Spin) -> bool {
    value == SPIN_UP || value == SPIN_DOWN
}

/// Treatment of the sites at the ends of a finite lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Boundary {
    /// The last site couples back to the first one.
    Periodic,
    /// End sites have a single neighbour.
    Open,
}

impl Boundary {
    /// Stable lowercase label used in manifests and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Boundary::Periodic => "periodic",
            Boundary::Open => "open",
        }
    }
}

/// Capability set every lattice topology exposes to the Monte Carlo harness.
///
/// Site indices must lie in `0..num_sites()`. Passing anything else is a
/// programming error and panics; none of these methods report it as a
/// recoverable failure.
pub trait Lattice: Send + Sync {
    /// Number of sites. Fixed at construction.
    fn num_sites(&self) -> usize;

    /// Nearest-neighbour coupling constant `J`.
    fn coupling(&self) -> f64;

    /// Uniform external field `H`.
    fn field(&self) -> f64;

    /// Spin currently stored at site `i`.
    fn spin(&self, i: usize) -> Spin;

    /// Sum of the spins bonded to site `i`, excluding `i` itself.
    fn neighbour_spin_sum(&self, i: usize) -> i32;

    /// Total energy of the current configuration.
    fn energy(&self) -> f64;

    /// Energy change a flip of site `i` would cause. Does not mutate.
    ///
    /// Satisfies `energy() + energy_diff(i) == energy()` evaluated after the
    /// flip.
    fn energy_diff(&self, i: usize) -> f64;

    /// Sum of all spin values.
    fn magnetization(&self) -> f64;

    /// Magnetization change a flip of site `i` would cause. Does not mutate.
    fn magnetization_diff(&self, i: usize) -> f64;

    /// Flips site `i` and returns the resulting magnetization change.
    ///
    /// This is the only mutating operation of the trait.
    fn flip_fetch_magnetization_diff(&mut self, i: usize) -> f64;
}
