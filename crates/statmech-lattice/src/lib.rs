#![deny(missing_docs)]
//! Concrete lattice topologies implementing [`statmech_core::Lattice`].

/// One-dimensional spin chain.
pub mod chain;
/// Integer observables and their single-flip deltas.
pub mod observables;

pub use chain::{magnetization_diff, Lattice1D};
pub use observables::{bond_sum, bond_sum_diff, spin_sum, spin_sum_diff};
