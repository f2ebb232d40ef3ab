//! Every observable here has the shape `fn(&dyn Lattice, usize) -> i64` so it can
//! be plugged straight into a measurement harness. The full-lattice variants
//! ignore the site argument; the `_diff` variants return the change a flip of
//! that site would cause, in O(1).

use statmech_core::Lattice;

/// Sum of all spins as an exact integer.
pub fn spin_sum(lattice: &dyn Lattice, _site: usize) -> i64 {
    (0..lattice.num_sites())
        .map(|i| i64::from(lattice.spin(i)))
        .sum()
}

/// Change of [`spin_sum`] when `site` is flipped.
pub fn spin_sum_diff(lattice: &dyn Lattice, site: usize) -> i64 {
    -2 * i64::from(lattice.spin(site))
}

/// Sum of `s_i * s_j` over bonds between distinct sites.
///
/// For an ordered lattice this equals the number of such bonds; every
/// domain wall lowers it by two.
pub fn bond_sum(lattice: &dyn Lattice, _site: usize) -> i64 {
    let doubled: i64 = (0..lattice.num_sites())
        .map(|i| i64::from(lattice.spin(i)) * i64::from(lattice.neighbour_spin_sum(i)))
        .sum();
    doubled / 2
}

/// Change of [`bond_sum`] when `site` is flipped.
pub fn bond_sum_diff(lattice: &dyn Lattice, site: usize) -> i64 {
    -2 * i64::from(lattice.spin(site)) * i64::from(lattice.neighbour_spin_sum(site))
}
