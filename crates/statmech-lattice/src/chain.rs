use serde::{Deserialize, Serialize};
use statmech_core::errors::ErrorInfo;
use statmech_core::{
    is_valid_spin, Boundary, Lattice, RngHandle, Spin, StatmechError, SPIN_DOWN, SPIN_UP,
};
use tracing::debug;

/// Magnetization change caused by flipping a spin whose current value is `old_spin`.
pub fn magnetization_diff(old_spin: Spin) -> f64 {
    -2.0 * f64::from(old_spin)
}

/// Nearest-neighbour Ising chain.
///
/// Energy is `E = -J * sum(s_i * s_{i+1}) - H * sum(s_i)`, where the bond sum
/// runs over `0..n-1` for [`Boundary::Open`] and over `0..n` (with the last site
/// bonded to the first) for [`Boundary::Periodic`]. A periodic chain of one site
/// bonds the site with itself, so its coupling term never changes under a flip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "LatticeRecord")]
pub struct Lattice1D {
    spins: Vec<Spin>,
    coupling: f64,
    field: f64,
    boundary: Boundary,
}

/// Unchecked wire form; deserialization goes through [`Lattice1D::with_spins`].
#[derive(Deserialize)]
struct LatticeRecord {
    spins: Vec<Spin>,
    coupling: f64,
    field: f64,
    boundary: Boundary,
}

impl TryFrom<LatticeRecord> for Lattice1D {
    type Error = StatmechError;

    fn try_from(record: LatticeRecord) -> Result<Self, Self::Error> {
        Lattice1D::with_spins(record.spins, record.coupling, record.field, record.boundary)
    }
}

impl Lattice1D {
    /// Creates a chain of `num_sites` spins, all pointing up.
    pub fn new(
        num_sites: usize,
        coupling: f64,
        field: f64,
        boundary: Boundary,
    ) -> Result<Self, StatmechError> {
        Self::with_spins(vec![SPIN_UP; num_sites], coupling, field, boundary)
    }

    /// Creates a chain from an explicit spin configuration.
    pub fn with_spins(
        spins: Vec<Spin>,
        coupling: f64,
        field: f64,
        boundary: Boundary,
    ) -> Result<Self, StatmechError> {
        if spins.is_empty() {
            return Err(StatmechError::Lattice(
                ErrorInfo::new("empty-lattice", "a lattice needs at least one site")
                    .with_context("num_sites", 0),
            ));
        }
        if !coupling.is_finite() || !field.is_finite() {
            return Err(StatmechError::Lattice(
                ErrorInfo::new("non-finite-parameter", "coupling and field must be finite")
                    .with_context("coupling", coupling)
                    .with_context("field", field),
            ));
        }
        if let Some(site) = spins.iter().position(|&s| !is_valid_spin(s)) {
            return Err(StatmechError::Lattice(
                ErrorInfo::new("invalid-spin", "spins must be +1 or -1")
                    .with_context("site", site)
                    .with_context("value", spins[site]),
            ));
        }
        debug!(
            num_sites = spins.len(),
            coupling,
            field,
            boundary = boundary.as_str(),
            "built 1d lattice"
        );
        Ok(Self {
            spins,
            coupling,
            field,
            boundary,
        })
    }

    /// Boundary condition fixed at construction.
    pub fn boundary(&self) -> Boundary {
        self.boundary
    }

    /// Read-only view of the spin configuration.
    pub fn spins(&self) -> &[Spin] {
        &self.spins
    }

    /// Draws every spin independently and uniformly (hot start).
    pub fn randomize(&mut self, rng: &mut RngHandle) {
        for spin in &mut self.spins {
            *spin = if rng.coin_flip() == 1 { SPIN_UP } else { SPIN_DOWN };
        }
    }

    fn left(&self, i: usize) -> Option<usize> {
        match (i, self.boundary) {
            (0, Boundary::Open) => None,
            (0, Boundary::Periodic) => Some(self.spins.len() - 1),
            _ => Some(i - 1),
        }
    }

    fn right(&self, i: usize) -> Option<usize> {
        let n = self.spins.len();
        match self.boundary {
            _ if i + 1 < n => Some(i + 1),
            Boundary::Periodic => Some(0),
            Boundary::Open => None,
        }
    }

    fn bond_count(&self) -> usize {
        match self.boundary {
            Boundary::Periodic => self.spins.len(),
            Boundary::Open => self.spins.len() - 1,
        }
    }
}

impl Lattice for Lattice1D {
    fn num_sites(&self) -> usize {
        self.spins.len()
    }

    fn coupling(&self) -> f64 {
        self.coupling
    }

    fn field(&self) -> f64 {
        self.field
    }

    fn spin(&self, i: usize) -> Spin {
        self.spins[i]
    }

    /// # Panics
    ///
    /// Panics when `i >= num_sites()`.
    fn neighbour_spin_sum(&self, i: usize) -> i32 {
        assert!(i < self.spins.len(), "site {i} out of range");
        [self.left(i), self.right(i)]
            .into_iter()
            .flatten()
            .filter(|&j| j != i)
            .map(|j| i32::from(self.spins[j]))
            .sum()
    }

    fn energy(&self) -> f64 {
        let n = self.spins.len();
        let bonds: i64 = (0..self.bond_count())
            .map(|i| i64::from(self.spins[i]) * i64::from(self.spins[(i + 1) % n]))
            .sum();
        let total: i64 = self.spins.iter().map(|&s| i64::from(s)).sum();
        -self.coupling * bonds as f64 - self.field * total as f64
    }

    fn energy_diff(&self, i: usize) -> f64 {
        let spin = f64::from(self.spins[i]);
        let neighbours = f64::from(self.neighbour_spin_sum(i));
        2.0 * spin * (self.coupling * neighbours + self.field)
    }

    fn magnetization(&self) -> f64 {
        self.spins.iter().map(|&s| i64::from(s)).sum::<i64>() as f64
    }

    fn magnetization_diff(&self, i: usize) -> f64 {
        magnetization_diff(self.spins[i])
    }

    fn flip_fetch_magnetization_diff(&mut self, i: usize) -> f64 {
        let old = self.spins[i];
        self.spins[i] = -old;
        magnetization_diff(old)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(spins: &[Spin], boundary: Boundary) -> Lattice1D {
        Lattice1D::with_spins(spins.to_vec(), 1.0, 0.0, boundary).unwrap()
    }

    #[test]
    fn neighbours_wrap_only_when_periodic() {
        let open = chain(&[1, -1, 1, 1], Boundary::Open);
        assert_eq!(open.neighbour_spin_sum(0), -1);
        assert_eq!(open.neighbour_spin_sum(3), 1);
        assert_eq!(open.neighbour_spin_sum(1), 2);

        let periodic = chain(&[1, -1, 1, 1], Boundary::Periodic);
        assert_eq!(periodic.neighbour_spin_sum(0), 0);
        assert_eq!(periodic.neighbour_spin_sum(3), 2);
    }

    #[test]
    fn single_site_periodic_ignores_self_bond() {
        let mut lattice = Lattice1D::new(1, 1.0, 0.5, Boundary::Periodic).unwrap();
        assert_eq!(lattice.neighbour_spin_sum(0), 0);
        let before = lattice.energy();
        let diff = lattice.energy_diff(0);
        lattice.flip_fetch_magnetization_diff(0);
        assert!((before + diff - lattice.energy()).abs() < 1e-12);
    }

    #[test]
    fn ordered_chain_energy() {
        let periodic = Lattice1D::new(8, 1.0, 0.0, Boundary::Periodic).unwrap();
        assert_eq!(periodic.energy(), -8.0);
        let open = Lattice1D::new(8, 1.0, 0.0, Boundary::Open).unwrap();
        assert_eq!(open.energy(), -7.0);
    }

    #[test]
    fn field_term_counts_every_site() {
        let lattice = chain(&[1, 1, -1], Boundary::Open);
        let with_field = Lattice1D::with_spins(vec![1, 1, -1], 0.0, 2.0, Boundary::Open).unwrap();
        assert_eq!(lattice.energy(), 0.0);
        assert_eq!(with_field.energy(), -2.0);
    }

    #[test]
    fn rejects_bad_construction() {
        let empty = Lattice1D::new(0, 1.0, 0.0, Boundary::Open).unwrap_err();
        assert_eq!(empty.info().code, "empty-lattice");

        let nan = Lattice1D::new(4, f64::NAN, 0.0, Boundary::Open).unwrap_err();
        assert_eq!(nan.info().code, "non-finite-parameter");

        let bad = Lattice1D::with_spins(vec![1, 0, -1], 1.0, 0.0, Boundary::Open).unwrap_err();
        assert_eq!(bad.info().code, "invalid-spin");
        assert_eq!(bad.info().context["site"], "1");
    }

    #[test]
    #[should_panic]
    fn out_of_range_flip_panics() {
        let mut lattice = Lattice1D::new(3, 1.0, 0.0, Boundary::Open).unwrap();
        lattice.flip_fetch_magnetization_diff(3);
    }
}
