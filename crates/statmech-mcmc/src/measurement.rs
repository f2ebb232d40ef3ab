use std::fmt;
use std::sync::Arc;

use statmech_core::{Lattice, StatmechError};
use statmech_lattice::observables;

use crate::config::RunConfig;
use crate::kernel::{self, RunSummary};

/// Observable evaluated on a lattice at a site.
///
/// Full-lattice observables ignore the site; incremental ones return the
/// change a flip of that site would cause.
pub type Experiment<T> = Arc<dyn Fn(&dyn Lattice, usize) -> T + Send + Sync>;

/// Wraps a closure or function as an [`Experiment`].
pub fn experiment<T, F>(f: F) -> Experiment<T>
where
    F: Fn(&dyn Lattice, usize) -> T + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Lattice size paired with an integer observable and its single-flip delta.
///
/// A run seeds each chain's running observable with `action` and afterwards
/// only ever adds `diff_action` for accepted flips, evaluated before the
/// flip is applied. The pair is consistent when the running value keeps
/// matching `action` on the final configuration.
#[derive(Clone)]
pub struct LatticeMeasurement {
    lattice_size: usize,
    action: Experiment<i64>,
    diff_action: Experiment<i64>,
}

impl LatticeMeasurement {
    /// Bundles a lattice size with an observable and its incremental form.
    pub fn new(lattice_size: usize, action: Experiment<i64>, diff_action: Experiment<i64>) -> Self {
        Self {
            lattice_size,
            action,
            diff_action,
        }
    }

    /// Measures the total spin.
    pub fn magnetization(lattice_size: usize) -> Self {
        Self::new(
            lattice_size,
            experiment(observables::spin_sum),
            experiment(observables::spin_sum_diff),
        )
    }

    /// Measures the nearest-neighbour correlation `sum(s_i * s_j)`.
    pub fn bond_correlation(lattice_size: usize) -> Self {
        Self::new(
            lattice_size,
            experiment(observables::bond_sum),
            experiment(observables::bond_sum_diff),
        )
    }

    /// Number of sites of every lattice built for this measurement.
    pub fn lattice_size(&self) -> usize {
        self.lattice_size
    }

    /// Evaluates the full observable on `lattice`.
    pub fn measure(&self, lattice: &dyn Lattice) -> i64 {
        (self.action)(lattice, 0)
    }

    /// Change of the observable if `site` were flipped.
    pub fn measure_diff(&self, lattice: &dyn Lattice, site: usize) -> i64 {
        (self.diff_action)(lattice, site)
    }

    /// Runs the Metropolis sampler described by `config`.
    pub fn run(&self, config: &RunConfig) -> Result<RunSummary, StatmechError> {
        kernel::run(self, config)
    }
}

impl fmt::Debug for LatticeMeasurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatticeMeasurement")
            .field("lattice_size", &self.lattice_size)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use statmech_core::Boundary;
    use statmech_lattice::Lattice1D;

    #[test]
    fn closures_can_be_experiments() {
        let measurement = LatticeMeasurement::new(
            4,
            experiment(|lattice: &dyn Lattice, _| lattice.num_sites() as i64),
            experiment(|_: &dyn Lattice, _| 0),
        );
        let lattice = Lattice1D::new(4, 1.0, 0.0, Boundary::Open).unwrap();
        assert_eq!(measurement.measure(&lattice), 4);
        assert_eq!(measurement.measure_diff(&lattice, 2), 0);
        assert_eq!(measurement.lattice_size(), 4);
    }

    #[test]
    fn builtin_measurements_read_ordered_lattice() {
        let lattice = Lattice1D::new(6, 1.0, 0.0, Boundary::Periodic).unwrap();
        assert_eq!(LatticeMeasurement::magnetization(6).measure(&lattice), 6);
        assert_eq!(LatticeMeasurement::bond_correlation(6).measure(&lattice), 6);
        assert_eq!(
            LatticeMeasurement::bond_correlation(6).measure_diff(&lattice, 0),
            -4
        );
    }

    #[test]
    fn debug_hides_closures() {
        let rendered = format!("{:?}", LatticeMeasurement::magnetization(3));
        assert!(rendered.contains("lattice_size: 3"));
    }
}
