use statmech_core::Boundary;
use statmech_mcmc::{exact, LatticeMeasurement, RunConfig};

fn long_run(temperature: f64, field: f64) -> RunConfig {
    let mut config = RunConfig::for_boundary(Boundary::Periodic);
    config.temperature = temperature;
    config.lattice.field = field;
    config.burn_in = 200;
    config.sweeps = 2_000;
    config.chains = 2;
    config.seed_policy.master_seed = 7;
    config
}

#[test]
fn zero_field_energy_matches_exact_chain() {
    let measurement = LatticeMeasurement::magnetization(128);
    let summary = measurement.run(&long_run(1.0, 0.0)).unwrap();
    let exact = exact::energy_per_site_zero_field(1.0, 1.0);
    assert!(
        (summary.pooled.energy_per_site - exact).abs() < 0.02,
        "sampled {} exact {}",
        summary.pooled.energy_per_site,
        exact
    );
}

#[test]
fn field_polarizes_chain() {
    let measurement = LatticeMeasurement::magnetization(128);
    let summary = measurement.run(&long_run(1.0, 0.5)).unwrap();
    let exact = exact::magnetization_per_site(1.0, 0.5, 1.0);
    assert!(
        (summary.pooled.magnetization_per_site - exact).abs() < 0.03,
        "sampled {} exact {}",
        summary.pooled.magnetization_per_site,
        exact
    );
}

#[test]
fn bond_correlation_tracks_energy_at_zero_field() {
    let measurement = LatticeMeasurement::bond_correlation(64);
    let mut config = long_run(2.0, 0.0);
    config.sweeps = 200;
    let summary = measurement.run(&config).unwrap();
    for sample in &summary.samples {
        assert_eq!(-(sample.observable as f64), sample.energy);
    }
}

#[test]
fn hot_chains_accept_more_than_cold_chains() {
    let measurement = LatticeMeasurement::magnetization(64);
    let mut cold = long_run(0.5, 0.0);
    cold.sweeps = 200;
    let mut hot = long_run(5.0, 0.0);
    hot.sweeps = 200;
    let cold = measurement.run(&cold).unwrap();
    let hot = measurement.run(&hot).unwrap();
    assert!(hot.acceptance_rate > cold.acceptance_rate);
    assert!(hot.pooled.abs_magnetization_per_site < cold.pooled.abs_magnetization_per_site);
}
