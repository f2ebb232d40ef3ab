use statmech_core::Boundary;
use statmech_mcmc::{InitialState, LatticeMeasurement, RunConfig};

fn deterministic_config() -> RunConfig {
    let mut config = RunConfig::for_boundary(Boundary::Periodic);
    config.temperature = 1.5;
    config.sweeps = 20;
    config.burn_in = 5;
    config.chains = 3;
    config.seed_policy.master_seed = 0xDEC0DE;
    config
}

#[test]
fn identical_seeds_reproduce_samples() {
    let measurement = LatticeMeasurement::magnetization(24);
    let config = deterministic_config();
    let first = measurement.run(&config).unwrap();
    let second = measurement.run(&config).unwrap();
    assert_eq!(first, second);
}

#[test]
fn different_seeds_diverge() {
    let measurement = LatticeMeasurement::magnetization(24);
    let config = deterministic_config();
    let mut other = config.clone();
    other.seed_policy.master_seed += 1;
    let a = measurement.run(&config).unwrap();
    let b = measurement.run(&other).unwrap();
    assert_ne!(a.samples, b.samples);
}

#[test]
fn chain_results_do_not_depend_on_chain_count() {
    let measurement = LatticeMeasurement::bond_correlation(16);
    let mut one = deterministic_config();
    one.chains = 1;
    let mut four = deterministic_config();
    four.chains = 4;

    let single = measurement.run(&one).unwrap();
    let many = measurement.run(&four).unwrap();
    let first_chain: Vec<_> = many.samples.iter().filter(|s| s.chain == 0).cloned().collect();
    assert_eq!(single.samples, first_chain);
    assert_eq!(single.chains[0], many.chains[0]);
}

#[test]
fn random_start_leaves_room_for_zero_temperature_moves() {
    let measurement = LatticeMeasurement::magnetization(32);
    let mut config = deterministic_config();
    config.burn_in = 0;
    config.sweeps = 1;
    config.chains = 1;
    config.temperature = 1e-6;
    let ordered = measurement.run(&config).unwrap();
    assert_eq!(ordered.samples[0].magnetization, 32.0);
    assert_eq!(ordered.samples[0].accepted, 0);

    config.lattice.initial = InitialState::Random;
    let random = measurement.run(&config).unwrap();
    assert!(random.samples[0].accepted > 0);
}
