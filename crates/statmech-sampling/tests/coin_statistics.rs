use statmech_core::RngHandle;
use statmech_sampling::{biased_real, uniform_real, BiasedCoins};

fn sample_mean(mut draw: impl FnMut() -> f64, samples: usize) -> f64 {
    (0..samples).map(|_| draw()).sum::<f64>() / samples as f64
}

#[test]
fn fair_reals_average_one_half() {
    let mut rng = RngHandle::from_seed(21);
    let mean = sample_mean(|| uniform_real(&mut rng), 200_000);
    assert!((mean - 0.5).abs() < 0.005, "mean {mean}");
}

#[test]
fn zero_bias_matches_fair_coins() {
    let coins = BiasedCoins::new(0.0).unwrap();
    let mut rng = RngHandle::from_seed(22);
    let mean = sample_mean(|| biased_real(&coins, &mut rng), 200_000);
    assert!((mean - 0.5).abs() < 0.005, "mean {mean}");
}

#[test]
fn positive_bias_pulls_values_down() {
    for lambda in [0.5, 1.0, 2.0] {
        let coins = BiasedCoins::new(lambda).unwrap();
        let mut rng = RngHandle::from_seed(23);
        let mean = sample_mean(|| biased_real(&coins, &mut rng), 200_000);
        assert!(mean < 0.5, "lambda {lambda} mean {mean}");
        assert!(
            (mean - coins.expected_mean()).abs() < 0.005,
            "lambda {lambda} mean {mean} expected {}",
            coins.expected_mean()
        );
    }
}

#[test]
fn negative_bias_pushes_values_up() {
    let coins = BiasedCoins::new(-2.0).unwrap();
    assert!(coins.expected_mean() > 0.5);
    let mut rng = RngHandle::from_seed(24);
    let mean = sample_mean(|| biased_real(&coins, &mut rng), 100_000);
    assert!(mean > 0.5);
}

#[test]
fn draws_are_reproducible() {
    let mut a = RngHandle::from_seed(25);
    let mut b = RngHandle::from_seed(25);
    for _ in 0..100 {
        assert_eq!(uniform_real(&mut a), uniform_real(&mut b));
    }
}
