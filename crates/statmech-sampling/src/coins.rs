use statmech_core::errors::ErrorInfo;
use statmech_core::{RngHandle, StatmechError};

/// Coin flips accumulated into a single real number.
pub const FLIPS: usize = 32;

/// Weight `2^-(j+1)` of flip `j`.
fn flip_weight(j: usize) -> f64 {
    0.5_f64.powi(j as i32 + 1)
}

/// Uniform real on `[0, 1)` built from [`FLIPS`] fair coin flips.
///
/// Flip `j` contributes `f_j / 2^(j+1)`, so the result is a 32-bit binary
/// fraction.
pub fn uniform_real(rng: &mut RngHandle) -> f64 {
    (0..FLIPS)
        .map(|j| f64::from(rng.coin_flip()) * flip_weight(j))
        .sum()
}

/// Per-flip probabilities of a biased coin-flip real.
///
/// Flip `j` comes up `0` with probability `1 / (1 + exp(-lambda / 2^(j+1)))`.
/// Positive `lambda` favours zeros in the leading bits and pushes the
/// distribution towards `0`; `lambda = 0` is the fair case.
#[derive(Debug, Clone, PartialEq)]
pub struct BiasedCoins {
    lambda: f64,
    p_zero: [f64; FLIPS],
}

impl BiasedCoins {
    /// Precomputes the flip probabilities for `lambda`.
    pub fn new(lambda: f64) -> Result<Self, StatmechError> {
        if !lambda.is_finite() {
            return Err(StatmechError::Sampling(
                ErrorInfo::new("non-finite-lambda", "bias parameter must be finite")
                    .with_context("lambda", lambda),
            ));
        }
        let mut p_zero = [0.0; FLIPS];
        for (j, p) in p_zero.iter_mut().enumerate() {
            *p = 1.0 / (1.0 + (-lambda * flip_weight(j)).exp());
        }
        Ok(Self { lambda, p_zero })
    }

    /// Bias parameter.
    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Probability that flip `j` is `0`.
    pub fn p_zero(&self, j: usize) -> f64 {
        self.p_zero[j]
    }

    /// Expected value of [`biased_real`] for these coins.
    pub fn expected_mean(&self) -> f64 {
        self.p_zero
            .iter()
            .enumerate()
            .map(|(j, p)| (1.0 - p) * flip_weight(j))
            .sum()
    }
}

/// Real on `[0, 1)` accumulated from the biased flips of `coins`.
pub fn biased_real(coins: &BiasedCoins, rng: &mut RngHandle) -> f64 {
    coins
        .p_zero
        .iter()
        .enumerate()
        .map(|(j, &p)| f64::from(rng.weighted_flip(p)) * flip_weight(j))
        .sum()
}
