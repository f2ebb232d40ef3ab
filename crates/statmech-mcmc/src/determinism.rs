use statmech_core::derive_substream_seed;

const INITIAL_STATE_SALT: u64 = 0xC0FF_EE15_1D1D_0000;

/// Derives the seed driving site selection and acceptance draws of a chain.
pub fn chain_seed(master_seed: u64, chain: usize) -> u64 {
    derive_substream_seed(master_seed, chain as u64)
}

/// Derives the seed used to draw a chain's random initial configuration.
///
/// Kept apart from [`chain_seed`] so switching between ordered and random
/// starts does not shift the proposal sequence.
pub fn initial_state_seed(master_seed: u64, chain: usize) -> u64 {
    derive_substream_seed(master_seed ^ INITIAL_STATE_SALT, chain as u64)
}
