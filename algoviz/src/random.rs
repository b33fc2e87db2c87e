use rand::seq::SliceRandom;
use rand::Rng;

use crate::config::InputConfig;

/// `config.array_len` distinct values from `[min_value, max_value]`.
///
/// Assumes a validated config: the value range is at least as wide as the
/// array, so rejection always finds a fresh value eventually.
pub fn random_array<R: Rng + ?Sized>(rng: &mut R, config: &InputConfig) -> Vec<i32> {
    let mut values = Vec::with_capacity(config.array_len);
    while values.len() < config.array_len {
        let v = rng.gen_range(config.min_value..=config.max_value);
        if !values.contains(&v) {
            values.push(v);
        }
    }
    values
}

/// `config.array_len` values in ascending order. Duplicates are allowed.
pub fn random_sorted_array<R: Rng + ?Sized>(rng: &mut R, config: &InputConfig) -> Vec<i32> {
    let mut values: Vec<i32> = (0..config.array_len)
        .map(|_| rng.gen_range(config.min_value..=config.max_value))
        .collect();
    values.sort_unstable();
    values
}

/// An element of `array`, or `None` if it is empty.
pub fn random_target<R: Rng + ?Sized>(rng: &mut R, array: &[i32]) -> Option<i32> {
    array.choose(rng).copied()
}
