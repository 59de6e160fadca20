//! Seeded shuffles.

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Returns a copy of `items` in a pseudo-random order fixed by `seed`.
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut items = items.to_vec();
    items.shuffle(&mut rng);
    items
}
