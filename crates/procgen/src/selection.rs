//! Exact-quota random selection of point indices.

use rand::Rng;

/// Shuffle `0..count` with Fisher–Yates and return the first `take` entries.
///
/// Every index appears at most once and exactly `min(take, count)` are returned.
pub fn shuffled_prefix<R: Rng + ?Sized>(rng: &mut R, count: usize, take: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..count).collect();
    for i in (1..count).rev() {
        let j = rng.gen_range(0..=i);
        indices.swap(i, j);
    }
    indices.truncate(take.min(count));
    indices
}
