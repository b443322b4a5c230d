//! Fisher-Yates-Knuth-Durstenfeld partial shuffle.

use crate::prng::SamplePrng;

/// Sample `k` out of `1,...,n` without replacement by partially shuffling
/// `{1,...,n}` and keeping the first `k` positions.
pub fn fykd_sample(n: usize, k: usize, prng: &mut dyn SamplePrng) -> Vec<usize> {
    let mut a: Vec<usize> = (1..=n).collect();
    let rand = prng.uniform_many(k);
    for (i, u) in rand.into_iter().enumerate() {
        let j = i + (u * (n - i) as f64) as usize;
        a.swap(i, j);
    }
    a.truncate(k);
    a
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::FakeGenerator;

    #[test]
    fn full_shuffle_is_a_permutation() {
        let mut ff = FakeGenerator::new();
        let mut sam = fykd_sample(5, 5, &mut ff);
        sam.sort_unstable();
        assert_eq!(sam, vec![1, 2, 3, 4, 5]);
    }
}
