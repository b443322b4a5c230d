//! Selection by swap-with-last index removal.

use crate::prng::SamplePrng;

/// Without replacement: maintain `Pop = [1..n]`; repeat `k` times, picking a
/// uniform position, recording its value, and moving the last remaining
/// population member into the vacated slot.
pub fn sample_by_index(n: usize, k: usize, prng: &mut dyn SamplePrng, fast: bool) -> Vec<usize> {
    if fast && k > n - k {
        let complement = sample_by_index_without_replacement(n, n - k, prng);
        let drawn: std::collections::HashSet<usize> = complement.into_iter().collect();
        return (1..=n).filter(|i| !drawn.contains(i)).collect();
    }
    sample_by_index_without_replacement(n, k, prng)
}

fn sample_by_index_without_replacement(n: usize, k: usize, prng: &mut dyn SamplePrng) -> Vec<usize> {
    let mut pop: Vec<usize> = (1..=n).collect();
    let mut nprime = n;
    let mut s = Vec::with_capacity(k);
    for _ in 0..k {
        let w = 1 + prng.below(nprime);
        s.push(pop[w - 1]);
        let last = pop.pop().unwrap();
        if w < nprime {
            pop[w - 1] = last;
        }
        nprime -= 1;
    }
    s
}

/// With replacement: `k` draws of `randint(1, n+1)`.
pub fn sample_by_index_with_replacement(n: usize, k: usize, prng: &mut dyn SamplePrng) -> Vec<usize> {
    (0..k).map(|_| 1 + prng.below(n)).collect()
}

/// `fast=true` without replacement, forced through the complement path
/// regardless of which half is smaller (used by the dispatcher once it has
/// already decided `fast` applies).
pub fn sample_by_index_fast(n: usize, k: usize, prng: &mut dyn SamplePrng) -> Vec<usize> {
    sample_by_index(n, k, prng, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::FakeGenerator;

    #[test]
    fn without_replacement_matches_reference() {
        let mut ff = FakeGenerator::new();
        assert_eq!(sample_by_index(5, 2, &mut ff, false), vec![2, 3]);
    }
}
