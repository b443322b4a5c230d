//! Waterman's Algorithm R, a single-pass reservoir sampler.

use crate::prng::SamplePrng;

/// Fill the reservoir with `1,...,k`, then for each `t` in `k+1,...,n` draw
/// `i` uniform in `[1,t]` and replace `S[i]` if `i <= k`.
pub fn waterman_r(n: usize, k: usize, prng: &mut dyn SamplePrng) -> Vec<usize> {
    let mut s: Vec<usize> = (1..=k).collect();
    for t in (k + 1)..=n {
        let i = 1 + prng.below(t);
        if i <= k {
            s[i - 1] = t;
        }
    }
    s
}
