//! Cormen et al.'s recursive sampling algorithm, unrolled into a loop to
//! avoid the unbounded recursion depth of a literal translation.

use crate::prng::SamplePrng;

/// `S(n,0) = {}`; `S(n,k) = S(n-1,k-1) U {i}` where `i` is drawn uniformly in
/// `[1,n]`, substituting `n` when `i` is already present. Implemented
/// bottom-up instead of top-down recursion: each loop iteration is one
/// unwound recursive call.
pub fn recursive_sample(n: usize, k: usize, prng: &mut dyn SamplePrng) -> Vec<usize> {
    let mut s = Vec::with_capacity(k);
    for j in 1..=k {
        let m = n - k + j;
        let i = 1 + prng.below(m);
        if s.contains(&i) {
            s.push(m);
        } else {
            s.push(i);
        }
    }
    s
}
