//! PIKK: "Permute Indices and Keep K".

use crate::prng::SamplePrng;

/// Draw `n` uniforms and return the 1-based positions of the `k` smallest.
pub fn pikk_sample(n: usize, k: usize, prng: &mut dyn SamplePrng) -> Vec<usize> {
    let rand = prng.uniform_many(n);
    let mut idx: Vec<usize> = (0..n).collect();
    idx.sort_by(|&a, &b| rand[a].partial_cmp(&rand[b]).unwrap());
    idx.truncate(k);
    idx.into_iter().map(|i| i + 1).collect()
}
