//! Exponential-weighted sampling without replacement.
//!
//! For each item `i` draw `U_i ~ U(0,1)`, compute `-ln(U_i)/w_i`, and return
//! the 1-based indices of the `k` smallest (the memoryless property of the
//! exponential distribution makes this equivalent to sequential weighted
//! draws without replacement).

use crate::prng::SamplePrng;
use crate::sample::SampleError;

pub fn exponential_sample(
    k: usize,
    weights: &[f64],
    prng: &mut dyn SamplePrng,
) -> Result<Vec<usize>, SampleError> {
    if weights.iter().any(|&w| w < 0.0) {
        return Err(SampleError::NegativeWeight);
    }
    let n = weights.len();
    if k > n {
        return Err(SampleError::SampleSizeExceedsWeighted { k, n });
    }
    if k == n {
        return Ok((1..=k).collect());
    }

    let draws = prng.uniform_many(n);
    let mut scored: Vec<(usize, f64)> = draws
        .iter()
        .zip(weights)
        .enumerate()
        .map(|(i, (u, w))| (i, -u.ln() / w))
        .collect();
    scored.sort_by(|a, b| a.1.partial_cmp(&b.1).unwrap());
    Ok(scored.into_iter().take(k).map(|(i, _)| i + 1).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::FakeGenerator;

    #[test]
    fn matches_reference() {
        let mut ff = FakeGenerator::new();
        let sam = exponential_sample(2, &[0.2; 5], &mut ff).unwrap();
        assert_eq!(sam, vec![5, 4]);
    }
}
