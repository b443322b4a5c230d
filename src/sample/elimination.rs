//! Weighted elimination sampling: iterative weighted draw via cumulative-sum
//! search, renormalizing after each removal.

use crate::prng::SamplePrng;
use crate::sample::SampleError;

fn searchsorted(cum: &[f64], v: f64) -> usize {
    cum.iter().position(|&c| v <= c).unwrap_or(cum.len() - 1)
}

fn cumulative_normalized(weights: &[f64]) -> Vec<f64> {
    let total: f64 = weights.iter().sum();
    let mut acc = 0.0;
    weights
        .iter()
        .map(|w| {
            acc += w;
            acc / total
        })
        .collect()
}

/// `p`-weighted sample of size `k`, 1-based, with or without replacement.
pub fn elimination_sample(
    k: usize,
    weights: &[f64],
    replace: bool,
    prng: &mut dyn SamplePrng,
) -> Result<Vec<usize>, SampleError> {
    if weights.iter().any(|&w| w < 0.0) {
        return Err(SampleError::NegativeWeight);
    }
    let n = weights.len();
    if replace {
        let cum = cumulative_normalized(weights);
        let draws = prng.uniform_many(k);
        return Ok(draws.into_iter().map(|u| searchsorted(&cum, u) + 1).collect());
    }

    if k > n {
        return Err(SampleError::SampleSizeExceedsWeighted { k, n });
    }
    if k == n {
        return Ok((1..=k).collect());
    }

    let mut weights_left = weights.to_vec();
    let mut indices_left: Vec<usize> = (0..n).collect();
    let mut sam = Vec::with_capacity(k);
    for _ in 0..k {
        let cum = cumulative_normalized(&weights_left);
        let v = prng.uniform();
        let idx = searchsorted(&cum, v);
        sam.push(indices_left[idx] + 1);
        indices_left.remove(idx);
        weights_left.remove(idx);
    }
    Ok(sam)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::FakeGenerator;

    #[test]
    fn with_replacement_matches_reference() {
        let mut ff = FakeGenerator::new();
        let sam = elimination_sample(2, &[0.2; 5], true, &mut ff).unwrap();
        assert_eq!(sam, vec![1, 1]);
    }

    #[test]
    fn without_replacement_matches_reference() {
        let mut ff = FakeGenerator::new();
        let sam = elimination_sample(2, &[0.2; 5], false, &mut ff).unwrap();
        assert_eq!(sam, vec![1, 2]);
    }

    #[test]
    fn negative_weight_is_rejected() {
        let mut ff = FakeGenerator::new();
        assert_eq!(
            elimination_sample(1, &[-0.1, 0.5], false, &mut ff),
            Err(SampleError::NegativeWeight)
        );
    }
}
