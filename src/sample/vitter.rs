//! Vitter's Algorithm Z: reservoir sampling with geometric skip-counting
//! (Vitter, 1985).

use crate::prng::SamplePrng;

fn ln_factorial(n: i64) -> f64 {
    if n <= 1 {
        return 0.0;
    }
    (2..=n).map(|i| (i as f64).ln()).sum()
}

struct Coeffs {
    k: f64,
}

impl Coeffs {
    fn c(&self, t: f64) -> f64 {
        (t + 1.0) / (t - self.k + 1.0)
    }

    fn g(&self, x: f64, t: f64) -> f64 {
        (self.k / (t + x)) * (t / (t + x)).powf(self.k)
    }

    fn h(&self, x: f64, t: f64) -> f64 {
        (self.k / (t + 1.0)) * ((t - self.k + 1.0) / (t + x - self.k + 1.0)).powf(self.k + 1.0)
    }

    fn f(&self, x: f64, t: f64) -> f64 {
        let k = self.k;
        let ln_numer = ln_factorial((t - k + x) as i64) - ln_factorial((t - k - 1.0) as i64);
        let ln_denom = ln_factorial((t + x + 1.0) as i64) - ln_factorial(t as i64);
        (ln_numer - ln_denom).exp() * k / (t - k)
    }
}

fn algorithm_x(k: usize, t: usize, prng: &mut dyn SamplePrng) -> usize {
    let v = prng.uniform();
    let mut s = 0u64;
    let mut frac = 2.0;
    let (k, t) = (k as f64, t as f64);
    while frac > v {
        s += 1;
        frac = ((t + 1.0 - k) / (t + 1.0)).powf(s as f64 + 1.0);
    }
    s as usize
}

/// Sample `k` out of `1,...,n` without replacement, reservoir-style, using a
/// geometric skip count to avoid drawing once per unseen record.
pub fn vitter_z(n: usize, k: usize, prng: &mut dyn SamplePrng) -> Vec<usize> {
    let coeffs = Coeffs { k: k as f64 };
    let mut sam: Vec<usize> = (1..=k).collect();
    let mut t = k;

    while t < n {
        let nu = if t <= 22 * k {
            algorithm_x(k, t, prng)
        } else {
            let tf = t as f64;
            let mut u;
            let mut x;
            loop {
                let v = prng.uniform();
                x = tf * (v.powf(-1.0 / k as f64) - 1.0);
                u = prng.uniform();
                if u <= coeffs.h(x.floor(), tf) / (coeffs.c(tf) * coeffs.g(x, tf)) {
                    break;
                }
                let var = coeffs.f(x.floor(), tf) / (coeffs.c(tf) * coeffs.g(x, tf));
                if u <= var {
                    break;
                }
            }
            x.floor() as usize
        };
        if t + nu < n {
            let i = prng.below(k);
            sam[i] = t + nu + 1;
        }
        t += nu + 1;
    }
    sam
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::FakeGenerator;

    #[test]
    fn small_reservoir_is_distinct() {
        let mut ff = FakeGenerator::new();
        let mut sam = vitter_z(5, 2, &mut ff);
        sam.sort_unstable();
        sam.dedup();
        assert_eq!(sam.len(), 2);
    }

    #[test]
    fn large_reservoir_stays_in_population_bounds() {
        let mut ff = FakeGenerator::new();
        let sam = vitter_z(500, 2, &mut ff);
        assert!(sam.iter().all(|&v| (1..=500).contains(&v)));
    }
}
