//! The counter-mode SHA-256 PRNG.
//!
//! Every output block is `SHA256(encode(seed) ++ "," ++ 0x00 * counter)`.
//! The accumulator is an incrementally-fed SHA-256 context: `advance` folds
//! one zero byte into it, and reading a block takes a clone of the context
//! without disturbing the original, matching the "snapshot digest" idiom.

use std::fmt;

use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};
use sha2::{Digest, Sha256};

/// An opaque, hashable seed identifier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Seed {
    Int(BigUint),
    Bytes(Vec<u8>),
}

impl Seed {
    fn encode(&self) -> Vec<u8> {
        match self {
            Seed::Int(n) => n.to_str_radix(10).into_bytes(),
            Seed::Bytes(b) => b.clone(),
        }
    }
}

impl fmt::Display for Seed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Seed::Int(n) => write!(f, "{n}"),
            Seed::Bytes(b) => write!(f, "{}", String::from_utf8_lossy(b)),
        }
    }
}

impl From<u64> for Seed {
    fn from(v: u64) -> Self {
        Seed::Int(BigUint::from(v))
    }
}

impl From<u128> for Seed {
    fn from(v: u128) -> Self {
        Seed::Int(BigUint::from(v))
    }
}

impl From<BigUint> for Seed {
    fn from(v: BigUint) -> Self {
        Seed::Int(v)
    }
}

impl From<Vec<u8>> for Seed {
    fn from(v: Vec<u8>) -> Self {
        Seed::Bytes(v)
    }
}

/// The externally-visible state tuple: `(seed, counter, randbits_remaining)`.
///
/// The bit cache contents themselves are not part of this tuple:
/// `set_state` always starts with an empty cache (see module docs on why).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrngState {
    #[cfg_attr(feature = "serde", serde(with = "seed_serde"))]
    pub seed: SeedRepr,
    pub counter: String,
    pub randbits_remaining: u64,
}

/// `Seed` can't derive `Serialize` generically without picking a wire
/// shape, so the state tuple stores it as (kind, encoded string) pairs.
pub type SeedRepr = Seed;

#[cfg(feature = "serde")]
mod seed_serde {
    use super::Seed;
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize, Deserialize)]
    enum Wire {
        Int(String),
        Bytes(Vec<u8>),
    }

    pub fn serialize<S: Serializer>(seed: &Seed, ser: S) -> Result<S::Ok, S::Error> {
        let wire = match seed {
            Seed::Int(n) => Wire::Int(n.to_str_radix(10)),
            Seed::Bytes(b) => Wire::Bytes(b.clone()),
        };
        wire.serialize(ser)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<Seed, D::Error> {
        let wire = Wire::deserialize(de)?;
        Ok(match wire {
            Wire::Int(s) => Seed::Int(s.parse::<BigUint>().map_err(serde::de::Error::custom)?),
            Wire::Bytes(b) => Seed::Bytes(b),
        })
    }
}

impl fmt::Display for PrngState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SHA256 PRNG. seed: {} counter: {} randbits_remaining: {}",
            self.seed, self.counter, self.randbits_remaining
        )
    }
}

/// Capability set the sampler algorithms consume: a real in `[0, 1)` and a
/// bounded integer in a half-open range, each optionally drawn many at once.
/// Any concrete PRNG or test double satisfying this is acceptable.
pub trait SamplePrng {
    fn uniform(&mut self) -> f64;
    fn uniform_many(&mut self, n: usize) -> Vec<f64>;
    fn below(&mut self, n: usize) -> usize;
    fn between(&mut self, a: usize, b: usize) -> usize {
        a + self.below(b - a)
    }
    fn below_many(&mut self, n: usize, count: usize) -> Vec<usize> {
        (0..count).map(|_| self.below(n)).collect()
    }
}

/// A deterministic SHA-256 counter-mode PRNG.
pub struct HashPrng {
    seed: Seed,
    prefix: Vec<u8>,
    counter: BigUint,
    randbits: BigUint,
    randbits_remaining: u64,
}

impl HashPrng {
    pub fn from_seed(seed: impl Into<Seed>) -> Self {
        let seed = seed.into();
        let mut prefix = seed.encode();
        prefix.push(b',');
        HashPrng {
            seed,
            prefix,
            counter: BigUint::zero(),
            randbits: BigUint::zero(),
            randbits_remaining: 0,
        }
    }

    /// Resets `counter` to zero and clears the bit cache, keeping `seed`.
    pub fn seed(&mut self, seed: impl Into<Seed>) {
        *self = HashPrng::from_seed(seed);
    }

    /// Seeds from OS entropy via the `getrandom` crate, for callers who don't
    /// need a reproducible stream and would rather not invent a seed by
    /// hand. The entropy source is explicit here, not hidden process-wide
    /// state: every other constructor still takes a seed the caller chooses.
    ///
    /// # Panics
    ///
    /// If the OS entropy source is unavailable.
    #[cfg(feature = "getrandom")]
    pub fn from_entropy() -> Self {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed).expect("failed to obtain OS entropy");
        HashPrng::from_seed(seed.to_vec())
    }

    pub fn state(&self) -> PrngState {
        PrngState {
            seed: self.seed.clone(),
            counter: self.counter.to_str_radix(10),
            randbits_remaining: self.randbits_remaining,
        }
    }

    /// Reconstructs the record from an external triple. The bit cache is
    /// cleared: reproducibility across save/restore only holds when
    /// `randbits_remaining == 0` at the save point.
    pub fn set_state(&mut self, seed: impl Into<Seed>, counter: BigUint) {
        let seed = seed.into();
        let mut prefix = seed.encode();
        prefix.push(b',');
        self.seed = seed;
        self.prefix = prefix;
        self.counter = counter;
        self.randbits = BigUint::zero();
        self.randbits_remaining = 0;
    }

    /// Equivalent to `jump_ahead(1)`.
    pub fn advance(&mut self) {
        self.counter += 1u32;
    }

    pub fn jump_ahead(&mut self, n: &BigUint) {
        self.counter += n;
    }

    fn block_at(&self, counter: &BigUint) -> [u8; 32] {
        let mut hasher = Sha256::new();
        hasher.update(&self.prefix);
        let zeros = counter.to_u64().unwrap_or(u64::MAX);
        // counter is arbitrary-width; hash in chunks to avoid a giant alloc
        // for pathological counters while staying exact for realistic ones.
        const CHUNK: [u8; 4096] = [0u8; 4096];
        let mut remaining = zeros;
        while remaining > 0 {
            let n = remaining.min(CHUNK.len() as u64) as usize;
            hasher.update(&CHUNK[..n]);
            remaining -= n as u64;
        }
        hasher.finalize().into()
    }

    /// Returns the digest of the current accumulator, then advances by one.
    pub fn next_block(&mut self) -> [u8; 32] {
        let block = self.block_at(&self.counter.clone());
        self.advance();
        block
    }

    pub fn uniform(&mut self) -> f64 {
        let block = self.next_block();
        let u = BigUint::from_bytes_be(&block);
        // 2^-256 scaling via correctly-rounded big-to-f64 conversion.
        u.to_f64().unwrap_or(f64::MAX) * 2f64.powi(-256)
    }

    pub fn uniform_many(&mut self, size: usize) -> Vec<f64> {
        (0..size).map(|_| self.uniform()).collect()
    }

    /// `getrandbits(k)`: exactly `k` uniform bits, extras cached.
    pub fn next_bits(&mut self, k: u64) -> BigUint {
        while self.randbits_remaining < k {
            let block = self.next_block();
            let new = BigUint::from_bytes_be(&block);
            self.randbits = (new << self.randbits_remaining as usize) | &self.randbits;
            self.randbits_remaining += 256;
        }
        let mask = (BigUint::from(1u32) << k as usize) - 1u32;
        let result = &self.randbits & &mask;
        self.randbits >>= k as usize;
        self.randbits_remaining -= k;
        result
    }

    /// `randbelow_from_randbits(n)`: rejection sampling over the smallest
    /// power-of-two window containing `[0, n)`. Behavior for `n == 0` is
    /// implementation-defined; this implementation panics rather than loop
    /// forever (see DESIGN.md).
    pub fn below(&mut self, n: &BigUint) -> BigUint {
        assert!(!n.is_zero(), "below(0) is a precondition violation");
        let k = bit_length(&(n - 1u32));
        loop {
            let r = self.next_bits(k);
            if &r < n {
                return r;
            }
        }
    }

    /// `randint(a, b, ...)`: unbiased integer in `[a, b)`.
    pub fn between(&mut self, a: &BigUint, b: &BigUint) -> BigUint {
        assert!(a <= b, "lower and upper limits are switched");
        a + self.below(&(b - a))
    }

    pub fn between_many(&mut self, a: &BigUint, b: &BigUint, size: usize) -> Vec<BigUint> {
        (0..size).map(|_| self.between(a, b)).collect()
    }

    /// `randint_trunc`: the legacy biased path, retained for
    /// backward-compatible reproducibility. `a + (U mod (b - a))` where `U`
    /// is a freshly drawn 256-bit integer; biased whenever `b - a` does not
    /// divide 2^256.
    pub fn between_trunc(&mut self, a: &BigUint, b: &BigUint) -> BigUint {
        assert!(a <= b, "lower and upper limits are switched");
        let block = self.next_block();
        let u = BigUint::from_bytes_be(&block);
        a + (u % (b - a))
    }

    pub fn between_trunc_many(&mut self, a: &BigUint, b: &BigUint, size: usize) -> Vec<BigUint> {
        (0..size).map(|_| self.between_trunc(a, b)).collect()
    }
}

fn bit_length(n: &BigUint) -> u64 {
    n.bits()
}

impl fmt::Display for HashPrng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.state())
    }
}

impl SamplePrng for HashPrng {
    fn uniform(&mut self) -> f64 {
        HashPrng::uniform(self)
    }

    fn uniform_many(&mut self, n: usize) -> Vec<f64> {
        HashPrng::uniform_many(self, n)
    }

    fn below(&mut self, n: usize) -> usize {
        HashPrng::below(self, &BigUint::from(n))
            .to_usize()
            .expect("below(n) result fits in usize for usize n")
    }
}

/// Test double ported from the original test suite's `fake_generator`:
/// cycles uniform values `0.1, 0.2, ..., 0.9`, wrapping after the ninth.
#[cfg(test)]
pub(crate) struct FakeGenerator {
    counter: u32,
}

#[cfg(test)]
impl FakeGenerator {
    pub fn new() -> Self {
        FakeGenerator { counter: 0 }
    }

    fn tick(&mut self) -> f64 {
        self.counter = (self.counter + 1) % 10;
        self.counter as f64 / 10.0
    }
}

#[cfg(test)]
impl SamplePrng for FakeGenerator {
    fn uniform(&mut self) -> f64 {
        self.tick()
    }

    fn uniform_many(&mut self, n: usize) -> Vec<f64> {
        (0..n).map(|_| self.tick()).collect()
    }

    fn below(&mut self, n: usize) -> usize {
        let u = self.tick();
        ((u * 10.0) as usize) % n
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn i1_block_matches_from_scratch_recomputation() {
        let mut prng = HashPrng::from_seed(5u64);
        prng.jump_ahead(&BigUint::from(7u32));
        let incremental = prng.next_block();

        let mut scratch = Sha256::new();
        scratch.update(b"5,");
        scratch.update([0u8; 7]);
        let from_scratch: [u8; 32] = scratch.finalize().into();

        assert_eq!(incremental, from_scratch);
    }

    #[test]
    fn equal_seed_and_counter_history_emit_identical_blocks() {
        let mut a = HashPrng::from_seed(42u64);
        let mut b = HashPrng::from_seed(42u64);
        a.advance();
        a.advance();
        b.jump_ahead(&BigUint::from(2u32));
        assert_eq!(a.next_block(), b.next_block());
    }

    #[test]
    fn setstate_then_nextrandom_matches_seed_then_jumpahead() {
        let mut a = HashPrng::from_seed(9u64);
        a.set_state(9u64, BigUint::from(4u32));
        let mut b = HashPrng::from_seed(9u64);
        b.jump_ahead(&BigUint::from(4u32));
        assert_eq!(a.next_block(), b.next_block());
    }

    #[test]
    fn s1_next_block_recomputed_under_canonical_encoding() {
        // Computed under the canonical zero-byte encoding (see DESIGN.md);
        // the decimal-counter scheme some earlier references use is not a
        // conformance target here.
        let mut prng = HashPrng::from_seed(BigUint::from(12345678901234567890u128));
        prng.advance();
        let block = prng.next_block();
        assert_eq!(
            hex(&block),
            "310d959ce65476647a3ec93074beff0aa6d720949207daf915712fd574635165"[..64]
        );
    }

    #[test]
    fn s3_between_trunc_matches_reference_vector() {
        let mut prng = HashPrng::from_seed(BigUint::from(12345678901234567890u128));
        let a = BigUint::from(1u32);
        let b = BigUint::from(1001u32);
        let got: Vec<u64> = prng
            .between_trunc_many(&a, &b, 5)
            .into_iter()
            .map(|v| v.to_u64().unwrap())
            .collect();
        assert_eq!(got, vec![876, 766, 536, 423, 164]);
    }

    #[test]
    fn s4_state_transitions() {
        let mut prng = HashPrng::from_seed(5u64);
        assert_eq!(
            prng.to_string(),
            "SHA256 PRNG. seed: 5 counter: 0 randbits_remaining: 0"
        );
        prng.advance();
        assert_eq!(prng.state().counter, "1");
        prng.jump_ahead(&BigUint::from(5u32));
        assert_eq!(prng.state().counter, "6");
        prng.seed(22u64);
        assert_eq!(prng.state().counter, "0");
        prng.set_state(2345u64, BigUint::from(3u32));
        assert_eq!(prng.state().counter, "3");
        let _ = prng.between_many(&BigUint::from(0u32), &BigUint::from(100u32), 2);
        let state = prng.state();
        assert_eq!(state.counter, "4");
        assert_eq!(state.randbits_remaining, 242);
    }

    #[test]
    fn s6_bit_harvesting() {
        let seed = BigUint::from(12345678901234567890u128);
        let mut r = HashPrng::from_seed(seed.clone());
        let mut s = HashPrng::from_seed(seed);
        let v = BigUint::from_bytes_be(&s.next_block());

        let mut cum = 0u64;
        for k in [10u64, 20, 30] {
            let got = r.next_bits(k);
            let mask = (BigUint::from(1u32) << k as usize) - 1u32;
            let expect = (&v >> cum) & mask;
            assert_eq!(got, expect);
            cum += k;
        }
    }

    #[test]
    fn s6_getrandbits_500_spans_two_blocks() {
        let seed = BigUint::from(12345678901234567890u128);
        let mut r = HashPrng::from_seed(seed.clone());
        let mut s = HashPrng::from_seed(seed);
        let v = BigUint::from_bytes_be(&s.next_block());
        let w = BigUint::from_bytes_be(&s.next_block());
        let val = r.next_bits(500);
        let mask = (BigUint::from(1u32) << 500usize) - 1u32;
        let expect = ((w << 256usize) | v) & mask;
        assert_eq!(val, expect);
    }

    #[test]
    fn randbelow_from_randbits_stays_in_range_and_matches_bit_extraction() {
        let seed = BigUint::from(12345678901234567890u128);
        let mut prng = HashPrng::from_seed(seed.clone());
        let got = prng.below(&BigUint::from(5u32));
        assert!(got < BigUint::from(5u32));

        // k = bitlength(4) = 3: the first draw reads the low 3 bits of the
        // first block; reject-and-retry only triggers above 4 in [0,7].
        let mut fresh = HashPrng::from_seed(seed);
        let block = fresh.next_block();
        let low3 = BigUint::from_bytes_be(&block) & BigUint::from(0b111u32);
        if low3 < BigUint::from(5u32) {
            assert_eq!(got, low3);
        }
    }

    fn hex(bytes: &[u8]) -> String {
        bytes.iter().map(|b| format!("{:02x}", b)).collect()
    }

    #[cfg(feature = "getrandom")]
    #[test]
    fn from_entropy_seeds_distinct_streams() {
        let mut a = HashPrng::from_entropy();
        let mut b = HashPrng::from_entropy();
        assert_ne!(a.next_block(), b.next_block());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn state_round_trips_through_json() {
        let mut prng = HashPrng::from_seed(BigUint::from(12345678901234567890u128));
        prng.advance();
        let state = prng.state();
        let json = serde_json::to_string(&state).unwrap();
        let back: PrngState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
