/*!
A SHA-256 counter-mode pseudorandom number generator, and a library of
sampling and permutation algorithms built on top of it.

The generator is designed for statistical applications that need the random
stream to be reproducible across platforms and auditable from a published
seed — risk-limiting election audits and survey sampling are the motivating
use cases. Unlike a linear-congruential or Mersenne-Twister generator, every
output block is the SHA-256 digest of the seed folded with a counter, so
anyone holding the seed and the counter history can recompute the exact same
stream independently.

# Quick start

```
use hashdraw::HashPrng;

let mut prng = HashPrng::from_seed(12345678901234567890u128);
prng.advance();
let block = prng.next_block();
assert_eq!(hex_encode(&block), "310d959ce65476647a3ec93074beff0aa6d720949207daf915712fd574635165");

fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
```

This library was inspired by `cryptorandom`, a Python package used in
risk-limiting election audits.
*/

#![deny(unsafe_code)]

pub mod prng;
pub mod sample;

pub use crate::prng::{HashPrng, PrngState, SamplePrng, Seed};
pub use crate::sample::{Method, Population, SampleError};
