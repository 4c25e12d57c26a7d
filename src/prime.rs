// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Random prime generation.
//!
//! Candidates are drawn uniformly among odd integers with the top bit set,
//! so every returned prime has exactly the requested bit length. Each
//! candidate goes through [`is_probable_prime`], which rejects most of them
//! by trial division before any Miller-Rabin round runs.

use num_bigint_dig::{BigUint, RandBigInt};
use num_traits::One;
use rand::{CryptoRng, RngCore};

use crate::arith::{is_probable_prime, miller_rabin_rounds};
use crate::{Error, Result};

/// Smallest bit length for which an odd prime with the top bit set exists.
pub const MIN_PRIME_BITS: usize = 2;

/// Generate a random prime of exactly `bits` bits.
///
/// The Miller-Rabin round count follows [`miller_rabin_rounds`].
///
/// # Errors
///
/// [`Error::InvalidKeySize`] if `bits < MIN_PRIME_BITS`, and
/// [`Error::PrimeGenerationFailed`] if the bounded search runs dry, which
/// does not happen in practice.
pub fn generate_prime<R: RngCore + CryptoRng>(bits: usize, rng: &mut R) -> Result<BigUint> {
    generate_prime_with_rounds(bits, miller_rabin_rounds(bits), rng)
}

/// Same as [`generate_prime`] with an explicit Miller-Rabin round count.
pub fn generate_prime_with_rounds<R: RngCore + CryptoRng>(
    bits: usize,
    rounds: usize,
    rng: &mut R,
) -> Result<BigUint> {
    if bits < MIN_PRIME_BITS {
        return Err(Error::InvalidKeySize { min: MIN_PRIME_BITS, actual: bits });
    }

    let attempts = max_attempts(bits);
    for _ in 0..attempts {
        let candidate = generate_candidate(bits, rng);
        if is_probable_prime(&candidate, rounds) {
            return Ok(candidate);
        }
    }

    Err(Error::PrimeGenerationFailed { bits, attempts })
}

/// Generate a random odd prime with exactly `digits` decimal digits.
///
/// # Errors
///
/// [`Error::InvalidKeySize`] if `digits` is zero, and
/// [`Error::PrimeGenerationFailed`] (with the bit length of `10^digits`) if
/// the bounded search runs dry.
pub fn generate_prime_with_digits<R: RngCore + CryptoRng>(
    digits: u32,
    rng: &mut R,
) -> Result<BigUint> {
    if digits == 0 {
        return Err(Error::InvalidKeySize { min: 1, actual: 0 });
    }

    let low = num_traits::pow(BigUint::from(10u32), digits as usize - 1);
    let high = &low * 10u32;
    let bits = high.bits();
    let rounds = miller_rabin_rounds(bits);

    let attempts = max_attempts(bits);
    for _ in 0..attempts {
        // high is even, so forcing the low bit keeps the candidate below it
        let candidate = rng.gen_biguint_range(&low, &high) | BigUint::one();
        if is_probable_prime(&candidate, rounds) {
            return Ok(candidate);
        }
    }

    Err(Error::PrimeGenerationFailed { bits, attempts })
}

/// Upper bound on candidates tried before giving up.
///
/// Odd numbers of `b` bits are prime with density roughly `2 / (b · ln 2)`,
/// so a budget linear in `b` with a generous constant is never reached.
#[inline]
const fn max_attempts(bits: usize) -> usize {
    100 * bits + 1_000
}

/// Generate a random candidate of the specified bit length.
///
/// Ensures:
/// - Exact bit length (MSB set)
/// - Odd number (LSB set)
#[inline]
fn generate_candidate<R: RngCore + CryptoRng>(bits: usize, rng: &mut R) -> BigUint {
    let mut candidate = rng.gen_biguint(bits);

    candidate |= BigUint::one() << (bits - 1);
    candidate |= BigUint::one();

    candidate
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use num_bigint_dig::prime::probably_prime;
    use num_integer::Integer;
    use rand::rngs::{OsRng, StdRng};
    use rand::SeedableRng;

    #[test]
    fn generates_exact_bit_length() {
        let mut rng = OsRng;
        for bits in [2, 3, 8, 16, 64, 128] {
            let p = generate_prime(bits, &mut rng).unwrap();
            assert_eq!(p.bits(), bits, "wrong bit length for {bits}");
        }
    }

    #[test]
    fn generated_values_are_prime() {
        let mut rng = OsRng;
        for bits in [8, 32, 256] {
            let p = generate_prime(bits, &mut rng).unwrap();
            assert!(probably_prime(&p, 20), "{p} is not prime");
        }
    }

    #[test]
    fn larger_primes_are_odd() {
        let mut rng = OsRng;
        let p = generate_prime(512, &mut rng).unwrap();
        assert!(p.is_odd());
        assert_eq!(p.bits(), 512);
    }

    #[test]
    fn two_bit_prime_is_three() {
        let mut rng = OsRng;
        assert_eq!(generate_prime(2, &mut rng).unwrap(), BigUint::from(3u32));
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let p1 = generate_prime(96, &mut StdRng::seed_from_u64(7)).unwrap();
        let p2 = generate_prime(96, &mut StdRng::seed_from_u64(7)).unwrap();
        assert_eq!(p1, p2);
    }

    #[test]
    fn rejects_small_bit_lengths() {
        let mut rng = OsRng;
        assert_eq!(
            generate_prime(1, &mut rng),
            Err(Error::InvalidKeySize { min: MIN_PRIME_BITS, actual: 1 })
        );
        assert!(generate_prime(0, &mut rng).is_err());
    }

    #[test]
    fn generates_exact_digit_count() {
        let mut rng = OsRng;
        for digits in [1, 2, 5, 30, 100] {
            let p = generate_prime_with_digits(digits, &mut rng).unwrap();
            assert_eq!(p.to_str_radix(10).len(), digits as usize);
            assert!(probably_prime(&p, 20), "{p} is not prime");
        }
        assert!(generate_prime_with_digits(0, &mut rng).is_err());
    }

    #[test]
    fn generated_primes_are_distinct() {
        let mut rng = OsRng;
        let p1 = generate_prime(256, &mut rng).unwrap();
        let p2 = generate_prime(256, &mut rng).unwrap();
        assert_ne!(p1, p2, "Should generate different primes");
    }
}
