// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::One;
use rand::rngs::OsRng;

use crate::prime::generate_prime_with_rounds;
use crate::Result;

/// Conventional public exponents, tried in order.
///
/// 65537 is the usual choice; the smaller Fermat primes and 5, 3 are only
/// reached when φ(n) is too small for 65537 or shares a factor with it.
pub const DEFAULT_EXPONENTS: [u32; 5] = [65_537, 257, 17, 5, 3];

/// Draw the two prime factors of a modulus concurrently.
///
/// Each side uses its own `OsRng` handle.
pub fn draw_prime_pair(
    p_bits: usize,
    q_bits: usize,
    rounds: usize,
) -> Result<(BigUint, BigUint)> {
    let (p_result, q_result) = rayon::join(
        || generate_prime_with_rounds(p_bits, rounds, &mut OsRng),
        || generate_prime_with_rounds(q_bits, rounds, &mut OsRng),
    );

    Ok((p_result?, q_result?))
}

/// Pick the first candidate `e` with `1 < e < φ` and `gcd(e, φ) = 1`.
pub fn choose_exponent<'a, I>(phi: &BigUint, candidates: I) -> Option<BigUint>
where
    I: IntoIterator<Item = &'a BigUint>,
{
    candidates
        .into_iter()
        .find(|e| *e > &BigUint::one() && *e < phi && e.gcd(phi).is_one())
        .cloned()
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    fn exponents() -> Vec<BigUint> {
        DEFAULT_EXPONENTS.iter().map(|&e| BigUint::from(e)).collect()
    }

    #[test]
    fn prefers_65537() {
        // p = 1009, q = 1013 → φ = 1008 · 1012
        let phi = BigUint::from(1008u32 * 1012);
        assert_eq!(choose_exponent(&phi, &exponents()), Some(BigUint::from(65_537u32)));
    }

    #[test]
    fn falls_back_when_phi_is_small() {
        // p = 131, q = 137 → φ = 130 · 136 = 17680 < 65537
        let phi = BigUint::from(130u32 * 136);
        assert_eq!(choose_exponent(&phi, &exponents()), Some(BigUint::from(257u32)));
    }

    #[test]
    fn skips_candidates_sharing_a_factor() {
        // 17 | φ and 257 > φ: next is 5
        let phi = BigUint::from(2u32 * 2 * 17 * 3);
        assert_eq!(choose_exponent(&phi, &exponents()), Some(BigUint::from(5u32)));
    }

    #[test]
    fn none_when_nothing_fits() {
        // φ = 2 leaves no room for any e > 1
        let phi = BigUint::from(2u32);
        assert_eq!(choose_exponent(&phi, &exponents()), None);
    }

    #[test]
    fn pair_has_requested_sizes() {
        let (p, q) = draw_prime_pair(24, 40, 20).unwrap();
        assert_eq!(p.bits(), 24);
        assert_eq!(q.bits(), 40);
    }
}
