// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Modular arithmetic over arbitrary-precision integers.
//!
//! Everything the scheme needs beyond plain big-integer operators lives
//! here: Bézout coefficients, inverses, square-and-multiply exponentiation
//! and the probabilistic primality test used by prime generation.

use num_bigint_dig::{BigInt, BigUint, RandBigInt, Sign};
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};
use rand::rngs::OsRng;

use crate::error::{Error, Result};

/// Primes below 1621, used for trial division before Miller-Rabin.
pub(crate) const SMALL_PRIMES: &[u32] = &[
    2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89,
    97, 101, 103, 107, 109, 113, 127, 131, 137, 139, 149, 151, 157, 163, 167, 173, 179, 181, 191,
    193, 197, 199, 211, 223, 227, 229, 233, 239, 241, 251, 257, 263, 269, 271, 277, 281, 283, 293,
    307, 311, 313, 317, 331, 337, 347, 349, 353, 359, 367, 373, 379, 383, 389, 397, 401, 409, 419,
    421, 431, 433, 439, 443, 449, 457, 461, 463, 467, 479, 487, 491, 499, 503, 509, 521, 523, 541,
    547, 557, 563, 569, 571, 577, 587, 593, 599, 601, 607, 613, 617, 619, 631, 641, 643, 647, 653,
    659, 661, 673, 677, 683, 691, 701, 709, 719, 727, 733, 739, 743, 751, 757, 761, 769, 773, 787,
    797, 809, 811, 821, 823, 827, 829, 839, 853, 857, 859, 863, 877, 881, 883, 887, 907, 911, 919,
    929, 937, 941, 947, 953, 967, 971, 977, 983, 991, 997, 1009, 1013, 1019, 1021, 1031, 1033,
    1039, 1049, 1051, 1061, 1063, 1069, 1087, 1091, 1093, 1097, 1103, 1109, 1117, 1123, 1129, 1151,
    1153, 1163, 1171, 1181, 1187, 1193, 1201, 1213, 1217, 1223, 1229, 1231, 1237, 1249, 1259, 1277,
    1279, 1283, 1289, 1291, 1297, 1301, 1303, 1307, 1319, 1321, 1327, 1361, 1367, 1373, 1381, 1399,
    1409, 1423, 1427, 1429, 1433, 1439, 1447, 1451, 1453, 1459, 1471, 1481, 1483, 1487, 1489, 1493,
    1499, 1511, 1523, 1531, 1543, 1549, 1553, 1559, 1567, 1571, 1579, 1583, 1597, 1601, 1607, 1609,
    1613, 1619,
];

/// Every composite below this value has a factor in [`SMALL_PRIMES`].
const TRIAL_DIVISION_LIMIT: u64 = 1621 * 1621;

/// Extended Euclidean algorithm.
///
/// Returns `(g, x, y)` with `a·x + b·y = g` and `g = gcd(a, b) ≥ 0`.
///
/// # Errors
///
/// [`Error::Arithmetic`] when both inputs are zero, since the gcd is
/// undefined there.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt, BigInt)> {
    if a.is_zero() && b.is_zero() {
        return Err(Error::Arithmetic("gcd(0, 0) is undefined"));
    }

    let (mut old_r, mut r) = (a.clone(), b.clone());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let q = old_r.div_floor(&r);

        let next_r = &old_r - &q * &r;
        old_r = std::mem::replace(&mut r, next_r);

        let next_s = &old_s - &q * &s;
        old_s = std::mem::replace(&mut s, next_s);

        let next_t = &old_t - &q * &t;
        old_t = std::mem::replace(&mut t, next_t);
    }

    // Keep the gcd non-negative; flip the coefficients with it.
    if old_r.is_negative() {
        return Ok((-old_r, -old_s, -old_t));
    }

    Ok((old_r, old_s, old_t))
}

/// Computes `a⁻¹ mod m`, the unique `x` in `[0, m)` with `a·x ≡ 1 (mod m)`.
///
/// # Errors
///
/// [`Error::Arithmetic`] for `m = 0`, [`Error::NotInvertible`] when
/// `gcd(a, m) ≠ 1`.
pub fn mod_inverse(a: &BigUint, m: &BigUint) -> Result<BigUint> {
    if m.is_zero() {
        return Err(Error::Arithmetic("modulus must be non-zero"));
    }

    let a = BigInt::from_biguint(Sign::Plus, a.clone());
    let m = BigInt::from_biguint(Sign::Plus, m.clone());

    let (g, x, _) = extended_gcd(&a, &m)?;
    if !g.is_one() {
        return Err(Error::NotInvertible);
    }

    x.mod_floor(&m)
        .to_biguint()
        .ok_or(Error::Arithmetic("inverse normalisation produced a negative value"))
}

/// Computes `base^exponent mod modulus` by square-and-multiply.
///
/// # Errors
///
/// [`Error::Arithmetic`] when `modulus ≤ 1`.
pub fn mod_pow(base: &BigUint, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus <= &BigUint::one() {
        return Err(Error::Arithmetic("modulus must be greater than 1"));
    }

    let mut result = BigUint::one();
    let mut base = base % modulus;

    // Scan exponent bits from least significant upwards.
    for byte in exponent.to_bytes_le() {
        for i in 0..8 {
            if (byte >> i) & 1 == 1 {
                result = (&result * &base) % modulus;
            }
            base = (&base * &base) % modulus;
        }
    }

    Ok(result)
}

/// Like [`mod_pow`], for a signed base. A negative base is first reduced
/// into `[0, modulus)`.
pub fn mod_pow_signed(base: &BigInt, exponent: &BigUint, modulus: &BigUint) -> Result<BigUint> {
    if modulus <= &BigUint::one() {
        return Err(Error::Arithmetic("modulus must be greater than 1"));
    }

    let m = BigInt::from_biguint(Sign::Plus, modulus.clone());
    let base = base
        .mod_floor(&m)
        .to_biguint()
        .ok_or(Error::Arithmetic("base normalisation produced a negative value"))?;

    mod_pow(&base, exponent, modulus)
}

/// Probabilistic primality test.
///
/// Exact for `n < 1621²` (trial division by [`SMALL_PRIMES`]); above that,
/// Miller-Rabin with `rounds` random witnesses, so a composite passes with
/// probability at most `4^-rounds`.
pub fn is_probable_prime(n: &BigUint, rounds: usize) -> bool {
    if n < &BigUint::from(2u32) {
        return false;
    }

    for &p in SMALL_PRIMES {
        if *n == BigUint::from(p) {
            return true;
        }
        if (n % p).is_zero() {
            return false;
        }
    }

    if n.to_u64().is_some_and(|small| small < TRIAL_DIVISION_LIMIT) {
        return true;
    }

    miller_rabin(n, rounds)
}

fn miller_rabin(n: &BigUint, rounds: usize) -> bool {
    let one = BigUint::one();
    let two = BigUint::from(2u32);
    let n_minus_one = n - &one;

    // n - 1 = d · 2^s with d odd
    let mut d = n_minus_one.clone();
    let mut s = 0usize;
    while d.is_even() {
        d >>= 1;
        s += 1;
    }

    let mut rng = OsRng;
    'witness: for _ in 0..rounds {
        // a ∈ [2, n - 2]
        let a = rng.gen_biguint_range(&two, &n_minus_one);
        let mut x = a.modpow(&d, n);

        if x == one || x == n_minus_one {
            continue;
        }

        for _ in 1..s {
            x = x.modpow(&two, n);
            if x == n_minus_one {
                continue 'witness;
            }
        }

        return false;
    }

    true
}

/// Number of Miller-Rabin rounds used for candidates of `bits` bits.
///
/// Based on FIPS 186-4 Table C.1, targeting an error probability below
/// 2^-128 across the supported key sizes.
///
/// | Bits  | Rounds |
/// |-------|--------|
/// | ≤256  | 40     |
/// | 512   | 15     |
/// | 1024  | 10     |
/// | 2048  | 6      |
/// | 4096  | 4      |
#[inline]
pub const fn miller_rabin_rounds(bits: usize) -> usize {
    match bits {
        0..=256 => 40,
        257..=512 => 15,
        513..=1024 => 10,
        1025..=2048 => 6,
        2049..=4096 => 4,
        _ => 3,
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use num_bigint_dig::prime::probably_prime;
    use proptest::prelude::*;

    fn big(n: i64) -> BigInt {
        BigInt::from(n)
    }

    fn ubig(n: u64) -> BigUint {
        BigUint::from(n)
    }

    /// Plain trial division, used as the reference for small `n`.
    fn is_prime_reference(n: u64) -> bool {
        if n < 2 {
            return false;
        }
        let mut i = 2;
        while i * i <= n {
            if n % i == 0 {
                return false;
            }
            i += 1;
        }
        true
    }

    #[test]
    fn extended_gcd_satisfies_bezout() {
        let cases = [(240, 46), (46, 240), (17, 5), (0, 9), (9, 0), (-12, 18), (12, -18), (1, 1)];

        for (a, b) in cases {
            let (g, x, y) = extended_gcd(&big(a), &big(b)).unwrap();
            assert_eq!(&big(a) * &x + &big(b) * &y, g, "bezout failed for ({a}, {b})");
            assert_eq!(g, BigInt::from(num_integer::gcd(a, b)));
        }
    }

    #[test]
    fn extended_gcd_rejects_double_zero() {
        let result = extended_gcd(&big(0), &big(0));
        assert!(matches!(result, Err(Error::Arithmetic(_))));
    }

    #[test]
    fn mod_inverse_small() {
        // 3 · 5 = 15 ≡ 1 (mod 7)
        assert_eq!(mod_inverse(&ubig(3), &ubig(7)).unwrap(), ubig(5));
        assert_eq!(mod_inverse(&ubig(17), &ubig(3120)).unwrap(), ubig(2753));
    }

    #[test]
    fn mod_inverse_reduces_large_operand() {
        // 10 ≡ 3 (mod 7)
        assert_eq!(mod_inverse(&ubig(10), &ubig(7)).unwrap(), ubig(5));
    }

    #[test]
    fn mod_inverse_not_invertible() {
        assert_eq!(mod_inverse(&ubig(6), &ubig(9)), Err(Error::NotInvertible));
        assert_eq!(mod_inverse(&ubig(0), &ubig(9)), Err(Error::NotInvertible));
    }

    #[test]
    fn mod_inverse_zero_modulus() {
        assert!(matches!(mod_inverse(&ubig(3), &ubig(0)), Err(Error::Arithmetic(_))));
    }

    #[test]
    fn mod_pow_small() {
        // 3^5 mod 7 = 243 mod 7 = 5
        assert_eq!(mod_pow(&ubig(3), &ubig(5), &ubig(7)).unwrap(), ubig(5));
        assert_eq!(mod_pow(&ubig(4), &ubig(0), &ubig(7)).unwrap(), ubig(1));
        assert_eq!(mod_pow(&ubig(0), &ubig(0), &ubig(7)).unwrap(), ubig(1));
        assert_eq!(mod_pow(&ubig(0), &ubig(3), &ubig(7)).unwrap(), ubig(0));
    }

    #[test]
    fn mod_pow_rejects_degenerate_modulus() {
        assert!(mod_pow(&ubig(3), &ubig(5), &ubig(1)).is_err());
        assert!(mod_pow(&ubig(3), &ubig(5), &ubig(0)).is_err());
    }

    #[test]
    fn mod_pow_signed_normalises_negative_base() {
        // -2 ≡ 5 (mod 7), 5^3 = 125 ≡ 6 (mod 7)
        let result = mod_pow_signed(&big(-2), &ubig(3), &ubig(7)).unwrap();
        assert_eq!(result, ubig(6));
        assert_eq!(result, mod_pow(&ubig(5), &ubig(3), &ubig(7)).unwrap());
    }

    #[test]
    fn primality_exact_below_ten_thousand() {
        for n in 0u64..10_000 {
            assert_eq!(
                is_probable_prime(&ubig(n), 1),
                is_prime_reference(n),
                "primality mismatch for {n}"
            );
        }
    }

    #[test]
    fn primality_large_values() {
        // 2^61 - 1 is a Mersenne prime, 2^61 + 1 is divisible by 3
        let mersenne = (ubig(1) << 61) - 1u32;
        assert!(is_probable_prime(&mersenne, 20));
        assert!(!is_probable_prime(&((ubig(1) << 61) + 1u32), 20));
        assert!(!is_probable_prime(&(ubig(1) << 61), 20));

        // product of two primes above the trial-division table
        let semiprime = ubig(1_000_003) * ubig(1_000_033);
        assert!(!is_probable_prime(&semiprime, 20));
    }

    #[test]
    fn primality_agrees_with_num_bigint_dig() {
        for n in (TRIAL_DIVISION_LIMIT..TRIAL_DIVISION_LIMIT + 2_000).step_by(3) {
            let n = ubig(n);
            assert_eq!(is_probable_prime(&n, 20), probably_prime(&n, 20), "mismatch for {n}");
        }
    }

    #[test]
    fn rounds_shrink_with_size() {
        assert_eq!(miller_rabin_rounds(64), 40);
        assert_eq!(miller_rabin_rounds(1024), 10);
        assert_eq!(miller_rabin_rounds(8192), 3);
    }

    proptest! {
        #[test]
        fn inverse_times_value_is_one(a in 1u64..1_000_000, m in 2u64..1_000_000) {
            let (a, m) = (ubig(a), ubig(m));
            match mod_inverse(&a, &m) {
                Ok(x) => {
                    prop_assert!(x < m);
                    prop_assert_eq!((&a * &x) % &m, BigUint::one() % &m);
                }
                Err(err) => {
                    prop_assert_eq!(err, Error::NotInvertible);
                    prop_assert!(!a.gcd(&m).is_one());
                }
            }
        }

        #[test]
        fn mod_pow_matches_builtin(base in 0u64.., exp in 0u64..10_000, m in 2u64..) {
            let (base, exp, m) = (ubig(base), ubig(exp), ubig(m));
            prop_assert_eq!(mod_pow(&base, &exp, &m).unwrap(), base.modpow(&exp, &m));
        }
    }
}
