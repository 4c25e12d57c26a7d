// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Private key recovery for small moduli.
//!
//! Textbook RSA is only as strong as the difficulty of factoring `n`. For the
//! toy key sizes this crate accepts, factoring is quick: trial division by
//! the small primes, then Pollard's rho on whatever cofactor remains. Once
//! the factorization is known, φ(n) and the private exponent follow.

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, Zero};
use tracing::{debug, trace};

use crate::arith::{is_probable_prime, miller_rabin_rounds, mod_inverse, SMALL_PRIMES};
use crate::ciphertext::Ciphertext;
use crate::codec::Padding;
use crate::crypto::Decrypt;
use crate::error::{Error, Result};
use crate::keypair::{PrivateKey, PublicKey};

/// Iterations of a single rho walk before trying another polynomial.
const MAX_RHO_STEPS: usize = 1 << 20;

/// Polynomials `x² + c` tried per cofactor, `c = 1..=MAX_RHO_SEEDS`.
const MAX_RHO_SEEDS: u32 = 8;

/// Factor `n` into primes, smallest first, with multiplicity.
///
/// # Errors
///
/// [`Error::FactorizationFailed`] if `n < 2` or a composite cofactor resists
/// every rho walk.
pub fn factor_modulus(n: &BigUint) -> Result<Vec<BigUint>> {
    if *n < BigUint::from(2u32) {
        return Err(Error::FactorizationFailed(format!("{n} has no prime factors")));
    }

    let mut factors = Vec::new();
    let mut rest = n.clone();

    for &p in SMALL_PRIMES {
        let p = BigUint::from(p);
        if &p * &p > rest {
            break;
        }
        while rest.is_multiple_of(&p) {
            rest /= &p;
            factors.push(p.clone());
        }
    }

    let mut pending = vec![rest];
    while let Some(m) = pending.pop() {
        if m.is_one() {
            continue;
        }
        if is_probable_prime(&m, miller_rabin_rounds(m.bits())) {
            factors.push(m);
            continue;
        }

        let divisor = (1..=MAX_RHO_SEEDS)
            .find_map(|c| pollard_rho(&m, c))
            .ok_or_else(|| Error::FactorizationFailed(format!("{m} resisted Pollard's rho")))?;

        trace!(divisor = %divisor, cofactor = %m, "split cofactor");

        pending.push(&m / &divisor);
        pending.push(divisor);
    }

    factors.sort();
    Ok(factors)
}

/// Floyd-cycle rho walk over `x ↦ x² + c mod n`.
///
/// Returns a proper divisor of `n`, or `None` if the walk closes its cycle
/// or runs out of steps.
fn pollard_rho(n: &BigUint, c: u32) -> Option<BigUint> {
    let c = BigUint::from(c);
    let step = |x: &BigUint| (x * x + &c) % n;

    let mut x = BigUint::from(2u32);
    let mut y = x.clone();

    for _ in 0..MAX_RHO_STEPS {
        x = step(&x);
        y = step(&step(&y));

        let diff = if x > y { &x - &y } else { &y - &x };
        if diff.is_zero() {
            return None;
        }

        let d = diff.gcd(n);
        if !d.is_one() {
            return (&d != n).then_some(d);
        }
    }

    None
}

/// Euler's totient from a prime factorization with multiplicity.
fn totient(factors: &[BigUint]) -> BigUint {
    let mut phi = BigUint::one();
    let mut previous: Option<&BigUint> = None;

    for p in factors {
        if previous == Some(p) {
            phi *= p;
        } else {
            phi *= p - 1u32;
        }
        previous = Some(p);
    }

    phi
}

/// Derive the private key that matches `pub_key` by factoring its modulus.
///
/// # Errors
///
/// [`Error::FactorizationFailed`] if the modulus cannot be factored,
/// [`Error::InvalidPublicKey`] if `e` has no inverse modulo φ(n).
pub fn recover_private_key(pub_key: &PublicKey) -> Result<PrivateKey> {
    let factors = factor_modulus(pub_key.n())?;
    let phi = totient(&factors);

    let e = pub_key.e();
    if *e <= BigUint::one() || *e >= phi || !e.gcd(&phi).is_one() {
        return Err(Error::InvalidPublicKey);
    }

    let d = mod_inverse(e, &phi)?;
    debug!(bits = pub_key.bit_length(), factors = factors.len(), "recovered private exponent");

    PrivateKey::new(pub_key.n().clone(), d)
}

/// Read a ciphertext addressed to `pub_key` without its private key.
pub fn decrypt_without_key(
    pub_key: &PublicKey,
    ciphertext: &Ciphertext,
    padding: Padding,
) -> Result<String> {
    recover_private_key(pub_key)?.decrypt(ciphertext, padding)
}
