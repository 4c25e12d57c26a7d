// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod encoding;
mod util;

pub use util::DEFAULT_EXPONENTS;

use crate::arith::{miller_rabin_rounds, mod_inverse, mod_pow};
use crate::error::{Error, Result};

use num_bigint_dig::BigUint;
use num_traits::{One, Zero};
use tracing::{debug, trace, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Public half of an RSA key: modulus `n` and public exponent `e`.
///
/// Safe to share with any party.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PublicKey {
    pub(crate) n: BigUint,
    pub(crate) e: BigUint,
}

impl PublicKey {
    /// Construct a public key from its components.
    ///
    /// Requires `n > 1` and `0 < e < n`.
    pub fn new(n: BigUint, e: BigUint) -> Result<Self> {
        if n <= BigUint::one() || e.is_zero() || e >= n {
            return Err(Error::InvalidPublicKey);
        }

        Ok(Self { n, e })
    }

    /// Return the public modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the public exponent `e`.
    pub fn e(&self) -> &BigUint {
        &self.e
    }

    /// Bit length of the modulus.
    pub fn bit_length(&self) -> usize {
        self.n.bits()
    }
}

/// Secret half of an RSA key: modulus `n` and private exponent `d`.
///
/// The private exponent is zeroized on drop.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct PrivateKey {
    #[zeroize(skip)]
    pub(crate) n: BigUint,
    pub(crate) d: BigUint,
}

impl PrivateKey {
    /// Construct a private key from its components.
    ///
    /// Requires `n > 1` and `0 < d < n`.
    pub fn new(n: BigUint, d: BigUint) -> Result<Self> {
        if n <= BigUint::one() || d.is_zero() || d >= n {
            return Err(Error::InvalidPrivateKey);
        }

        Ok(Self { n, d })
    }

    /// Return the modulus `n`.
    pub fn n(&self) -> &BigUint {
        &self.n
    }

    /// Return the private exponent `d`.
    pub fn d(&self) -> &BigUint {
        &self.d
    }

    /// Bit length of the modulus.
    pub fn bit_length(&self) -> usize {
        self.n.bits()
    }
}

/// A complete key pair consisting of public and private components.
///
/// Secret material is zeroized when dropped.
#[allow(missing_debug_implementations)]
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
#[cfg_attr(feature = "expose-secret", derive(Debug))]
pub struct KeyPair {
    #[zeroize(skip)]
    public: PublicKey,
    secret: PrivateKey,
}

impl KeyPair {
    /// Generate a key pair with default parameters (2048-bit modulus).
    pub fn generate() -> Result<Self> {
        KeyPairBuilder::new().build()
    }

    /// Generate a key pair with a custom modulus size.
    pub fn generate_with_size(bit_length: usize) -> Result<Self> {
        KeyPairBuilder::new().bit_length(bit_length).build()
    }

    /// Assemble a key pair from separately stored halves.
    ///
    /// Checks that both halves share the modulus and that the exponents
    /// undo each other on a handful of probe values. This does not prove
    /// `e·d ≡ 1 (mod φ(n))`, but a mismatched pair fails with overwhelming
    /// probability.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPrivateKey`] if the halves do not belong together.
    pub fn from_parts(public: PublicKey, secret: PrivateKey) -> Result<Self> {
        if public.n != secret.n {
            return Err(Error::InvalidPrivateKey);
        }

        let n = &public.n;
        let probes = [BigUint::from(2u32), BigUint::from(3u32), n / 3u32 + 1u32, n - 2u32];
        for m in probes.iter().filter(|m| *m < n) {
            let c = mod_pow(m, &public.e, n)?;
            if mod_pow(&c, &secret.d, n)? != *m {
                return Err(Error::InvalidPrivateKey);
            }
        }

        Ok(Self { public, secret })
    }

    /// Return the public key.
    pub fn public_key(&self) -> &PublicKey {
        &self.public
    }

    /// Return the private key.
    pub fn private_key(&self) -> &PrivateKey {
        &self.secret
    }
}

/// Builder for generating key pairs with configurable parameters.
#[derive(Debug, Clone)]
pub struct KeyPairBuilder {
    bit_length: usize,
    public_exponent: Option<BigUint>,
    primality_rounds: Option<usize>,
}

impl KeyPairBuilder {
    /// Minimum recommended for production (NIST/ENISA standard)
    pub const MIN_SECURE_BITS: usize = 2048;

    /// Absolute minimum: two 8-bit primes. Only useful for tests and
    /// classroom demonstrations.
    pub const MIN_BITS: usize = 16;

    /// Prime redraws before giving up on finding a usable exponent.
    const MAX_DRAWS: usize = 64;

    /// Create a builder with default parameters.
    pub fn new() -> Self {
        Self { bit_length: Self::MIN_SECURE_BITS, public_exponent: None, primality_rounds: None }
    }

    /// Set the desired modulus bit length. Each prime gets half of it.
    pub fn bit_length(mut self, bits: usize) -> Self {
        self.bit_length = bits;
        self
    }

    /// Use a fixed public exponent instead of [`DEFAULT_EXPONENTS`].
    ///
    /// Primes are redrawn until φ(n) is coprime with it.
    pub fn public_exponent(mut self, e: impl Into<BigUint>) -> Self {
        self.public_exponent = Some(e.into());
        self
    }

    /// Override the Miller-Rabin round count used while drawing primes.
    ///
    /// At least one round always runs; `0` is raised to `1`.
    pub fn primality_rounds(mut self, rounds: usize) -> Self {
        self.primality_rounds = Some(rounds.max(1));
        self
    }

    /// Generate the key pair.
    pub fn build(self) -> Result<KeyPair> {
        if self.bit_length < Self::MIN_BITS {
            return Err(Error::InvalidKeySize { min: Self::MIN_BITS, actual: self.bit_length });
        }

        if self.bit_length < Self::MIN_SECURE_BITS {
            warn!(
                bits = self.bit_length,
                min = Self::MIN_SECURE_BITS,
                "generating a cryptographically weak RSA key"
            );
        }

        let p_bits = self.bit_length / 2;
        let q_bits = self.bit_length - p_bits;
        let rounds = self.primality_rounds.unwrap_or_else(|| miller_rabin_rounds(q_bits));

        let candidates: Vec<BigUint> = match self.public_exponent {
            Some(ref e) => vec![e.clone()],
            None => DEFAULT_EXPONENTS.iter().map(|&e| BigUint::from(e)).collect(),
        };

        for draw in 1..=Self::MAX_DRAWS {
            let (p, q) = util::draw_prime_pair(p_bits, q_bits, rounds)?;

            if p == q {
                trace!(draw, "drew equal primes, redrawing");
                continue;
            }

            let n = &p * &q;
            let phi = (&p - 1u32) * (&q - 1u32);

            let Some(e) = util::choose_exponent(&phi, &candidates) else {
                debug!(draw, "no public exponent is coprime with phi(n), redrawing primes");
                continue;
            };

            let d = mod_inverse(&e, &phi)?;

            debug!(bits = n.bits(), e = %e, draw, "generated RSA key pair");

            let public = PublicKey::new(n.clone(), e)?;
            let secret = PrivateKey::new(n, d)?;
            return Ok(KeyPair { public, secret });
        }

        Err(Error::KeyGenerationFailed(format!(
            "no usable public exponent after {} prime draws",
            Self::MAX_DRAWS
        )))
    }
}

impl Default for KeyPairBuilder {
    fn default() -> Self {
        Self::new()
    }
}
