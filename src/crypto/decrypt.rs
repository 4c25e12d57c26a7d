// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Decrypt;
use crate::arith::mod_pow;
use crate::ciphertext::Ciphertext;
use crate::codec::{self, Padding};
use crate::error::{Error, Result};
use crate::keypair::{KeyPair, PrivateKey};

use num_bigint_dig::BigUint;
use rayon::prelude::*;
use tracing::trace;
use zeroize::Zeroize;

impl Decrypt for PrivateKey {
    fn decrypt(&self, ciphertext: &Ciphertext, padding: Padding) -> Result<String> {
        // A block at or above n was not produced under this modulus.
        if let Some(index) = ciphertext.iter().position(|c| c >= self.n()) {
            return Err(Error::Decode(format!("block {index} is outside the key modulus")));
        }

        trace!(blocks = ciphertext.len(), padding = %padding, "decrypting");

        // m = c^d mod n
        let mut plain = ciphertext
            .par_iter()
            .map(|c| mod_pow(c, self.d(), self.n()))
            .collect::<Result<Vec<BigUint>>>()?;

        let text = codec::decode(&plain, padding);
        plain.zeroize();
        text
    }
}

impl Decrypt for KeyPair {
    #[inline]
    fn decrypt(&self, ciphertext: &Ciphertext, padding: Padding) -> Result<String> {
        self.private_key().decrypt(ciphertext, padding)
    }
}
