// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use super::Encrypt;
use crate::arith::mod_pow;
use crate::ciphertext::Ciphertext;
use crate::codec::{BlockLayout, Padding};
use crate::error::Result;
use crate::keypair::{KeyPair, PublicKey};

use num_bigint_dig::BigUint;
use rayon::prelude::*;
use tracing::trace;

impl Encrypt for PublicKey {
    fn encrypt(&self, text: &str, padding: Padding) -> Result<Ciphertext> {
        let layout = BlockLayout::new(padding, self.bit_length())?;
        let plain = layout.encode(text)?;

        trace!(blocks = plain.len(), padding = %padding, "encrypting");

        // c = m^e mod n, block order preserved by the indexed collect
        let blocks = plain
            .par_iter()
            .map(|m| mod_pow(m, self.e(), self.n()))
            .collect::<Result<Vec<BigUint>>>()?;

        Ok(Ciphertext::new(blocks))
    }
}

impl Encrypt for KeyPair {
    #[inline]
    fn encrypt(&self, text: &str, padding: Padding) -> Result<Ciphertext> {
        self.public_key().encrypt(text, padding)
    }
}
