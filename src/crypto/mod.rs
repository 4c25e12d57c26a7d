// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

mod decrypt;
mod encrypt;
mod rsa;

pub use rsa::Rsa;

use crate::ciphertext::Ciphertext;
use crate::codec::Padding;
use crate::error::Result;

/// Encrypts text into a sequence of RSA blocks.
pub trait Encrypt {
    /// Encode `text` with `padding` and raise every block to `e` mod `n`.
    ///
    /// Deterministic: equal inputs give equal ciphertexts. Empty text gives
    /// an empty ciphertext.
    fn encrypt(&self, text: &str, padding: Padding) -> Result<Ciphertext>;
}

/// Decrypts a block sequence produced by [`Encrypt`].
pub trait Decrypt {
    /// Raise every block to `d` mod `n` and decode the result with `padding`.
    ///
    /// Blocks that cannot have come from this key, or that decode to
    /// something other than padded text, give [`Error::Decode`].
    ///
    /// [`Error::Decode`]: crate::Error::Decode
    fn decrypt(&self, ciphertext: &Ciphertext, padding: Padding) -> Result<String>;
}
