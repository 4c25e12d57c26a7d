// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use tracing::debug;

use super::{Decrypt, Encrypt};
use crate::ciphertext::Ciphertext;
use crate::codec::Padding;
use crate::error::Result;
use crate::keypair::{PrivateKey, PublicKey};

/// Textbook RSA over padded text blocks.
///
/// A thin facade over the [`Encrypt`] and [`Decrypt`] impls for callers that
/// prefer free-standing calls, plus re-encryption for key rotation.
pub struct Rsa;

impl Rsa {
    /// Encrypt `text` for the holder of `pub_key`.
    pub fn encrypt(pub_key: &PublicKey, text: &str, padding: Padding) -> Result<Ciphertext> {
        pub_key.encrypt(text, padding)
    }

    /// Decrypt `ciphertext` with `priv_key`.
    ///
    /// A ciphertext addressed to another key, or decrypted with a different
    /// padding than it was encrypted with, fails with an error for which
    /// [`Error::is_undecryptable`] holds (or, rarely, decodes to garbage).
    ///
    /// [`Error::is_undecryptable`]: crate::Error::is_undecryptable
    pub fn decrypt(
        priv_key: &PrivateKey,
        ciphertext: &Ciphertext,
        padding: Padding,
    ) -> Result<String> {
        priv_key.decrypt(ciphertext, padding)
    }

    /// Move a ciphertext from one key and padding to another.
    ///
    /// Decrypts under `old_key`/`old_padding` and encrypts the recovered text
    /// under `new_key`/`new_padding`. Used when a mailbox owner rotates keys
    /// or changes padding and their stored messages must follow.
    pub fn reencrypt(
        ciphertext: &Ciphertext,
        old_key: &PrivateKey,
        old_padding: Padding,
        new_key: &PublicKey,
        new_padding: Padding,
    ) -> Result<Ciphertext> {
        let text = old_key.decrypt(ciphertext, old_padding)?;

        debug!(
            from_bits = old_key.bit_length(),
            to_bits = new_key.bit_length(),
            %old_padding,
            %new_padding,
            "re-encrypting ciphertext"
        );

        new_key.encrypt(&text, new_padding)
    }
}
