// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

/// Errors that can occur during cryptographic operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Arithmetic error: {0}")]
    Arithmetic(&'static str),

    #[error("Value has no inverse under the given modulus")]
    NotInvertible,

    #[error("Prime generation failed: no {bits}-bit prime found after {attempts} candidates")]
    PrimeGenerationFailed { bits: usize, attempts: usize },

    #[error("Key generation failed: {0}")]
    KeyGenerationFailed(String),

    #[error("Invalid key size: must be at least {min} bits, got {actual}")]
    InvalidKeySize { min: usize, actual: usize },

    #[error("Invalid public key")]
    InvalidPublicKey,

    #[error("Invalid private key")]
    InvalidPrivateKey,

    #[error("Invalid padding: {digits} digits leave no room for data under a {modulus_bits}-bit modulus")]
    InvalidPadding { digits: u32, modulus_bits: usize },

    #[error("Character {ch:?} at position {position} does not fit in a single block")]
    BlockOverflow { position: usize, ch: char },

    #[error("Unable to decode plaintext: {0}")]
    Decode(String),

    #[error("Malformed key encoding: {0}")]
    MalformedKey(String),

    #[error("Malformed ciphertext encoding: {0}")]
    MalformedCiphertext(String),

    #[error("Factorization failed: {0}")]
    FactorizationFailed(String),
}

impl Error {
    /// Whether this error means "the ciphertext does not open under this key
    /// and padding", as opposed to a fault in the caller or the environment.
    ///
    /// Decrypting with the wrong private key or the wrong padding lands here.
    pub fn is_undecryptable(&self) -> bool {
        matches!(self, Error::Decode(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
