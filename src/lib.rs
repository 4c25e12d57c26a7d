// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! # Textbook RSA over padded text blocks
//!
//! Key-pair generation, modular arithmetic primitives and a deterministic
//! block cipher built on unpadded ("textbook") RSA, meant for a small local
//! mailbox where each user encrypts messages for another user's public key.
//!
//! Text is split into blocks by [`codec`]: every character becomes a
//! seven-digit decimal group, groups are packed greedily while the block
//! stays below the modulus, and a fixed run of padding digits is appended.
//! Each block is then raised to the public exponent independently.
//!
//! ## Security
//!
//! Textbook RSA is deterministic and malleable, and the padding here is a
//! format marker, not OAEP. Use it to learn or to demonstrate attacks (see
//! [`attack`]), never to protect real data. Private exponents are zeroized on
//! drop.
//!
//! ## Example
//!
//! ```rust
//! use rsabox::{KeyPair, Padding, Rsa};
//!
//! let keypair = KeyPair::generate_with_size(512).expect("key generation failed");
//! let padding = Padding::default();
//!
//! let ciphertext = Rsa::encrypt(keypair.public_key(), "hello world", padding)
//!     .expect("encryption failed");
//! let decrypted = Rsa::decrypt(keypair.private_key(), &ciphertext, padding)
//!     .expect("decryption failed");
//! assert_eq!(decrypted, "hello world");
//! ```

pub mod arith;
pub mod attack;
pub mod codec;
pub mod prime;

mod ciphertext;
mod crypto;
mod error;
mod keypair;

pub use ciphertext::*;
pub use codec::{BlockLayout, Padding};
pub use crypto::*;
pub use error::*;
pub use keypair::*;
