// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;

use num_bigint_dig::BigUint;

use crate::{Error, Result};

/// Version byte of the packed binary format.
const PACKED_VERSION: u8 = 1;

/// An ordered sequence of independently encrypted blocks.
///
/// Block order is the message order; every encoding below preserves it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Ciphertext {
    blocks: Vec<BigUint>,
}

impl Ciphertext {
    pub fn new(blocks: Vec<BigUint>) -> Self {
        Self { blocks }
    }

    pub fn blocks(&self) -> &[BigUint] {
        &self.blocks
    }

    pub fn into_blocks(self) -> Vec<BigUint> {
        self.blocks
    }

    /// Serialize into the packed wire format.
    ///
    /// Format:
    /// `[version:u8][block_count:u32][len:u32][block]...`, integers big-endian.
    ///
    /// # Errors
    ///
    /// [`Error::MalformedCiphertext`] if the block count or a block's byte
    /// length does not fit in a `u32` prefix.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut packed = Vec::new();

        packed.push(PACKED_VERSION);
        packed.extend_from_slice(&length_prefix(self.blocks.len(), "block count")?);

        for block in &self.blocks {
            let bytes = block.to_bytes_be();
            packed.extend_from_slice(&length_prefix(bytes.len(), "block length")?);
            packed.extend_from_slice(&bytes);
        }

        Ok(packed)
    }

    /// Parse the packed wire format produced by [`to_bytes`].
    ///
    /// [`to_bytes`]: Ciphertext::to_bytes
    pub fn from_bytes(packed: &[u8]) -> Result<Self> {
        let mut reader = Reader { bytes: packed };

        let version = reader.take(1, "version")?[0];
        if version != PACKED_VERSION {
            return Err(Error::MalformedCiphertext(format!("unsupported version: {version}")));
        }

        let count = reader.u32("block count")? as usize;

        // Each block costs at least its 4-byte length prefix, which bounds
        // the allocation for hostile counts.
        if count > reader.bytes.len() / 4 {
            return Err(Error::MalformedCiphertext(format!(
                "block count {count} exceeds the remaining {} bytes",
                reader.bytes.len()
            )));
        }

        let mut blocks = Vec::with_capacity(count);
        for _ in 0..count {
            let len = reader.u32("block length")? as usize;
            blocks.push(BigUint::from_bytes_be(reader.take(len, "block")?));
        }

        if !reader.bytes.is_empty() {
            return Err(Error::MalformedCiphertext(format!(
                "{} trailing bytes",
                reader.bytes.len()
            )));
        }

        Ok(Self { blocks })
    }
}

fn length_prefix(len: usize, what: &str) -> Result<[u8; 4]> {
    u32::try_from(len)
        .map(u32::to_be_bytes)
        .map_err(|_| Error::MalformedCiphertext(format!("{what} {len} exceeds u32::MAX")))
}

struct Reader<'a> {
    bytes: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize, what: &str) -> Result<&'a [u8]> {
        if self.bytes.len() < len {
            return Err(Error::MalformedCiphertext(format!("truncated {what}")));
        }
        let (head, rest) = self.bytes.split_at(len);
        self.bytes = rest;
        Ok(head)
    }

    fn u32(&mut self, what: &str) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4, what)?);
        Ok(u32::from_be_bytes(buf))
    }
}

impl Deref for Ciphertext {
    type Target = [BigUint];

    fn deref(&self) -> &Self::Target {
        &self.blocks
    }
}

impl From<Vec<BigUint>> for Ciphertext {
    fn from(blocks: Vec<BigUint>) -> Self {
        Self { blocks }
    }
}

impl FromIterator<BigUint> for Ciphertext {
    fn from_iter<I: IntoIterator<Item = BigUint>>(iter: I) -> Self {
        Self { blocks: iter.into_iter().collect() }
    }
}

impl IntoIterator for Ciphertext {
    type Item = BigUint;
    type IntoIter = std::vec::IntoIter<BigUint>;

    fn into_iter(self) -> Self::IntoIter {
        self.blocks.into_iter()
    }
}

/// One decimal block per line.
impl fmt::Display for Ciphertext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, block) in self.blocks.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{block}")?;
        }
        Ok(())
    }
}

/// Accepts decimal blocks separated by any whitespace.
impl FromStr for Ciphertext {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        s.split_whitespace()
            .enumerate()
            .map(|(i, token)| {
                if !token.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(Error::MalformedCiphertext(format!(
                        "block {i} is not a decimal integer: {token:?}"
                    )));
                }
                BigUint::parse_bytes(token.as_bytes(), 10).ok_or_else(|| {
                    Error::MalformedCiphertext(format!("block {i} is not a decimal integer"))
                })
            })
            .collect()
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::Ciphertext;

    impl Serialize for Ciphertext {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for Ciphertext {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        }
    }
}
