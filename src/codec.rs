// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Text ⇄ integer block encoding.
//!
//! Each character becomes a *group*, its code point plus one, which always
//! fits in seven decimal digits. Groups are packed into a block as base-10⁷
//! digits (the leading group unpadded, so a block never starts with a zero
//! group), then the block is shifted left by the configured number of
//! padding digits and a fixed marker is written into the freed digits:
//!
//! ```text
//! block = (g₀·10^(7(k-1)) + g₁·10^(7(k-2)) + … + g₍k₋₁₎) · 10^digits + marker
//! ```
//!
//! Encoding is greedy: a block keeps taking characters while its value stays
//! strictly below `2^(bits-1)`, which is at most `n` for every modulus of
//! `bits` bits. Decoding checks the marker and every group, so blocks that
//! were exponentiated with the wrong key are rejected with
//! [`Error::Decode`] rather than turned into arbitrary text.

use std::fmt;
use std::str::FromStr;

use num_bigint_dig::BigUint;
use num_integer::Integer;
use num_traits::{One, ToPrimitive, Zero};

use crate::{Error, Result};

/// Decimal digits reserved for each character group.
const GROUP_DIGITS: usize = 7;

/// `10^GROUP_DIGITS`.
const GROUP_RADIX: u32 = 10_000_000;

/// Digit written into every padding position.
const MARKER_DIGIT: u32 = 5;

/// Number of padding digits appended to every plaintext block.
///
/// The value is supplied with every encrypt and decrypt call and must match
/// between the two; the core never stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Padding(u32);

impl Padding {
    /// Padding used when the caller does not pick one.
    pub const DEFAULT_DIGITS: u32 = 10;

    /// No padding: blocks carry character groups only.
    pub const NONE: Padding = Padding(0);

    pub const fn new(digits: u32) -> Self {
        Self(digits)
    }

    #[inline]
    pub const fn digits(&self) -> u32 {
        self.0
    }

    /// `10^digits`, the factor a block's character data is shifted by.
    pub fn scale(&self) -> BigUint {
        num_traits::pow(BigUint::from(10u32), self.0 as usize)
    }

    /// The value stored in the padding digits: `digits` copies of the
    /// marker digit.
    pub fn marker(&self) -> BigUint {
        // 55…5 = 5 · (10^digits - 1) / 9
        (self.scale() - BigUint::one()) / BigUint::from(9u32) * BigUint::from(MARKER_DIGIT)
    }
}

impl Default for Padding {
    fn default() -> Self {
        Self(Self::DEFAULT_DIGITS)
    }
}

impl From<u32> for Padding {
    fn from(digits: u32) -> Self {
        Self(digits)
    }
}

impl fmt::Display for Padding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Padding {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

/// Block geometry for one `(padding, modulus bit length)` pair.
///
/// Every block this layout produces is strictly below [`limit`], and the
/// limit is at most the smallest modulus with that bit length, so blocks
/// always round-trip through modular exponentiation.
///
/// [`limit`]: BlockLayout::limit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockLayout {
    padding: Padding,
    modulus_bits: usize,
    limit: BigUint,
    scale: BigUint,
    marker: BigUint,
}

impl BlockLayout {
    /// Validate `padding` against a modulus of `modulus_bits` bits.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPadding`] when not even the smallest one-character
    /// block fits under the modulus.
    pub fn new(padding: Padding, modulus_bits: usize) -> Result<Self> {
        let invalid = Error::InvalidPadding { digits: padding.digits(), modulus_bits };

        // 10^digits > 2^(bits-1) as soon as digits ≥ bits; reject before
        // building the power.
        if modulus_bits < 2 || padding.digits() as usize >= modulus_bits {
            return Err(invalid);
        }

        let limit = BigUint::one() << (modulus_bits - 1);
        let scale = padding.scale();
        let marker = padding.marker();

        // smallest block: a single NUL character, group 1
        if &scale + &marker >= limit {
            return Err(invalid);
        }

        Ok(Self { padding, modulus_bits, limit, scale, marker })
    }

    #[inline]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    #[inline]
    pub fn modulus_bits(&self) -> usize {
        self.modulus_bits
    }

    /// Exclusive upper bound on block values, `2^(modulus_bits - 1)`.
    #[inline]
    pub fn limit(&self) -> &BigUint {
        &self.limit
    }

    #[inline]
    fn seal(&self, data: &BigUint) -> BigUint {
        data * &self.scale + &self.marker
    }

    /// Pack `text` into blocks.
    pub fn encode(&self, text: &str) -> Result<Vec<BigUint>> {
        let radix = BigUint::from(GROUP_RADIX);

        let mut blocks = Vec::new();
        let mut data = BigUint::zero();

        for (position, ch) in text.chars().enumerate() {
            let group = BigUint::from(u32::from(ch) + 1);

            if !data.is_zero() {
                let extended = &data * &radix + &group;
                if self.seal(&extended) < self.limit {
                    data = extended;
                    continue;
                }
                blocks.push(self.seal(&data));
            }

            if self.seal(&group) >= self.limit {
                return Err(Error::BlockOverflow { position, ch });
            }
            data = group;
        }

        if !data.is_zero() {
            blocks.push(self.seal(&data));
        }

        Ok(blocks)
    }
}

/// Encode `text` into plaintext blocks for a modulus of `modulus_bits` bits.
///
/// Deterministic: the same inputs always give the same blocks. Empty text
/// gives no blocks.
///
/// # Errors
///
/// [`Error::InvalidPadding`] if the padding leaves no room for data,
/// [`Error::BlockOverflow`] if some character cannot fit even alone.
pub fn encode(text: &str, padding: Padding, modulus_bits: usize) -> Result<Vec<BigUint>> {
    BlockLayout::new(padding, modulus_bits)?.encode(text)
}

/// Decode plaintext blocks produced by [`encode`] with the same `padding`.
///
/// # Errors
///
/// [`Error::Decode`] if a block's padding digits are not the marker, a
/// block carries no characters, or a group is not a Unicode scalar value.
pub fn decode(blocks: &[BigUint], padding: Padding) -> Result<String> {
    if blocks.is_empty() {
        return Ok(String::new());
    }

    // 10^digits exceeds any block of fewer than `digits` bits, which would
    // leave no character data; bail out before building the power.
    let widest = blocks.iter().map(BigUint::bits).max();
    if widest.is_some_and(|bits| padding.digits() as usize >= bits) {
        return Err(Error::Decode("padding is wider than the ciphertext blocks".into()));
    }

    let scale = padding.scale();
    let marker = padding.marker();
    let radix = BigUint::from(GROUP_RADIX);

    let mut text = String::new();
    let mut block_chars = Vec::new();

    for (index, block) in blocks.iter().enumerate() {
        let (mut data, pad) = block.div_rem(&scale);
        if pad != marker {
            return Err(Error::Decode(format!("block {index}: padding marker mismatch")));
        }
        if data.is_zero() {
            return Err(Error::Decode(format!("block {index}: no character data")));
        }

        // Groups come out least significant first.
        block_chars.clear();
        while !data.is_zero() {
            let (rest, group) = data.div_rem(&radix);
            block_chars.push(group_to_char(&group).ok_or_else(|| {
                Error::Decode(format!("block {index}: invalid character group {group}"))
            })?);
            data = rest;
        }

        text.extend(block_chars.iter().rev());
    }

    Ok(text)
}

#[inline]
fn group_to_char(group: &BigUint) -> Option<char> {
    let code = group.to_u32()?.checked_sub(1)?;
    char::from_u32(code)
}

/// Upper bound on the number of characters a block can hold under `layout`
/// when every character needs a full seven-digit group.
///
/// Useful for sizing: a text of `c` characters needs at most
/// `ceil(c / worst_case_chars_per_block)` blocks. Returns zero when some
/// characters would not fit at all.
pub fn worst_case_chars_per_block(layout: &BlockLayout) -> usize {
    let free_digits = decimal_digits_below(layout.limit())
        .saturating_sub(layout.padding().digits() as usize);
    free_digits / GROUP_DIGITS
}

/// Largest `d` with `10^d ≤ n`.
fn decimal_digits_below(n: &BigUint) -> usize {
    n.to_str_radix(10).len().saturating_sub(1)
}
