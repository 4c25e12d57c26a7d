// Copyright 2025 Nelson Dominguez
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Textual key export and import.
//!
//! Both halves use the same shape, `<n>:<exponent>` with each integer in
//! lowercase hexadecimal, so a user store can keep them as plain strings.
//! The private key deliberately has no `Display` impl; exporting it takes
//! an explicit [`PrivateKey::to_text`] call.

use std::fmt;
use std::str::FromStr;

use num_bigint_dig::BigUint;

use super::{PrivateKey, PublicKey};
use crate::{Error, Result};

const RADIX: u32 = 16;

fn split_pair(s: &str) -> Result<(BigUint, BigUint)> {
    let (n, exponent) = s
        .trim()
        .split_once(':')
        .ok_or_else(|| Error::MalformedKey("expected `<n>:<exponent>`".into()))?;

    Ok((parse_hex(n, "modulus")?, parse_hex(exponent, "exponent")?))
}

fn parse_hex(s: &str, what: &str) -> Result<BigUint> {
    if s.is_empty() {
        return Err(Error::MalformedKey(format!("empty {what}")));
    }
    if !s.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::MalformedKey(format!("{what} is not hexadecimal")));
    }
    BigUint::parse_bytes(s.as_bytes(), RADIX)
        .ok_or_else(|| Error::MalformedKey(format!("{what} is not hexadecimal")))
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.n.to_str_radix(RADIX), self.e.to_str_radix(RADIX))
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (n, e) = split_pair(s)?;
        PublicKey::new(n, e)
    }
}

impl PrivateKey {
    /// Export the key as `<n>:<d>` in hexadecimal.
    ///
    /// The returned string is secret material.
    pub fn to_text(&self) -> String {
        format!("{}:{}", self.n.to_str_radix(RADIX), self.d.to_str_radix(RADIX))
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (n, d) = split_pair(s)?;
        PrivateKey::new(n, d)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    use super::{PrivateKey, PublicKey};

    impl Serialize for PublicKey {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.collect_str(self)
        }
    }

    impl<'de> Deserialize<'de> for PublicKey {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        }
    }

    impl Serialize for PrivateKey {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(&self.to_text())
        }
    }

    impl<'de> Deserialize<'de> for PrivateKey {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let text = String::deserialize(deserializer)?;
            text.parse().map_err(D::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;
    use crate::KeyPair;

    #[test]
    fn public_key_text_roundtrip() {
        let keypair = KeyPair::generate_with_size(128).unwrap();
        let text = keypair.public_key().to_string();

        let parsed: PublicKey = text.parse().unwrap();
        assert_eq!(&parsed, keypair.public_key());
    }

    #[test]
    fn private_key_text_roundtrip() {
        let keypair = KeyPair::generate_with_size(128).unwrap();
        let text = keypair.private_key().to_text();

        let parsed: PrivateKey = text.parse().unwrap();
        assert!(&parsed == keypair.private_key());
    }

    #[test]
    fn known_encoding() {
        let public = PublicKey::new(BigUint::from(3233u32), BigUint::from(17u32)).unwrap();
        assert_eq!(public.to_string(), "ca1:11");

        let secret: PrivateKey = " ca1:ac1 \n".parse().unwrap();
        assert_eq!(secret.d(), &BigUint::from(2753u32));
    }

    #[test]
    fn rejects_malformed_text() {
        let cases = [
            "", "ca1", "ca1:", ":11", "xyz:11", "ca1:11:5", "+ca1:11", "ca1:1_1", "ca1:-11", "ca1: 11",
        ];
        for bad in cases {
            let result = bad.parse::<PublicKey>();
            assert!(matches!(result, Err(Error::MalformedKey(_))), "accepted {bad:?}");
        }
    }

    #[test]
    fn rejects_out_of_range_components() {
        // e ≥ n
        assert_eq!("21:21".parse::<PublicKey>(), Err(Error::InvalidPublicKey));
        // d = 0
        assert!(matches!("21:0".parse::<PrivateKey>(), Err(Error::InvalidPrivateKey)));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_text_form() {
        let public = PublicKey::new(BigUint::from(3233u32), BigUint::from(17u32)).unwrap();
        let json = serde_json::to_string(&public).unwrap();
        assert_eq!(json, "\"ca1:11\"");
        assert_eq!(serde_json::from_str::<PublicKey>(&json).unwrap(), public);

        let secret = PrivateKey::new(BigUint::from(3233u32), BigUint::from(2753u32)).unwrap();
        let json = serde_json::to_string(&secret).unwrap();
        assert!(serde_json::from_str::<PrivateKey>(&json).unwrap() == secret);
    }
}
