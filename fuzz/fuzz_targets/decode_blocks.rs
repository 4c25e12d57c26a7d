#![no_main]

use libfuzzer_sys::fuzz_target;
use num_bigint_dig::BigUint;
use std::sync::OnceLock;

use rsabox::{codec, Ciphertext, Decrypt, KeyPair, Padding};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };

    let key_pair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(128).unwrap());
    let padding = Padding::new(u32::from(first % 20));

    let blocks: Vec<BigUint> = rest.chunks(12).map(BigUint::from_bytes_be).collect();

    // Arbitrary blocks either decode or report a decode failure; never panic.
    if let Err(err) = codec::decode(&blocks, padding) {
        assert!(err.is_undecryptable(), "unexpected error: {err}");
    }

    let ciphertext = Ciphertext::new(blocks);
    if let Err(err) = key_pair.decrypt(&ciphertext, padding) {
        assert!(err.is_undecryptable(), "unexpected error: {err}");
    }
});
