#![no_main]

use libfuzzer_sys::fuzz_target;
use std::sync::OnceLock;

use rsabox::{Decrypt, Encrypt, KeyPair, Padding};

static KEYPAIR: OnceLock<KeyPair> = OnceLock::new();

fuzz_target!(|data: &[u8]| {
    let Some((&first, rest)) = data.split_first() else {
        return;
    };

    let key_pair = KEYPAIR.get_or_init(|| KeyPair::generate_with_size(256).unwrap());

    // up to 14 padding digits still leave room for a full group under 256 bits
    let padding = Padding::new(u32::from(first % 15));
    let text: String = String::from_utf8_lossy(rest).chars().take(64).collect();

    let ciphertext = key_pair.encrypt(&text, padding).expect("valid text must encrypt");
    let decrypted = key_pair
        .decrypt(&ciphertext, padding)
        .unwrap_or_else(|err| panic!("decryption failed for {text:?}: {err}"));

    assert_eq!(text, decrypted);
});
