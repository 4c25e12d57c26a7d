#![no_main]

use libfuzzer_sys::fuzz_target;

use rsabox::Ciphertext;

fuzz_target!(|data: &[u8]| {
    if let Ok(ciphertext) = Ciphertext::from_bytes(data) {
        let reparsed = Ciphertext::from_bytes(&ciphertext.to_bytes().expect("packed form"))
            .expect("packed roundtrip");
        assert_eq!(ciphertext, reparsed);
    }

    if let Ok(text) = std::str::from_utf8(data) {
        if let Ok(ciphertext) = text.parse::<Ciphertext>() {
            let reparsed: Ciphertext = ciphertext.to_string().parse().expect("text roundtrip");
            assert_eq!(ciphertext, reparsed);
        }
    }
});
