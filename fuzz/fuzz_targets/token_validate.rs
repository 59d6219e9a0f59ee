//! Fuzz target for token validation.
//!
//! Feeds arbitrary identities and token strings to both schemes. Validation
//! must never panic and must never accept a token it did not issue.

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tessera_token::Codec;

#[derive(Debug, Arbitrary)]
struct FuzzInput {
    identity: String,
    token: String,
    /// Flip one byte of a genuine token instead of using `token` directly
    mutate: Option<(u8, u8)>,
}

fuzz_target!(|input: FuzzInput| {
    let codecs = [
        Codec::new(b"fuzzfuzzfuzzfuzz").expect("valid AES key"),
        Codec::hmac(b"fuzz-hmac-key").expect("valid HMAC key"),
    ];

    for codec in &codecs {
        match input.mutate {
            None => {
                let _ = codec.validate(&input.identity, &input.token);
            }
            Some((position, flip)) if flip != 0 => {
                let token = codec.generate(&input.identity).expect("generate");
                let mut bytes = token.into_bytes();
                let idx = position as usize % bytes.len();
                bytes[idx] ^= flip;

                // Flips into non-UTF-8 can't reach the codec at all.
                if let Ok(tampered) = String::from_utf8(bytes) {
                    if codec.validate(&input.identity, &tampered).is_ok() {
                        panic!("tampered token accepted: {tampered}");
                    }
                }
            }
            Some(_) => {
                let token = codec.generate(&input.identity).expect("generate");
                assert!(codec.validate(&input.identity, &token).is_ok());
            }
        }
    }
});
