//! Fuzz target for the token text decoder.
//!
//! Any accepted input must decode to exactly the requested frame length and
//! re-encode to the same text.

#![no_main]

use libfuzzer_sys::fuzz_target;
use tessera_token::frame;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    for frame_len in [20, 32] {
        if let Some(bytes) = frame::decode(text, frame_len) {
            assert_eq!(bytes.len(), frame_len);
            assert_eq!(frame::encode(&bytes), text);
        }
    }
});
