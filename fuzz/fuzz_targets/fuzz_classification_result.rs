//! Fuzz target: decoding of upstream `ClassificationResult` bodies.
//!
//! Anything that decodes must re-encode without error, since the gateway
//! relays decoded results back to the caller.

#![no_main]

use guesser_core::ClassificationResult;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(result) = serde_json::from_slice::<ClassificationResult>(data) else {
        return;
    };
    let json = serde_json::to_vec(&result).expect("decoded result must re-encode");
    assert!(!json.is_empty());
});
