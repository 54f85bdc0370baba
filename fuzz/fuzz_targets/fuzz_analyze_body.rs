//! Fuzz target: parsing of inbound `/api/analyze` bodies.
//!
//! Arbitrary bytes must either parse into a request with non-empty
//! `image_data` or be rejected; never panic.

#![no_main]

use guesser_core::AnalyzeRequest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(req) = AnalyzeRequest::parse(data) {
        assert!(!req.image_data.is_empty(), "accepted request must carry image_data");
    }
});
