//! Fuzz target: parsing of inbound `/api/re-examine` bodies.

#![no_main]

use guesser_core::ReExamineRequest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(req) = ReExamineRequest::parse(data) {
        assert!(!req.image_data.is_empty(), "accepted request must carry image_data");
    }
});
