#![no_main]
use fetch_headers::header::normalize_value;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        normalize_value(input).ok();
    }
});
