#![no_main]
use fetch_headers::header::normalize_name;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        normalize_name(input).ok();
    }
});
