#![no_main]

use dmsnap::config::size::{format_size, parse_size};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(input) = std::str::from_utf8(data) {
        if let Ok(bytes) = parse_size(input) {
            // Anything that parses must survive a format/parse cycle unchanged
            let rendered = format_size(bytes).replace(" bytes", "");
            assert_eq!(parse_size(&rendered), Ok(bytes));
        }
    }
});
