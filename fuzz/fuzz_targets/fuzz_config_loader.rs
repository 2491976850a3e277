#![no_main]

use std::path::Path;

use dmsnap::config::loader::ConfigLoader;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(toml_str) = std::str::from_utf8(data) {
        let loader = ConfigLoader::with_defaults();

        // Only panics matter here
        let _ = loader.load_from_str(toml_str, Path::new("fuzz.toml"));
    }
});
