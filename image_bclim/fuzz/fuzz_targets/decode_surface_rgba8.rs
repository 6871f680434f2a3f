#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|surface: image_bclim::Surface<Vec<u8>>| {
    // Limit the dimensions to avoid large allocations.
    if surface.width <= 1024 && surface.height <= 1024 {
        let _result = surface.decode_rgba8();
    }
});
