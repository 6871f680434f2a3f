#![no_main]

use image_bclim::{convert, ConvertOptions, NoDecompressor};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let _result = convert(data, &ConvertOptions::default(), &NoDecompressor);
});
