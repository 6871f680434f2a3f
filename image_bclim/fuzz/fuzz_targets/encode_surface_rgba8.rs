#![no_main]

use image_bclim::{CanvasPolicy, ImageFormat, SurfaceRgba8};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (SurfaceRgba8<Vec<u8>>, ImageFormat, CanvasPolicy)| {
    let (surface, format, policy) = input;
    if surface.width <= 1024 && surface.height <= 1024 {
        let _result = surface.encode(format, policy);
    }
});
