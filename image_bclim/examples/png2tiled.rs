use std::str::FromStr;

use image_bclim::{CanvasPolicy, ImageFormat};

fn main() {
    let args: Vec<_> = std::env::args().collect();

    // Don't assume the image comes with an alpha channel.
    let image = image::open(&args[1]).unwrap().to_rgba8();

    let format_string = args.get(3).cloned().unwrap_or(String::from("Rgba8888"));
    let format = ImageFormat::from_str(&format_string).unwrap();

    let policy = match args.get(4).map(String::as_str) {
        Some("square") => CanvasPolicy::Square,
        _ => CanvasPolicy::Rectangle,
    };

    let start = std::time::Instant::now();
    let surface = image_bclim::tiled_from_image(&image, format, policy).unwrap();
    println!(
        "Encoded {}x{} canvas in {:?}",
        surface.width,
        surface.height,
        start.elapsed()
    );

    std::fs::write(&args[2], &surface.data).unwrap();
}
