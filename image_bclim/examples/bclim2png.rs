use image_bclim::{Bclim, Conversion, ConvertOptions, NoDecompressor};

fn main() {
    let args: Vec<_> = std::env::args().collect();

    let data = std::fs::read(&args[1]).unwrap();

    // Keep the padded canvas if a third argument is present.
    let options = ConvertOptions {
        crop: args.get(3).is_none(),
        ..Default::default()
    };

    let start = std::time::Instant::now();
    let image = match image_bclim::convert(&data, &options, &NoDecompressor).unwrap() {
        Conversion::Image(image) => image,
        Conversion::DecompressionFailed(e) => {
            // TODO: Accept the decompressor as a command line option.
            println!("Skipping compressed container: {e}");
            return;
        }
    };
    println!("Decoded data in {:?}", start.elapsed());

    let header = Bclim::from_decompressed_bytes(&data).unwrap();
    println!(
        "Texture is {}x{} with {} bytes of data",
        header.width,
        header.height,
        header.data.len()
    );

    image.save(&args[2]).unwrap();
}
