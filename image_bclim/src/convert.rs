use std::path::{Path, PathBuf};

use image::RgbaImage;

use crate::{
    bclim::read_file, decode_canvas, rgba8_from_tiled, Bclim, BclimError, CanvasPolicy,
    Decompress, DecompressError, ImageFormat, Parsed, Surface, SurfaceError, SurfaceRgba8,
};

/// Settings for [convert].
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ConvertOptions {
    /// Crop the decoded image to the dimensions stored in the container.
    /// Otherwise the entire padded canvas is returned.
    pub crop: bool,
    /// Save the cropped image as a PNG to this path.
    pub persist: Option<PathBuf>,
    /// The format of the tiled pixel data.
    pub format: ImageFormat,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            crop: true,
            persist: None,
            format: ImageFormat::Rgba8888,
        }
    }
}

/// The result of converting a container with [convert].
#[derive(Debug)]
pub enum Conversion {
    Image(RgbaImage),
    /// The container was compressed and could not be expanded.
    /// No image is saved in this case.
    DecompressionFailed(DecompressError),
}

impl Conversion {
    /// Returns the image or an empty image if decompression failed.
    pub fn into_image(self) -> RgbaImage {
        match self {
            Conversion::Image(image) => image,
            Conversion::DecompressionFailed(_) => RgbaImage::new(0, 0),
        }
    }
}

/// Decode a texture container to an RGBA8 image.
///
/// See [ConvertOptions] for cropping and saving the result.
pub fn convert<D: Decompress + ?Sized>(
    data: &[u8],
    options: &ConvertOptions,
    decompressor: &D,
) -> Result<Conversion, BclimError> {
    let bclim = match Bclim::from_bytes(data, decompressor)? {
        Parsed::Texture(bclim) => bclim,
        Parsed::DecompressionFailed(e) => return Ok(Conversion::DecompressionFailed(e)),
    };

    let image = image_from_bclim(&bclim, options.format)?;

    if !options.crop && options.persist.is_none() {
        return Ok(Conversion::Image(image));
    }

    let cropped = crop(&image, bclim.width, bclim.height);
    if let Some(path) = &options.persist {
        cropped.save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Saved {}x{} image to {path:?}", cropped.width(), cropped.height());
    }

    if options.crop {
        Ok(Conversion::Image(cropped))
    } else {
        Ok(Conversion::Image(image))
    }
}

/// Decode the container at `path` to an RGBA8 image.
///
/// If `autosave` is `true`, the cropped image is saved next to `path`
/// with the same name and a `png` extension.
pub fn convert_file<P: AsRef<Path>, D: Decompress + ?Sized>(
    path: P,
    crop: bool,
    autosave: bool,
    decompressor: &D,
) -> Result<Conversion, BclimError> {
    let path = path.as_ref();
    let data = read_file(path)?;

    let options = ConvertOptions {
        crop,
        persist: autosave.then(|| path.with_extension("png")),
        ..Default::default()
    };
    convert(&data, &options, decompressor)
}

/// Decode the tiled data in `bclim` to an RGBA8 image with the dimensions of the padded canvas.
///
/// The canvas is a power of two if `bclim` has enough data for 4 bytes per pixel.
/// Otherwise the dimensions are only rounded up to whole tiles.
pub fn image_from_bclim(bclim: &Bclim, format: ImageFormat) -> Result<RgbaImage, BclimError> {
    let canvas = decode_canvas(bclim.width, bclim.height, bclim.data.len()).ok_or(
        SurfaceError::PixelCountWouldOverflow {
            width: bclim.width,
            height: bclim.height,
        },
    )?;
    let rgba8 = rgba8_from_tiled(canvas.width, canvas.height, &bclim.data, format)?;
    let data_length = rgba8.len();

    RgbaImage::from_raw(canvas.width, canvas.height, rgba8).ok_or(
        BclimError::InvalidImageDimensions {
            width: canvas.width,
            height: canvas.height,
            data_length,
        },
    )
}

/// Encode `image` to tiled data with the given `format`.
///
/// The returned surface has the dimensions of the padded canvas selected by `policy`.
pub fn tiled_from_image(
    image: &RgbaImage,
    format: ImageFormat,
    policy: CanvasPolicy,
) -> Result<Surface<Vec<u8>>, SurfaceError> {
    SurfaceRgba8 {
        width: image.width(),
        height: image.height(),
        data: image.as_raw(),
    }
    .encode(format, policy)
}

fn crop(image: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let width = width.min(image.width());
    let height = height.min(image.height());
    image::imageops::crop_imm(image, 0, 0, width, height).to_image()
}
