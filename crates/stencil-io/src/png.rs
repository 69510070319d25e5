use std::{fs, num::TryFromIntError, path::Path};

use png::{BitDepth, ColorType, Encoder};
use stencil_image::{Image, ImageSize};

use crate::error::IoError;

/// Writes the given PNG _(grayscale 8-bit)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the grayscale data.
pub fn write_image_png_gray8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 1>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path,
        image.as_slice(),
        image.size(),
        BitDepth::Eight,
        ColorType::Grayscale,
    )
}

/// Writes the given PNG _(grayscale with alpha, 8-bit)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the grayscale and alpha data.
pub fn write_image_png_grayalpha8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 2>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path,
        image.as_slice(),
        image.size(),
        BitDepth::Eight,
        ColorType::GrayscaleAlpha,
    )
}

/// Writes the given PNG _(rgb8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the RGB data.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path,
        image.as_slice(),
        image.size(),
        BitDepth::Eight,
        ColorType::Rgb,
    )
}

/// Writes the given PNG _(rgba8)_ data to the given file path.
///
/// # Arguments
///
/// - `file_path` - The path to the PNG image.
/// - `image` - The image containing the RGBA data.
pub fn write_image_png_rgba8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 4>,
) -> Result<(), IoError> {
    write_png_impl(
        file_path,
        image.as_slice(),
        image.size(),
        BitDepth::Eight,
        ColorType::Rgba,
    )
}

/// Checks that `file_path` names a PNG file.
///
/// The encoder always writes PNG data, so any other extension is rejected. Callers can run
/// this before doing expensive work that ends with a PNG write.
///
/// # Errors
///
/// Returns [`IoError::InvalidFileExtension`] if the extension is not `png` (ignoring case).
pub fn check_png_extension(file_path: impl AsRef<Path>) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    let is_png = file_path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("png"));
    if !is_png {
        return Err(IoError::InvalidFileExtension(file_path.to_path_buf()));
    }
    Ok(())
}

// png headers store dimensions as u32
fn png_dimensions(image_size: ImageSize) -> Result<(u32, u32), IoError> {
    let too_large =
        |_: TryFromIntError| IoError::PngEncodingError(format!("{image_size} exceeds png limits"));
    let width = u32::try_from(image_size.width).map_err(too_large)?;
    let height = u32::try_from(image_size.height).map_err(too_large)?;
    Ok((width, height))
}

fn write_png_impl(
    file_path: impl AsRef<Path>,
    image_data: &[u8],
    image_size: ImageSize,
    // Make sure you set `depth` correctly
    depth: BitDepth,
    color_type: ColorType,
) -> Result<(), IoError> {
    let file_path = file_path.as_ref();
    check_png_extension(file_path)?;

    let (width, height) = png_dimensions(image_size)?;

    // encode in memory so a failed encode leaves no file behind
    let mut buffer = Vec::new();
    let mut encoder = Encoder::new(&mut buffer, width, height);
    encoder.set_color(color_type);
    encoder.set_depth(depth);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .write_image_data(image_data)
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;
    writer
        .finish()
        .map_err(|e| IoError::PngEncodingError(e.to_string()))?;

    fs::write(file_path, &buffer)?;

    log::debug!("wrote {} png to {}", image_size, file_path.display());

    Ok(())
}
