use std::path::Path;

use stencil_image::{Image, ImageSize};

use crate::{error::IoError, png};

/// A decoded 8-bit image with one to four interleaved channels.
#[derive(Debug, Clone, PartialEq)]
pub enum GenericImage {
    /// 8-bit grayscale image
    L8(Image<u8, 1>),
    /// 8-bit grayscale image with alpha channel
    La8(Image<u8, 2>),
    /// 8-bit RGB image
    Rgb8(Image<u8, 3>),
    /// 8-bit RGB image with alpha channel
    Rgba8(Image<u8, 4>),
}

impl GenericImage {
    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        match self {
            GenericImage::L8(img) => img.size(),
            GenericImage::La8(img) => img.size(),
            GenericImage::Rgb8(img) => img.size(),
            GenericImage::Rgba8(img) => img.size(),
        }
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        match self {
            GenericImage::L8(img) => img.num_channels(),
            GenericImage::La8(img) => img.num_channels(),
            GenericImage::Rgb8(img) => img.num_channels(),
            GenericImage::Rgba8(img) => img.num_channels(),
        }
    }

    /// Get the interleaved pixel data.
    pub fn as_slice(&self) -> &[u8] {
        match self {
            GenericImage::L8(img) => img.as_slice(),
            GenericImage::La8(img) => img.as_slice(),
            GenericImage::Rgb8(img) => img.as_slice(),
            GenericImage::Rgba8(img) => img.as_slice(),
        }
    }

    /// Write the image as a PNG file with the same number of channels.
    ///
    /// # Arguments
    ///
    /// * `file_path` - The path to the PNG image, which must have a `png` extension.
    pub fn write_png(&self, file_path: impl AsRef<Path>) -> Result<(), IoError> {
        match self {
            GenericImage::L8(img) => png::write_image_png_gray8(file_path, img),
            GenericImage::La8(img) => png::write_image_png_grayalpha8(file_path, img),
            GenericImage::Rgb8(img) => png::write_image_png_rgb8(file_path, img),
            GenericImage::Rgba8(img) => png::write_image_png_rgba8(file_path, img),
        }
    }
}

/// Reads an image from the given file path.
///
/// The method tries to read from any image format supported by the image crate, guessing
/// the format from the file contents. Images with more than 8 bits per sample are narrowed
/// to 8 bits; the channel layout is preserved.
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image containing the image data.
///
/// # Errors
///
/// Returns [`IoError::FileDoesNotExist`] if the path does not exist and
/// [`IoError::ImageDecodeError`] if the file cannot be decoded.
pub fn read_image_any(file_path: impl AsRef<Path>) -> Result<GenericImage, IoError> {
    let file_path = file_path.as_ref();

    // verify the file exists
    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    log::debug!(
        "decoded {} as {:?} ({})",
        file_path.display(),
        img.color(),
        size
    );

    let image = match img.color().channel_count() {
        1 => GenericImage::L8(Image::new(size, img.into_luma8().into_raw())?),
        2 => GenericImage::La8(Image::new(size, img.into_luma_alpha8().into_raw())?),
        3 => GenericImage::Rgb8(Image::new(size, img.into_rgb8().into_raw())?),
        4 => GenericImage::Rgba8(Image::new(size, img.into_rgba8().into_raw())?),
        n => return Err(IoError::UnsupportedImageFormat(n)),
    };

    Ok(image)
}
