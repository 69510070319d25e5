use crate::error::ImageError;

/// Image size in pixels
///
/// A struct to represent the size of an image in pixels.
///
/// # Examples
///
/// ```
/// use stencil_image::ImageSize;
///
/// let image_size = ImageSize {
///   width: 10,
///   height: 20,
/// };
///
/// assert_eq!(image_size.width, 10);
/// assert_eq!(image_size.height, 20);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: usize,
    /// Height of the image in pixels
    pub height: usize,
}

impl ImageSize {
    /// Number of samples needed to store an image of this size with `channels` per pixel.
    ///
    /// Returns `None` when the count does not fit in a `usize`.
    pub fn num_samples(&self, channels: usize) -> Option<usize> {
        self.width
            .checked_mul(self.height)
            .and_then(|n| n.checked_mul(channels))
    }
}

impl std::fmt::Display for ImageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "ImageSize {{ width: {}, height: {} }}",
            self.width, self.height
        )
    }
}

impl From<[usize; 2]> for ImageSize {
    fn from(size: [usize; 2]) -> Self {
        ImageSize {
            width: size[0],
            height: size[1],
        }
    }
}

/// Represents an image with pixel data.
///
/// The pixels are stored in a flat row-major buffer with the channels interleaved, so the
/// sample at row `y`, column `x` and channel `c` lives at `(y * width + x) * CHANNELS + c`.
#[derive(Clone, Debug, PartialEq)]
pub struct Image<T, const CHANNELS: usize> {
    size: ImageSize,
    data: Vec<T>,
}

impl<T, const CHANNELS: usize> Image<T, CHANNELS> {
    /// Create a new image from pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `data` - The pixel data of the image.
    ///
    /// # Returns
    ///
    /// A new image with the given pixel data.
    ///
    /// # Errors
    ///
    /// If the length of the pixel data does not match the image size, an error is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use stencil_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::new(
    ///    ImageSize {
    ///       width: 10,
    ///       height: 20,
    ///    },
    ///    vec![0u8; 10 * 20 * 3],
    /// ).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn new(size: ImageSize, data: Vec<T>) -> Result<Self, ImageError> {
        // check if the data length matches the image size
        let expected = size.num_samples(CHANNELS);
        if expected != Some(data.len()) {
            return Err(ImageError::InvalidChannelShape(
                data.len(),
                expected.unwrap_or(usize::MAX),
            ));
        }

        Ok(Self { size, data })
    }

    /// Create a new image with the given size and default pixel data.
    ///
    /// # Arguments
    ///
    /// * `size` - The size of the image in pixels.
    /// * `val` - The default value of the pixel data.
    ///
    /// # Examples
    ///
    /// ```
    /// use stencil_image::{Image, ImageSize};
    ///
    /// let image = Image::<u8, 3>::from_size_val(
    ///   ImageSize {
    ///     width: 10,
    ///     height: 20,
    ///   }, 0u8).unwrap();
    ///
    /// assert_eq!(image.size().width, 10);
    /// assert_eq!(image.size().height, 20);
    /// assert_eq!(image.num_channels(), 3);
    /// ```
    pub fn from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let num_samples = size
            .num_samples(CHANNELS)
            .ok_or(ImageError::AllocationFailed(usize::MAX))?;
        let data = vec![val; num_samples];
        Image::new(size, data)
    }

    /// Create a new image with the given size, reporting allocation failure as an error.
    ///
    /// Unlike [`Image::from_size_val`] the buffer is reserved with
    /// [`Vec::try_reserve_exact`], so an allocation that cannot be satisfied returns
    /// [`ImageError::AllocationFailed`] instead of aborting the process.
    ///
    /// # Examples
    ///
    /// ```
    /// use stencil_image::{Image, ImageError};
    ///
    /// let image = Image::<u8, 1>::try_from_size_val([4, 2].into(), 7u8).unwrap();
    /// assert_eq!(image.as_slice(), &[7u8; 8]);
    ///
    /// let huge = Image::<u8, 4>::try_from_size_val([usize::MAX / 8, 2].into(), 0u8);
    /// assert!(matches!(huge, Err(ImageError::AllocationFailed(_))));
    /// ```
    pub fn try_from_size_val(size: ImageSize, val: T) -> Result<Self, ImageError>
    where
        T: Clone,
    {
        let num_samples = size
            .num_samples(CHANNELS)
            .ok_or(ImageError::AllocationFailed(usize::MAX))?;

        let mut data = Vec::new();
        data.try_reserve_exact(num_samples).map_err(|_| {
            ImageError::AllocationFailed(num_samples.saturating_mul(std::mem::size_of::<T>()))
        })?;
        data.resize(num_samples, val);

        Image::new(size, data)
    }

    /// Get the size of the image in pixels.
    pub fn size(&self) -> ImageSize {
        self.size
    }

    /// Get the number of columns of the image.
    pub fn cols(&self) -> usize {
        self.width()
    }

    /// Get the number of rows of the image.
    pub fn rows(&self) -> usize {
        self.height()
    }

    /// Get the width of the image in pixels.
    pub fn width(&self) -> usize {
        self.size.width
    }

    /// Get the height of the image in pixels.
    pub fn height(&self) -> usize {
        self.size.height
    }

    /// Get the number of channels in the image.
    pub fn num_channels(&self) -> usize {
        CHANNELS
    }

    /// Number of samples in one row of the image (`width * CHANNELS`).
    pub fn row_stride(&self) -> usize {
        self.size.width * CHANNELS
    }

    /// Get the pixel data as a flat slice.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Get the pixel data as a flat mutable slice.
    pub fn as_slice_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    /// Get a reference to a sample, or `None` when any index is out of bounds.
    ///
    /// # Arguments
    ///
    /// * `x` - The column of the pixel.
    /// * `y` - The row of the pixel.
    /// * `ch` - The channel index.
    pub fn get(&self, x: usize, y: usize, ch: usize) -> Option<&T> {
        if x >= self.width() || y >= self.height() || ch >= CHANNELS {
            return None;
        }
        self.data.get((y * self.width() + x) * CHANNELS + ch)
    }

    /// Get the value of a sample.
    ///
    /// # Errors
    ///
    /// Returns [`ImageError::PixelIndexOutOfBounds`] or
    /// [`ImageError::ChannelIndexOutOfBounds`] for invalid coordinates.
    pub fn get_pixel(&self, x: usize, y: usize, ch: usize) -> Result<T, ImageError>
    where
        T: Copy,
    {
        if x >= self.width() || y >= self.height() {
            return Err(ImageError::PixelIndexOutOfBounds(
                x,
                y,
                self.width(),
                self.height(),
            ));
        }

        if ch >= CHANNELS {
            return Err(ImageError::ChannelIndexOutOfBounds(ch, CHANNELS));
        }

        Ok(self.data[(y * self.width() + x) * CHANNELS + ch])
    }
}

#[cfg(test)]
mod tests {
    use crate::image::{Image, ImageError, ImageSize};

    #[test]
    fn image_size() {
        let image_size = ImageSize {
            width: 10,
            height: 20,
        };
        assert_eq!(image_size.width, 10);
        assert_eq!(image_size.height, 20);
        assert_eq!(image_size.num_samples(3), Some(600));

        let huge: ImageSize = [usize::MAX / 2, 3].into();
        assert_eq!(huge.num_samples(1), None);
    }

    #[test]
    fn image_smoke() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 10,
                height: 20,
            },
            vec![0u8; 10 * 20 * 3],
        )?;
        assert_eq!(image.size().width, 10);
        assert_eq!(image.size().height, 20);
        assert_eq!(image.num_channels(), 3);
        assert_eq!(image.row_stride(), 30);

        Ok(())
    }

    #[test]
    fn image_invalid_length() {
        let image = Image::<u8, 2>::new([3, 3].into(), vec![0u8; 17]);
        assert_eq!(image, Err(ImageError::InvalidChannelShape(17, 18)));
    }

    #[test]
    fn image_interleaved_layout() -> Result<(), ImageError> {
        // 2x2 rgb, each sample encodes (y, x, c)
        let image = Image::<u8, 3>::new(
            ImageSize {
                width: 2,
                height: 2,
            },
            vec![0, 1, 2, 10, 11, 12, 100, 101, 102, 110, 111, 112],
        )?;

        assert_eq!(image.get(1, 0, 2), Some(&12));
        assert_eq!(image.get(0, 1, 1), Some(&101));
        assert_eq!(image.get(2, 0, 0), None);
        assert_eq!(image.get_pixel(1, 1, 0)?, 110);
        assert_eq!(
            image.get_pixel(0, 0, 3),
            Err(ImageError::ChannelIndexOutOfBounds(3, 3))
        );
        assert_eq!(
            image.get_pixel(0, 2, 0),
            Err(ImageError::PixelIndexOutOfBounds(0, 2, 2, 2))
        );

        Ok(())
    }

    #[test]
    fn image_size_overflow() {
        let size: ImageSize = [usize::MAX / 2, 3].into();

        let image = Image::<u8, 1>::new(size, vec![0u8; 6]);
        assert_eq!(image, Err(ImageError::InvalidChannelShape(6, usize::MAX)));

        let image = Image::<u8, 1>::from_size_val(size, 0);
        assert_eq!(image, Err(ImageError::AllocationFailed(usize::MAX)));
    }

    #[test]
    fn image_try_from_size_val() -> Result<(), ImageError> {
        let image = Image::<u8, 4>::try_from_size_val([3, 2].into(), 9)?;
        assert_eq!(image.as_slice().len(), 3 * 2 * 4);
        assert!(image.as_slice().iter().all(|&v| v == 9));

        let overflow = Image::<u8, 4>::try_from_size_val([usize::MAX, 2].into(), 0);
        assert!(matches!(overflow, Err(ImageError::AllocationFailed(_))));

        Ok(())
    }
}
