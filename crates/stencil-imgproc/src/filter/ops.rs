use stencil_image::{Image, ImageError};

use super::{filter3x3_rows, kernels::Kernel3, kernels::Kernel3x3, FilterError};
use crate::parallel;

/// Filter an image with a 3x3 kernel, splitting the rows across threads.
///
/// Every channel (alpha included) is filtered independently with edge-clamped borders.
/// The destination is fully written when the function returns.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The 3x3 kernel.
/// * `num_threads` - The number of worker threads, clamped to `[1, H]`.
///
/// # Errors
///
/// Returns [`ImageError::InvalidImageSize`] if `src` and `dst` differ in size, or
/// [`FilterError::Parallel`] if the workers could not be started.
pub fn filter3x3<const C: usize>(
    src: &Image<u8, C>,
    dst: &mut Image<u8, C>,
    kernel: &Kernel3x3,
    num_threads: usize,
) -> Result<(), FilterError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        )
        .into());
    }

    parallel::par_iter_row_ranges(dst, num_threads, |rows, dst_rows| {
        filter3x3_rows(src, dst_rows, rows, kernel);
    })?;

    Ok(())
}

/// Convolve an image with one of the fixed 3x3 filters.
///
/// The destination is allocated before any worker starts; if the allocation fails the
/// error is returned and no work is done.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `kernel` - The filter to apply.
/// * `num_threads` - The number of worker threads, clamped to `[1, H]`.
///
/// # Returns
///
/// A new image with the same size and channels as `src`.
///
/// # Example
///
/// ```
/// use stencil_image::{Image, ImageSize};
/// use stencil_imgproc::filter::{convolve, kernels::Kernel3};
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     (0..4 * 5 * 3).map(|v| v as u8).collect(),
/// )
/// .unwrap();
///
/// let same = convolve(&image, Kernel3::Identity, 4).unwrap();
///
/// assert_eq!(same.as_slice(), image.as_slice());
/// ```
pub fn convolve<const C: usize>(
    src: &Image<u8, C>,
    kernel: Kernel3,
    num_threads: usize,
) -> Result<Image<u8, C>, FilterError> {
    let mut dst = Image::try_from_size_val(src.size(), 0u8)?;
    filter3x3(src, &mut dst, kernel.coefficients(), num_threads)?;
    Ok(dst)
}
