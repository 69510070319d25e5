use std::ops::Range;

use stencil_image::Image;

use super::kernels::Kernel3x3;

/// Narrow an accumulated sum to a sample.
///
/// The value is truncated toward zero and wrapped modulo 256, so `300.0` becomes `44` and
/// `-5.0` becomes `251`. Out-of-range sums are not clamped.
#[inline]
pub fn narrow_u8(sum: f64) -> u8 {
    sum as i64 as u8
}

/// Compute one output sample with a 3x3 kernel.
///
/// Neighbors outside the image are clamped to the nearest edge pixel, so a 1x1 image
/// reads its single pixel at all nine kernel positions.
///
/// # Arguments
///
/// * `src` - The source image.
/// * `x` - The column of the pixel, in `[0, width)`.
/// * `y` - The row of the pixel, in `[0, height)`.
/// * `ch` - The channel to compute, in `[0, C)`.
/// * `kernel` - The 3x3 kernel.
///
/// # Returns
///
/// The filtered sample, narrowed with [`narrow_u8`].
///
/// # Examples
///
/// ```
/// use stencil_image::Image;
/// use stencil_imgproc::filter::{kernels::Kernel3, sample_kernel3x3};
///
/// let img = Image::<u8, 1>::new([1, 1].into(), vec![60]).unwrap();
///
/// // sharpen sums to 1, edge sums to 0
/// assert_eq!(sample_kernel3x3(&img, 0, 0, 0, Kernel3::Sharpen.coefficients()), 60);
/// assert_eq!(sample_kernel3x3(&img, 0, 0, 0, Kernel3::Edge.coefficients()), 0);
/// ```
pub fn sample_kernel3x3<const C: usize>(
    src: &Image<u8, C>,
    x: usize,
    y: usize,
    ch: usize,
    kernel: &Kernel3x3,
) -> u8 {
    let cols = src.cols();
    let data = src.as_slice();

    let xs = [x.saturating_sub(1), x, (x + 1).min(cols - 1)];
    let ys = [y.saturating_sub(1), y, (y + 1).min(src.rows() - 1)];

    let mut sum = 0.0f64;
    for (kernel_row, &yy) in kernel.iter().zip(ys.iter()) {
        let row_offset = yy * cols;
        for (&k, &xx) in kernel_row.iter().zip(xs.iter()) {
            sum += k * data[(row_offset + xx) * C + ch] as f64;
        }
    }

    narrow_u8(sum)
}

/// Filter a contiguous range of rows with a 3x3 kernel.
///
/// `dst_rows` holds the destination samples of `rows` only, starting at the first row of
/// the range. Reads may reach one row outside the range; writes never leave it.
///
/// # Arguments
///
/// * `src` - The full source image.
/// * `dst_rows` - The destination rows, `rows.len() * width * C` samples long.
/// * `rows` - The rows of `src` to filter.
/// * `kernel` - The 3x3 kernel.
///
/// PRECONDITION: `dst_rows.len() == rows.len() * src.row_stride()`. Use
/// [`super::filter3x3`] for a size-checked pass over a whole image.
pub fn filter3x3_rows<const C: usize>(
    src: &Image<u8, C>,
    dst_rows: &mut [u8],
    rows: Range<usize>,
    kernel: &Kernel3x3,
) {
    let row_stride = src.row_stride();
    debug_assert_eq!(
        dst_rows.len(),
        rows.len() * row_stride,
        "destination slice does not match the row range"
    );
    if row_stride == 0 {
        return;
    }

    for (y, dst_row) in rows.zip(dst_rows.chunks_exact_mut(row_stride)) {
        for (x, dst_pixel) in dst_row.chunks_exact_mut(C).enumerate() {
            for (ch, dst_val) in dst_pixel.iter_mut().enumerate() {
                *dst_val = sample_kernel3x3(src, x, y, ch, kernel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::kernels::Kernel3;
    use stencil_image::{ImageError, ImageSize};

    #[test]
    fn test_narrow_u8_wraps() {
        assert_eq!(narrow_u8(0.0), 0);
        assert_eq!(narrow_u8(255.9), 255);
        assert_eq!(narrow_u8(256.0), 0);
        assert_eq!(narrow_u8(300.0), 44);
        assert_eq!(narrow_u8(-0.5), 0);
        assert_eq!(narrow_u8(-5.0), 251);
        assert_eq!(narrow_u8(23.333333333333336), 23);
    }

    #[test]
    fn test_sample_single_pixel() -> Result<(), ImageError> {
        let img = Image::<u8, 3>::new([1, 1].into(), vec![10, 100, 200])?;

        // every neighbor clamps to (0, 0), so each coefficient weights the same sample
        for kernel in Kernel3::ALL {
            let k = kernel.coefficients();
            for ch in 0..3 {
                let v = img.get_pixel(0, 0, ch)? as f64;
                let expected = k.iter().flatten().fold(0.0, |acc, &c| acc + c * v);
                assert_eq!(
                    sample_kernel3x3(&img, 0, 0, ch, k),
                    narrow_u8(expected),
                    "kernel {kernel} channel {ch}"
                );
            }
        }

        Ok(())
    }

    #[test]
    fn test_sample_box_blur_3x3() -> Result<(), ImageError> {
        #[rustfmt::skip]
        let img = Image::<u8, 1>::new(
            ImageSize { width: 3, height: 3 },
            vec![
                10, 20, 30,
                40, 50, 60,
                70, 80, 90,
            ],
        )?;
        let k = Kernel3::BoxBlur.coefficients();

        assert_eq!(sample_kernel3x3(&img, 1, 1, 0, k), 50);
        // neighborhood {10, 10, 20, 10, 10, 20, 40, 40, 50} / 9 = 23.33
        assert_eq!(sample_kernel3x3(&img, 0, 0, 0, k), 23);
        // neighborhood {50, 60, 60, 80, 90, 90, 80, 90, 90} / 9 = 76.67
        assert_eq!(sample_kernel3x3(&img, 2, 2, 0, k), 76);

        Ok(())
    }

    #[test]
    fn test_sample_reads_only_its_channel() -> Result<(), ImageError> {
        // two channels, the second one is constant
        let img = Image::<u8, 2>::new([2, 1].into(), vec![0, 50, 255, 50])?;
        let k = Kernel3::BoxBlur.coefficients();

        assert_eq!(sample_kernel3x3(&img, 0, 0, 1, k), 50);
        // (0 * 6 + 255 * 3) / 9 = 85
        assert_eq!(sample_kernel3x3(&img, 0, 0, 0, k), 85);

        Ok(())
    }

    #[test]
    fn test_sample_sharpen_wraps() -> Result<(), ImageError> {
        // 100 * 5 - 4 * 50 = 300 -> 44
        #[rustfmt::skip]
        let img = Image::<u8, 1>::new(
            [3, 3].into(),
            vec![
                50, 50, 50,
                50, 100, 50,
                50, 50, 50,
            ],
        )?;
        assert_eq!(
            sample_kernel3x3(&img, 1, 1, 0, Kernel3::Sharpen.coefficients()),
            44
        );

        // 0 * 4 - 4 * 50 = -200 -> 56
        let img = Image::<u8, 1>::new(
            [3, 3].into(),
            vec![50, 50, 50, 50, 0, 50, 50, 50, 50],
        )?;
        assert_eq!(
            sample_kernel3x3(&img, 1, 1, 0, Kernel3::Edge.coefficients()),
            56
        );

        Ok(())
    }

    #[test]
    fn test_filter3x3_rows_only_writes_its_rows() -> Result<(), ImageError> {
        let img = Image::<u8, 1>::new([2, 4].into(), (1..=8).collect())?;
        let k = Kernel3::Identity.coefficients();

        let mut dst_rows = vec![0u8; 2 * 2];
        filter3x3_rows(&img, &mut dst_rows, 1..3, k);
        assert_eq!(dst_rows, vec![3, 4, 5, 6]);

        Ok(())
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "destination slice does not match the row range")]
    fn test_filter3x3_rows_short_destination() {
        let img = Image::<u8, 1>::from_size_val([2, 4].into(), 0).unwrap();

        // three rows requested, room for two
        let mut dst_rows = vec![0u8; 2 * 2];
        filter3x3_rows(&img, &mut dst_rows, 0..3, Kernel3::Identity.coefficients());
    }
}
