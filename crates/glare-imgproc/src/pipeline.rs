use glare_image::{cast_and_scale, Image, ImageDtype, ImageError, ImageSize};

use crate::color;
use crate::filter::{conv2d, conv2d_u8, kernels};
use crate::parallel;
use crate::threshold;

/// The brightness threshold above which pixels are blurred, unless the
/// caller overrides it.
pub const DEFAULT_BRIGHTNESS_THRESHOLD: u8 = 200;

/// Named channels of an HSV image.
///
/// Used to select which planes a filter touches, instead of passing raw
/// 0/1/2 indices around.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HsvChannel {
    /// Hue, stored in channel 0.
    Hue,
    /// Saturation, stored in channel 1.
    Saturation,
    /// Value (brightness), stored in channel 2.
    Value,
}

impl HsvChannel {
    /// The plane index of the channel within an HSV image.
    pub const fn index(self) -> usize {
        match self {
            HsvChannel::Hue => 0,
            HsvChannel::Saturation => 1,
            HsvChannel::Value => 2,
        }
    }
}

/// Parameters of the Laplacian-of-Gaussian kernel used by
/// [`enhance_split_high_pass`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogParams {
    /// The side length of the kernel. Must be a positive odd integer.
    pub kernel_size: usize,
    /// The sigma of the underlying Gaussian. Must be positive.
    pub sigma: f32,
}

impl Default for LogParams {
    fn default() -> Self {
        Self {
            kernel_size: 5,
            sigma: 1.0,
        }
    }
}

/// Blur the pixels of an RGB image whose brightness exceeds a threshold.
///
/// The brightness of each pixel is its V channel after conversion to HSV.
/// Pixels with brightness strictly greater than `threshold` are replaced
/// by the corresponding pixel of the low-pass filtered image (all three
/// channels together); every other pixel is copied unchanged.
///
/// # Arguments
///
/// * `src` - The input RGB image.
/// * `dst` - The output RGB image with the same size as the input.
/// * `threshold` - The brightness threshold in [0, 255].
pub fn blur_bright_pixels(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    threshold: u8,
) -> Result<(), ImageError> {
    if src.cols() == 0 || src.rows() == 0 {
        return Err(ImageError::InvalidImageShape(src.cols(), src.rows()));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    // brightness mask from the V channel
    let mut hsv = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    color::hsv_from_rgb_u8(src, &mut hsv)?;

    let brightness = hsv.channel(HsvChannel::Value.index())?;
    let mut mask = Image::<u8, 1>::from_size_val(src.size(), 0)?;
    threshold::threshold_binary(&brightness, &mut mask, threshold, 255)?;

    // low-pass filter the original RGB image, not the HSV one
    let kernel = kernels::low_pass_kernel_3x3().concat();
    let mut blurred = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    conv2d_u8(src, &mut blurred, &kernel, 3)?;

    dst.as_slice_mut().copy_from_slice(src.as_slice());
    parallel::par_iter_rows_two(&mask, &blurred, dst, |mask_pixel, blur_pixel, dst_pixel| {
        if mask_pixel[0] != 0 {
            dst_pixel.copy_from_slice(blur_pixel);
        }
    });

    Ok(())
}

/// Enhance an RGB image with a split-region Laplacian-of-Gaussian filter.
///
/// The image is converted to HSV and split into a left and a right half at
/// column `width / 2` (for odd widths the left half is one column
/// narrower). On the left half the kernel is applied to the saturation and
/// value planes, on the right half to the hue and saturation planes; the
/// untouched plane of each half is carried through as-is. The halves are
/// concatenated again and converted back to RGB.
///
/// # Arguments
///
/// * `src` - The input RGB image. Must be at least 2 pixels wide.
/// * `dst` - The output RGB image with the same size as the input.
/// * `params` - The Laplacian-of-Gaussian kernel parameters.
pub fn enhance_split_high_pass(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    params: &LogParams,
) -> Result<(), ImageError> {
    if src.cols() < 2 || src.rows() == 0 {
        return Err(ImageError::InvalidImageShape(src.cols(), src.rows()));
    }

    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let kernel = kernels::log_kernel_2d(params.kernel_size, params.sigma)?;

    let mut hsv = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    color::hsv_from_rgb_u8(src, &mut hsv)?;

    let mut enhanced = Image::<u8, 3>::from_size_val(src.size(), 0)?;
    split_log_enhance_hsv(&hsv, &mut enhanced, &kernel, params.kernel_size)?;

    color::rgb_from_hsv_u8(&enhanced, dst)?;

    Ok(())
}

/// The HSV-space core of [`enhance_split_high_pass`]: split, filter each
/// half on its channel set, concatenate.
fn split_log_enhance_hsv(
    hsv: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    kernel: &[f32],
    kernel_size: usize,
) -> Result<(), ImageError> {
    let (mut left, mut right) = split_columns(hsv)?;

    filter_hsv_channels(
        &mut left,
        kernel,
        kernel_size,
        &[HsvChannel::Saturation, HsvChannel::Value],
    )?;
    filter_hsv_channels(
        &mut right,
        kernel,
        kernel_size,
        &[HsvChannel::Hue, HsvChannel::Saturation],
    )?;

    concat_columns(&left, &right, dst)
}

/// Apply the kernel to the selected planes of an HSV image in place,
/// rounding and clamping each filtered plane to [0, 255].
fn filter_hsv_channels(
    hsv: &mut Image<u8, 3>,
    kernel: &[f32],
    kernel_size: usize,
    channels: &[HsvChannel],
) -> Result<(), ImageError> {
    for &channel in channels {
        let plane = hsv.channel(channel.index())?;

        let mut plane_f32 = Image::<f32, 1>::from_size_val(plane.size(), 0.0)?;
        cast_and_scale(&plane, &mut plane_f32, 1.0)?;

        let mut filtered = Image::<f32, 1>::from_size_val(plane.size(), 0.0)?;
        conv2d(&plane_f32, &mut filtered, kernel, kernel_size)?;

        let index = channel.index();
        hsv.as_slice_mut()
            .chunks_exact_mut(3)
            .zip(filtered.as_slice().iter())
            .for_each(|(pixel, &val)| pixel[index] = u8::from_f32(val));
    }

    Ok(())
}

/// Split an image into a left and a right half at column `width / 2`.
fn split_columns(src: &Image<u8, 3>) -> Result<(Image<u8, 3>, Image<u8, 3>), ImageError> {
    let mid = src.cols() / 2;
    let left_size = ImageSize {
        width: mid,
        height: src.rows(),
    };
    let right_size = ImageSize {
        width: src.cols() - mid,
        height: src.rows(),
    };

    let mut left_data = Vec::with_capacity(left_size.width * left_size.height * 3);
    let mut right_data = Vec::with_capacity(right_size.width * right_size.height * 3);
    for row in src.as_slice().chunks_exact(src.cols() * 3) {
        left_data.extend_from_slice(&row[..mid * 3]);
        right_data.extend_from_slice(&row[mid * 3..]);
    }

    Ok((
        Image::new(left_size, left_data)?,
        Image::new(right_size, right_data)?,
    ))
}

/// Concatenate two images of equal height side by side.
fn concat_columns(
    left: &Image<u8, 3>,
    right: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
) -> Result<(), ImageError> {
    if left.rows() != right.rows() || dst.cols() != left.cols() + right.cols() {
        return Err(ImageError::InvalidImageSize(
            left.cols() + right.cols(),
            left.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let left_row = left.cols() * 3;
    dst.as_slice_mut()
        .chunks_exact_mut((left.cols() + right.cols()) * 3)
        .zip(
            left.as_slice()
                .chunks_exact(left_row)
                .zip(right.as_slice().chunks_exact(right.cols() * 3)),
        )
        .for_each(|(dst_row, (l, r))| {
            dst_row[..left_row].copy_from_slice(l);
            dst_row[left_row..].copy_from_slice(r);
        });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_image(size: ImageSize, pixel: [u8; 3]) -> Image<u8, 3> {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(size.width * size.height * 3)
            .collect();
        Image::new(size, data).unwrap()
    }

    #[test]
    fn test_blur_bright_pixels_all_bright() -> Result<(), ImageError> {
        // pure hues all have V = 255, so every pixel is above the default
        // threshold and the result must equal the plain low-pass filter
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        #[rustfmt::skip]
        let image = Image::<u8, 3>::new(
            size,
            vec![
                255, 0, 0,   0, 255, 0,   0, 0, 255,
                255, 255, 0, 0, 255, 255, 255, 0, 255,
                255, 0, 0,   0, 255, 0,   0, 0, 255,
            ],
        )?;

        let mut expected = Image::<u8, 3>::from_size_val(size, 0)?;
        let kernel = kernels::low_pass_kernel_3x3().concat();
        conv2d_u8(&image, &mut expected, &kernel, 3)?;

        let mut result = Image::<u8, 3>::from_size_val(size, 0)?;
        blur_bright_pixels(&image, &mut result, DEFAULT_BRIGHTNESS_THRESHOLD)?;

        assert_eq!(result.as_slice(), expected.as_slice());

        Ok(())
    }

    #[test]
    fn test_blur_bright_pixels_all_dark_is_identity() -> Result<(), ImageError> {
        // solid dark gray, far below the threshold
        let size = ImageSize {
            width: 10,
            height: 10,
        };
        let image = solid_image(size, [84, 84, 84]);

        let mut result = Image::<u8, 3>::from_size_val(size, 0)?;
        blur_bright_pixels(&image, &mut result, DEFAULT_BRIGHTNESS_THRESHOLD)?;

        assert_eq!(result.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn test_blur_bright_pixels_replaces_only_masked_pixels() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 3,
        };
        let mut image = solid_image(size, [10, 10, 10]);
        // single bright pixel in the center
        let center = (size.width + 1) * 3;
        image.as_slice_mut()[center..center + 3].copy_from_slice(&[255, 255, 255]);

        let kernel = kernels::low_pass_kernel_3x3().concat();
        let mut blurred = Image::<u8, 3>::from_size_val(size, 0)?;
        conv2d_u8(&image, &mut blurred, &kernel, 3)?;

        let mut result = Image::<u8, 3>::from_size_val(size, 0)?;
        blur_bright_pixels(&image, &mut result, DEFAULT_BRIGHTNESS_THRESHOLD)?;

        for y in 0..3 {
            for x in 0..3 {
                for ch in 0..3 {
                    let want = if (x, y) == (1, 1) {
                        blurred.get_pixel(x, y, ch)?
                    } else {
                        image.get_pixel(x, y, ch)?
                    };
                    assert_eq!(result.get_pixel(x, y, ch)?, want);
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_blur_bright_pixels_threshold_is_strict() -> Result<(), ImageError> {
        // brightness exactly at the threshold stays untouched
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        let image = solid_image(size, [200, 200, 200]);

        let mut result = Image::<u8, 3>::from_size_val(size, 0)?;
        blur_bright_pixels(&image, &mut result, 200)?;
        assert_eq!(result.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn test_blur_bright_pixels_rejects_empty() -> Result<(), ImageError> {
        let empty = Image::<u8, 3>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )?;
        let mut dst = empty.clone();
        assert!(matches!(
            blur_bright_pixels(&empty, &mut dst, 200),
            Err(ImageError::InvalidImageShape(0, 0))
        ));

        Ok(())
    }

    #[test]
    fn test_split_columns_odd_width() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 5,
            height: 1,
        };
        let data: Vec<u8> = (0..15).collect();
        let image = Image::<u8, 3>::new(size, data)?;

        let (left, right) = split_columns(&image)?;
        assert_eq!(left.cols(), 2);
        assert_eq!(right.cols(), 3);
        assert_eq!(left.as_slice(), &[0, 1, 2, 3, 4, 5]);
        assert_eq!(right.as_slice(), &[6, 7, 8, 9, 10, 11, 12, 13, 14]);

        let mut back = Image::<u8, 3>::from_size_val(size, 0)?;
        concat_columns(&left, &right, &mut back)?;
        assert_eq!(back.as_slice(), image.as_slice());

        Ok(())
    }

    #[test]
    fn test_split_halves_are_independent() -> Result<(), ImageError> {
        // two HSV images that differ only in the right half must produce
        // identical left halves, and vice versa
        let size = ImageSize {
            width: 4,
            height: 3,
        };
        let mut data_a = Vec::new();
        for i in 0..size.width * size.height * 3 {
            data_a.push((i * 7 % 256) as u8);
        }
        let hsv_a = Image::<u8, 3>::new(size, data_a)?;

        let mut hsv_b = hsv_a.clone();
        for row in hsv_b.as_slice_mut().chunks_exact_mut(size.width * 3) {
            for val in row[2 * 3..].iter_mut() {
                *val = val.wrapping_add(91);
            }
        }
        let mut hsv_c = hsv_a.clone();
        for row in hsv_c.as_slice_mut().chunks_exact_mut(size.width * 3) {
            for val in row[..2 * 3].iter_mut() {
                *val = val.wrapping_add(91);
            }
        }

        let kernel = kernels::log_kernel_2d(5, 1.0)?;
        let mut out_a = Image::<u8, 3>::from_size_val(size, 0)?;
        let mut out_b = Image::<u8, 3>::from_size_val(size, 0)?;
        let mut out_c = Image::<u8, 3>::from_size_val(size, 0)?;
        split_log_enhance_hsv(&hsv_a, &mut out_a, &kernel, 5)?;
        split_log_enhance_hsv(&hsv_b, &mut out_b, &kernel, 5)?;
        split_log_enhance_hsv(&hsv_c, &mut out_c, &kernel, 5)?;

        for y in 0..size.height {
            for x in 0..2 {
                for ch in 0..3 {
                    assert_eq!(out_a.get_pixel(x, y, ch)?, out_b.get_pixel(x, y, ch)?);
                }
            }
            for x in 2..size.width {
                for ch in 0..3 {
                    assert_eq!(out_a.get_pixel(x, y, ch)?, out_c.get_pixel(x, y, ch)?);
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_split_enhance_leaves_h_left_and_v_right_unchanged() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 4,
            height: 4,
        };
        let mut data = Vec::new();
        for i in 0..size.width * size.height * 3 {
            data.push((i * 13 % 256) as u8);
        }
        let hsv = Image::<u8, 3>::new(size, data)?;

        let kernel = kernels::log_kernel_2d(5, 1.0)?;
        let mut out = Image::<u8, 3>::from_size_val(size, 0)?;
        split_log_enhance_hsv(&hsv, &mut out, &kernel, 5)?;

        for y in 0..size.height {
            for x in 0..size.width {
                if x < 2 {
                    // hue untouched on the left half
                    assert_eq!(out.get_pixel(x, y, 0)?, hsv.get_pixel(x, y, 0)?);
                } else {
                    // value untouched on the right half
                    assert_eq!(out.get_pixel(x, y, 2)?, hsv.get_pixel(x, y, 2)?);
                }
            }
        }

        Ok(())
    }

    #[test]
    fn test_enhance_split_high_pass_minimum_width() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 2,
        };
        #[rustfmt::skip]
        let image = Image::<u8, 3>::new(
            size,
            vec![
                10, 200, 60, 200, 10, 60,
                60, 10, 200, 200, 60, 10,
            ],
        )?;

        let mut result = Image::<u8, 3>::from_size_val(size, 0)?;
        enhance_split_high_pass(&image, &mut result, &LogParams::default())?;

        assert_eq!(result.size(), size);

        Ok(())
    }

    #[test]
    fn test_enhance_split_high_pass_rejects_narrow_and_empty() -> Result<(), ImageError> {
        let narrow = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 1,
                height: 4,
            },
            128,
        )?;
        let mut dst = narrow.clone();
        assert!(matches!(
            enhance_split_high_pass(&narrow, &mut dst, &LogParams::default()),
            Err(ImageError::InvalidImageShape(1, 4))
        ));

        let empty = Image::<u8, 3>::new(
            ImageSize {
                width: 0,
                height: 0,
            },
            vec![],
        )?;
        let mut dst = empty.clone();
        assert!(matches!(
            enhance_split_high_pass(&empty, &mut dst, &LogParams::default()),
            Err(ImageError::InvalidImageShape(0, 0))
        ));

        Ok(())
    }

    #[test]
    fn test_enhance_split_high_pass_rejects_bad_params() -> Result<(), ImageError> {
        let image = Image::<u8, 3>::from_size_val(
            ImageSize {
                width: 4,
                height: 4,
            },
            128,
        )?;
        let mut dst = image.clone();

        let params = LogParams {
            kernel_size: 4,
            sigma: 1.0,
        };
        assert!(matches!(
            enhance_split_high_pass(&image, &mut dst, &params),
            Err(ImageError::InvalidKernelSize(4))
        ));

        let params = LogParams {
            kernel_size: 5,
            sigma: 0.0,
        };
        assert!(matches!(
            enhance_split_high_pass(&image, &mut dst, &params),
            Err(ImageError::InvalidKernelSigma(_))
        ));

        Ok(())
    }
}
