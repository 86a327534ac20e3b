use crate::parallel;
use glare_image::{Image, ImageError};

/// Convert an RGB8 image to an HSV8 image.
///
/// The input image is assumed to have 3 channels in the order R, G, B.
///
/// # Arguments
///
/// * `src` - The input RGB image assumed to have 3 channels.
/// * `dst` - The output HSV image.
///
/// # Returns
///
/// The HSV image with the following channels:
///
/// * H: The hue channel in the range [0, 255] (0-360 degrees).
/// * S: The saturation channel in the range [0, 255].
/// * V: The value channel in the range [0, 255].
///
/// Precondition: the input and output images must have the same size.
///
/// # Example
///
/// ```
/// use glare_image::{Image, ImageSize};
/// use glare_imgproc::color::hsv_from_rgb_u8;
///
/// let image = Image::<u8, 3>::new(
///     ImageSize {
///         width: 4,
///         height: 5,
///     },
///     vec![0u8; 4 * 5 * 3],
/// )
/// .unwrap();
///
/// let mut hsv = Image::<u8, 3>::from_size_val(image.size(), 0).unwrap();
///
/// hsv_from_rgb_u8(&image, &mut hsv).unwrap();
///
/// assert_eq!(hsv.num_channels(), 3);
/// assert_eq!(hsv.size().width, 4);
/// assert_eq!(hsv.size().height, 5);
/// ```
pub fn hsv_from_rgb_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
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

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        // normalize the input to the range [0, 1]
        let r = src_pixel[0] as f32 / 255.0;
        let g = src_pixel[1] as f32 / 255.0;
        let b = src_pixel[2] as f32 / 255.0;

        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let delta = max - min;

        let h = if delta == 0.0 {
            0.0
        } else if max == r {
            60.0 * (((g - b) / delta) % 6.0)
        } else if max == g {
            60.0 * (((b - r) / delta) + 2.0)
        } else {
            60.0 * (((r - g) / delta) + 4.0)
        };

        // ensure h is in the range [0, 360), then scale to [0, 255]
        let h = if h < 0.0 { h + 360.0 } else { h };

        let s = if max == 0.0 { 0.0 } else { delta / max };

        dst_pixel[0] = (h / 360.0 * 255.0).round() as u8;
        dst_pixel[1] = (s * 255.0).round() as u8;
        dst_pixel[2] = (max * 255.0).round() as u8;
    });

    Ok(())
}

/// Convert an HSV8 image back to an RGB8 image.
///
/// Exact inverse of the mapping used by [`hsv_from_rgb_u8`], so a round
/// trip reproduces the input up to the u8 quantization of the three
/// channels.
///
/// # Arguments
///
/// * `src` - The input HSV image assumed to have 3 channels.
/// * `dst` - The output RGB image.
pub fn rgb_from_hsv_u8(src: &Image<u8, 3>, dst: &mut Image<u8, 3>) -> Result<(), ImageError> {
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

    parallel::par_iter_rows(src, dst, |src_pixel, dst_pixel| {
        let h = src_pixel[0] as f32 / 255.0 * 360.0;
        let s = src_pixel[1] as f32 / 255.0;
        let v = src_pixel[2] as f32 / 255.0;

        let chroma = v * s;
        let h_prime = h / 60.0;
        let x = chroma * (1.0 - (h_prime % 2.0 - 1.0).abs());

        let (r1, g1, b1) = match h_prime as usize {
            0 => (chroma, x, 0.0),
            1 => (x, chroma, 0.0),
            2 => (0.0, chroma, x),
            3 => (0.0, x, chroma),
            4 => (x, 0.0, chroma),
            _ => (chroma, 0.0, x),
        };

        let m = v - chroma;
        dst_pixel[0] = ((r1 + m) * 255.0).round() as u8;
        dst_pixel[1] = ((g1 + m) * 255.0).round() as u8;
        dst_pixel[2] = ((b1 + m) * 255.0).round() as u8;
    });

    Ok(())
}
