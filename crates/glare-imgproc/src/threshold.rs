use num_traits::Zero;
use std::cmp::PartialOrd;

use glare_image::{Image, ImageError};

use crate::parallel;

/// Apply a binary threshold to an image.
///
/// Every sample strictly greater than `threshold` becomes `max_value`,
/// every other sample becomes zero.
///
/// # Arguments
///
/// * `src` - The input image of an arbitrary number of channels and type.
/// * `dst` - The output image of an arbitrary number of channels and type.
/// * `threshold` - The threshold value. Must be the same type as the image.
/// * `max_value` - The value to use when the input value is greater than the threshold.
///
/// # Examples
///
/// ```
/// use glare_image::{Image, ImageSize};
/// use glare_imgproc::threshold::threshold_binary;
///
/// let data = vec![100u8, 200, 50, 150, 200, 250];
/// let image = Image::<_, 1>::new(ImageSize { width: 2, height: 3 }, data).unwrap();
///
/// let mut thresholded = Image::<_, 1>::from_size_val(image.size(), 0).unwrap();
///
/// threshold_binary(&image, &mut thresholded, 100, 255).unwrap();
/// assert_eq!(thresholded.as_slice(), &[0, 255, 0, 255, 255, 255]);
/// ```
pub fn threshold_binary<T, const C: usize>(
    src: &Image<T, C>,
    dst: &mut Image<T, C>,
    threshold: T,
    max_value: T,
) -> Result<(), ImageError>
where
    T: Copy + Send + Sync + PartialOrd + Zero,
{
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

    parallel::par_iter_rows_val(src, dst, |src_pixel, dst_pixel| {
        *dst_pixel = if *src_pixel > threshold {
            max_value
        } else {
            T::zero()
        };
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glare_image::ImageSize;

    #[test]
    fn test_threshold_binary_strictly_greater() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 3,
            height: 1,
        };
        let image = Image::<u8, 1>::new(size, vec![199, 200, 201])?;
        let mut mask = Image::<u8, 1>::from_size_val(size, 0)?;

        threshold_binary(&image, &mut mask, 200, 255)?;
        assert_eq!(mask.as_slice(), &[0, 0, 255]);

        Ok(())
    }

    #[test]
    fn test_threshold_binary_f32() -> Result<(), ImageError> {
        let size = ImageSize {
            width: 2,
            height: 1,
        };
        let image = Image::<f32, 1>::new(size, vec![0.25, 0.75])?;
        let mut mask = Image::<f32, 1>::from_size_val(size, 0.0)?;

        threshold_binary(&image, &mut mask, 0.5, 1.0)?;
        assert_eq!(mask.as_slice(), &[0.0, 1.0]);

        Ok(())
    }
}
