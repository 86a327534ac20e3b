use glare_image::{cast_and_scale, Image, ImageDtype, ImageError};
use rayon::prelude::*;

/// Map an out-of-range index back into [0, len) by mirroring across the
/// edges (half-sample symmetric extension). The reflection repeats, so
/// images smaller than the kernel are handled as well.
fn reflect_index(index: isize, len: usize) -> usize {
    let len = len as isize;
    let mut i = index;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= len {
            i = 2 * len - i - 1;
        } else {
            return i as usize;
        }
    }
}

/// Apply a dense 2D convolution to an image, independently per channel.
///
/// The output has the same shape as the input ("same" mode); samples
/// outside the image border are mirrored across the edge. The kernel is
/// applied as-is (cross-correlation); the kernels in [`super::kernels`]
/// are 180°-rotation symmetric, for which the two notions coincide.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, C).
/// * `dst` - The destination image with shape (H, W, C).
/// * `kernel` - The kernel weights, row-major, of length `kernel_size²`.
/// * `kernel_size` - The side length of the kernel. Must be a positive odd
///   integer.
pub fn conv2d<const C: usize>(
    src: &Image<f32, C>,
    dst: &mut Image<f32, C>,
    kernel: &[f32],
    kernel_size: usize,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    if src.cols() == 0 || src.rows() == 0 {
        return Err(ImageError::InvalidImageShape(src.cols(), src.rows()));
    }

    if kernel_size == 0 || kernel_size % 2 == 0 || kernel.len() != kernel_size * kernel_size {
        return Err(ImageError::InvalidKernelSize(kernel_size));
    }

    let rows = src.rows();
    let cols = src.cols();
    let half = (kernel_size / 2) as isize;
    let src_data = src.as_slice();

    dst.as_slice_mut()
        .par_chunks_exact_mut(cols * C)
        .enumerate()
        .for_each(|(r, dst_row)| {
            for c in 0..cols {
                let mut acc = [0.0f32; C];
                for ky in 0..kernel_size {
                    let sy = reflect_index(r as isize + ky as isize - half, rows);
                    let row_offset = sy * cols;
                    for kx in 0..kernel_size {
                        let sx = reflect_index(c as isize + kx as isize - half, cols);
                        let w = kernel[ky * kernel_size + kx];
                        let src_idx = (row_offset + sx) * C;
                        for (ch, acc_val) in acc.iter_mut().enumerate() {
                            *acc_val += src_data[src_idx + ch] * w;
                        }
                    }
                }

                let dst_idx = c * C;
                dst_row[dst_idx..dst_idx + C].copy_from_slice(&acc);
            }
        });

    Ok(())
}

/// Apply a dense 2D convolution to an 8-bit image.
///
/// Pixels are lifted to f32, convolved with [`conv2d`], and written back
/// rounded to nearest and clamped to [0, 255]. This is the only point
/// where clamping occurs.
///
/// # Arguments
///
/// * `src` - The source image with shape (H, W, 3).
/// * `dst` - The destination image with shape (H, W, 3).
/// * `kernel` - The kernel weights, row-major, of length `kernel_size²`.
/// * `kernel_size` - The side length of the kernel.
pub fn conv2d_u8(
    src: &Image<u8, 3>,
    dst: &mut Image<u8, 3>,
    kernel: &[f32],
    kernel_size: usize,
) -> Result<(), ImageError> {
    if src.size() != dst.size() {
        return Err(ImageError::InvalidImageSize(
            src.cols(),
            src.rows(),
            dst.cols(),
            dst.rows(),
        ));
    }

    let mut src_f32 = Image::<f32, 3>::from_size_val(src.size(), 0.0)?;
    cast_and_scale(src, &mut src_f32, 1.0)?;

    let mut dst_f32 = Image::<f32, 3>::from_size_val(src.size(), 0.0)?;
    conv2d(&src_f32, &mut dst_f32, kernel, kernel_size)?;

    dst.as_slice_mut()
        .iter_mut()
        .zip(dst_f32.as_slice().iter())
        .for_each(|(out, &val)| *out = u8::from_f32(val));

    Ok(())
}
