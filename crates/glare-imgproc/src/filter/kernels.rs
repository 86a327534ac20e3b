use glare_image::ImageError;

/// Create the fixed 3x3 low-pass (weighted average) kernel.
///
/// The weights [[1, 2, 1], [2, 4, 2], [1, 2, 1]] are normalized by their
/// sum, so the kernel preserves the mean intensity of the image.
pub fn low_pass_kernel_3x3() -> [[f32; 3]; 3] {
    [
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
        [2.0 / 16.0, 4.0 / 16.0, 2.0 / 16.0],
        [1.0 / 16.0, 2.0 / 16.0, 1.0 / 16.0],
    ]
}

/// Create a Laplacian-of-Gaussian kernel.
///
/// The kernel is returned row-major with length `size * size`. It is not
/// normalized: weights are negative near the center and the sum is close
/// to, but not exactly, zero.
///
/// For the cell at offset (x, y) from the center c = (size - 1) / 2:
///
/// ((x-c)² + (y-c)² - 2σ²) / σ⁴ · exp(-((x-c)² + (y-c)²) / (2σ²))
///
/// # Arguments
///
/// * `size` - The side length of the kernel. Must be a positive odd integer.
/// * `sigma` - The sigma of the underlying Gaussian. Must be positive.
pub fn log_kernel_2d(size: usize, sigma: f32) -> Result<Vec<f32>, ImageError> {
    if size == 0 || size % 2 == 0 {
        return Err(ImageError::InvalidKernelSize(size));
    }
    if sigma <= 0.0 || sigma.is_nan() {
        return Err(ImageError::InvalidKernelSigma(sigma));
    }

    let center = (size - 1) as f32 / 2.0;
    let sigma_sq = sigma * sigma;

    let mut kernel = Vec::with_capacity(size * size);
    for y in 0..size {
        for x in 0..size {
            let dx = x as f32 - center;
            let dy = y as f32 - center;
            let r_sq = dx * dx + dy * dy;
            let value =
                (r_sq - 2.0 * sigma_sq) / (sigma_sq * sigma_sq) * (-r_sq / (2.0 * sigma_sq)).exp();
            kernel.push(value);
        }
    }

    Ok(kernel)
}
