/// An error type for the image module.
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    /// Error when the data length does not match the image size.
    #[error("Data length ({0}) does not match the image size ({1})")]
    InvalidChannelShape(usize, usize),

    /// Error when the image sizes of an operation do not match.
    #[error("Image size mismatch: source is {0}x{1}, destination is {2}x{3}")]
    InvalidImageSize(usize, usize, usize, usize),

    /// Error when an operation receives an image whose shape it cannot process.
    #[error("Unsupported image shape {0}x{1} for this operation")]
    InvalidImageShape(usize, usize),

    /// Error when a kernel size is not a positive odd integer.
    #[error("Kernel size must be a positive odd integer, got {0}")]
    InvalidKernelSize(usize),

    /// Error when a kernel sigma is not strictly positive.
    #[error("Kernel sigma must be strictly positive, got {0}")]
    InvalidKernelSigma(f32),

    /// Error when a channel index is out of bounds.
    #[error("Channel index {0} is out of bounds for an image with {1} channels")]
    ChannelIndexOutOfBounds(usize, usize),

    /// Error when a pixel coordinate is out of bounds.
    #[error("Pixel coordinate ({0}, {1}) is out of bounds for an image of size {2}x{3}")]
    PixelIndexOutOfBounds(usize, usize, usize, usize),

    /// Error when casting pixel data to another type fails.
    #[error("Failed to cast pixel data to {0}")]
    CastError(String),
}
