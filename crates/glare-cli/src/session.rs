use std::path::{Path, PathBuf};

use glare::image::{Image, ImageError};
use glare::imgproc::pipeline::{self, LogParams};
use glare::io::functional as F;
use glare::io::IoError;

/// An error type for the session layer.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// A filter was requested before an image was loaded.
    #[error("No image loaded; load an input image first")]
    NoImageLoaded,

    /// A save was requested before the filter had produced a result.
    #[error("No {0} result to save; run the filter first")]
    NoResult(&'static str),

    /// An error from the numeric core.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// An error from the file layer.
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Holds the loaded image and the last result of each pipeline.
///
/// Results are kept until they are overwritten by a re-run; a failed
/// operation leaves the previous state untouched.
#[derive(Default)]
pub struct Session {
    image: Option<Image<u8, 3>>,
    low_pass: Option<Image<u8, 3>>,
    high_pass: Option<Image<u8, 3>>,
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the input image from a file.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), AppError> {
        self.image = Some(F::read_image_any_rgb8(path)?);
        Ok(())
    }

    /// The currently loaded image, if any.
    pub fn image(&self) -> Option<&Image<u8, 3>> {
        self.image.as_ref()
    }

    /// Run the brightness-gated blur, storing and returning the result.
    pub fn run_low_pass(&mut self, threshold: u8) -> Result<&Image<u8, 3>, AppError> {
        let image = self.image.as_ref().ok_or(AppError::NoImageLoaded)?;

        let mut result = Image::from_size_val(image.size(), 0)?;
        pipeline::blur_bright_pixels(image, &mut result, threshold)?;

        Ok(self.low_pass.insert(result))
    }

    /// Run the split high-pass enhancement, storing and returning the result.
    pub fn run_high_pass(&mut self, params: &LogParams) -> Result<&Image<u8, 3>, AppError> {
        let image = self.image.as_ref().ok_or(AppError::NoImageLoaded)?;

        let mut result = Image::from_size_val(image.size(), 0)?;
        pipeline::enhance_split_high_pass(image, &mut result, params)?;

        Ok(self.high_pass.insert(result))
    }

    /// Save the last blur result, returning the resolved output path.
    pub fn save_low_pass(&self, path: impl AsRef<Path>) -> Result<PathBuf, AppError> {
        let image = self.low_pass.as_ref().ok_or(AppError::NoResult("low-pass"))?;
        Ok(F::write_image_auto_rgb8(path, image)?)
    }

    /// Save the last enhancement result, returning the resolved output path.
    pub fn save_high_pass(&self, path: impl AsRef<Path>) -> Result<PathBuf, AppError> {
        let image = self
            .high_pass
            .as_ref()
            .ok_or(AppError::NoResult("high-pass"))?;
        Ok(F::write_image_auto_rgb8(path, image)?)
    }
}
