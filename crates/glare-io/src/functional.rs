use std::path::{Path, PathBuf};

use glare_image::{Image, ImageSize};

use crate::error::IoError;

/// Reads an image from the given file path and converts it to RGB8.
///
/// The method reads any image format the `image` crate can sniff from the
/// file contents (JPEG, PNG and BMP among them).
///
/// # Arguments
///
/// * `file_path` - The path to a valid image file.
///
/// # Returns
///
/// An image with three channels (rgb8).
pub fn read_image_any_rgb8(file_path: impl AsRef<Path>) -> Result<Image<u8, 3>, IoError> {
    let file_path = file_path.as_ref();

    if !file_path.exists() {
        return Err(IoError::FileDoesNotExist(file_path.to_path_buf()));
    }

    let img = image::ImageReader::open(file_path)?
        .with_guessed_format()?
        .decode()?;

    let size = ImageSize {
        width: img.width() as usize,
        height: img.height() as usize,
    };

    Ok(Image::new(size, img.into_rgb8().into_raw())?)
}

/// Writes the given RGB8 image to the given file path as PNG.
///
/// # Arguments
///
/// * `file_path` - The path to the PNG image.
/// * `image` - The image containing the RGB8 data.
pub fn write_image_png_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    write_with_format(file_path.as_ref(), image, image::ImageFormat::Png)
}

/// Writes the given RGB8 image to the given file path as JPEG.
///
/// # Arguments
///
/// * `file_path` - The path to the JPEG image.
/// * `image` - The image containing the RGB8 data.
pub fn write_image_jpeg_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<(), IoError> {
    write_with_format(file_path.as_ref(), image, image::ImageFormat::Jpeg)
}

/// Writes the given RGB8 image choosing the encoder from the file extension.
///
/// `.png` selects the PNG encoder, `.jpg`/`.jpeg` the JPEG encoder. A path
/// without an extension gets `.jpg` appended and is encoded as JPEG; any
/// other extension is rejected.
///
/// # Returns
///
/// The path the image was written to, with the extension resolved.
pub fn write_image_auto_rgb8(
    file_path: impl AsRef<Path>,
    image: &Image<u8, 3>,
) -> Result<PathBuf, IoError> {
    let file_path = file_path.as_ref();

    match file_path.extension().map(|e| e.to_ascii_lowercase()) {
        Some(ext) if ext == "png" => {
            write_image_png_rgb8(file_path, image)?;
            Ok(file_path.to_path_buf())
        }
        Some(ext) if ext == "jpg" || ext == "jpeg" => {
            write_image_jpeg_rgb8(file_path, image)?;
            Ok(file_path.to_path_buf())
        }
        Some(_) => Err(IoError::InvalidFileExtension(file_path.to_path_buf())),
        None => {
            let file_path = file_path.with_extension("jpg");
            write_image_jpeg_rgb8(&file_path, image)?;
            Ok(file_path)
        }
    }
}

fn write_with_format(
    file_path: &Path,
    image: &Image<u8, 3>,
    format: image::ImageFormat,
) -> Result<(), IoError> {
    image::save_buffer_with_format(
        file_path,
        image.as_slice(),
        image.width() as u32,
        image.height() as u32,
        image::ExtendedColorType::Rgb8,
        format,
    )
    .map_err(|e| IoError::ImageEncodeError(e.to_string()))
}
