#![deny(missing_docs)]
//! Image types and traits for the glare filtering crates

/// image representation for the filtering pipelines.
pub mod image;

/// Error types for the image module.
pub mod error;

/// Operations on image pixel data.
pub mod ops;

pub use crate::error::ImageError;
pub use crate::image::{Image, ImageDtype, ImageSize};
pub use crate::ops::cast_and_scale;
