#![deny(missing_docs)]
//! Selective image filtering: brightness-gated low-pass blur and
//! split-region Laplacian-of-Gaussian high-pass enhancement.

#[doc(inline)]
pub use glare_image as image;

#[doc(inline)]
pub use glare_imgproc as imgproc;

#[doc(inline)]
pub use glare_io as io;
