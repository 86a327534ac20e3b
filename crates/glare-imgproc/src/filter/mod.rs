//! Filter operations
//!
//! This module provides convolution kernels and dense 2D convolution.

/// Filter kernels
pub mod kernels;

/// Dense 2D convolution operations
mod convolution;
pub use convolution::*;
