#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

/// color transformations module.
pub mod color;

/// image filtering module.
pub mod filter;

/// module containing parallelization utilities.
pub mod parallel;

/// the two fixed filtering pipelines.
pub mod pipeline;

/// operations to threshold images.
pub mod threshold;
