//! Filter operations
//!
//! This module provides 3x3 convolution filters for 8-bit images.

/// Filter kernels
pub mod kernels;

/// Per-pixel and per-row convolution
mod convolution;
pub use convolution::*;

/// Filter errors
mod error;
pub use error::FilterError;

/// Filter operations
mod ops;
pub use ops::*;
