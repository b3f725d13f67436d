//! Edge extraction: image gradients and Canny edge maps.
//!
//! - Gradient computation with separable Sobel kernels (aperture 3, 5 or 7)
//!   returning `gx`, `gy` and the L1 magnitude, plus a per-pixel orientation
//!   field.
//! - Canny: direction-aligned non-maximum suppression followed by hysteresis,
//!   producing a binary raster (0 / 255).
//!
//! Borders are handled by replicating edge pixels during convolution.

pub mod canny;
pub mod grad;

pub use canny::{canny, CannyParams};
pub use grad::{orientation_field, sobel_gradients, Grad};
