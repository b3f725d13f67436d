//! Hough transforms over binary edge maps.
//!
//! - [`hough_lines`]: standard transform, infinite lines in polar form.
//! - [`hough_segments`]: progressive probabilistic transform, finite
//!   segments with integer endpoints.
//!
//! Both share the accumulator geometry of [`HoughSpace`]: angles in
//! `[0, π)` and signed distances centred in the accumulator row.

pub mod accumulator;
pub mod lines;
pub mod rng;
pub mod segments;

pub use accumulator::HoughSpace;
pub use lines::hough_lines;
pub use segments::hough_segments;
