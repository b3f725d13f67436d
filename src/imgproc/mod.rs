//! Raster operations shared by the detection stages.
//!
//! Drawing, thresholding and text come from `imageproc`; this module adapts
//! them to the crate's rasters and conventions (thick lines with round caps,
//! OpenCV-style circle thickness, Otsu on demand).

pub mod bitwise;
pub mod draw;
pub mod text;
pub mod threshold;

pub use bitwise::bitwise_and;
pub use draw::{draw_circle, draw_line};
pub use text::{draw_label, LabelFont};
pub use threshold::{threshold, ThresholdKind};
