//! I/O helpers for frames, masks and JSON.
//!
//! - `load_rgb_image`: read a PNG/JPEG/etc. into an owned RGB frame.
//! - `save_rgb_png` / `save_gray_png`: write frames and binary masks to disk.
//! - `gray_to_luma_image` / `gray_from_luma_image`: bridge masks to `imageproc`.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{GrayImage, RgbFrame};
use image::{DynamicImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Convert a decoded `image` buffer into an owned frame.
pub fn frame_from_rgb_image(img: &RgbImage) -> Result<RgbFrame, String> {
    RgbFrame::from_interleaved(img.width() as usize, img.height() as usize, img.as_raw())
        .ok_or_else(|| "Decoded image has inconsistent dimensions".to_string())
}

/// Convert an owned frame into an `image` buffer for encoding.
pub fn frame_to_rgb_image(frame: &RgbFrame) -> Result<RgbImage, String> {
    use super::ImageView;
    RgbImage::from_raw(
        frame.width() as u32,
        frame.height() as u32,
        frame.to_interleaved(),
    )
    .ok_or_else(|| "Failed to create RGB image buffer".to_string())
}

/// Load an image from disk and convert to 8-bit RGB.
pub fn load_rgb_image(path: &Path) -> Result<RgbFrame, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgb8();
    frame_from_rgb_image(&img)
}

/// Save an RGB frame to a PNG (or any format implied by the extension).
pub fn save_rgb_png(frame: &RgbFrame, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    frame_to_rgb_image(frame)?
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Copy a mask into an `image` buffer, e.g. for `imageproc` operations.
pub fn gray_to_luma_image(buffer: &GrayImage) -> image::GrayImage {
    use super::ImageView;
    let (w, h) = (buffer.width() as u32, buffer.height() as u32);
    image::GrayImage::from_raw(w, h, buffer.data().to_vec())
        .unwrap_or_else(|| image::GrayImage::new(w, h))
}

/// Copy an `image` grayscale buffer back into an owned mask.
pub fn gray_from_luma_image(img: &image::GrayImage) -> GrayImage {
    GrayImage::from_raw(img.width() as usize, img.height() as usize, img.as_raw().clone())
        .unwrap_or_default()
}

/// Save an 8-bit grayscale buffer to a PNG.
pub fn save_gray_png(buffer: &GrayImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    DynamicImage::ImageLuma8(gray_to_luma_image(buffer))
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

pub fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
