use crate::image::{GrayImage, ImageView};

/// Pixel-wise AND of two equally sized masks.
///
/// Rasters of different sizes are combined over their common top-left
/// region; the result takes the size of `a`.
pub fn bitwise_and(a: &GrayImage, b: &GrayImage) -> GrayImage {
    let mut out = GrayImage::new(a.width(), a.height());
    let w = a.width().min(b.width());
    let h = a.height().min(b.height());
    for y in 0..h {
        for x in 0..w {
            out.set(x, y, a.get(x, y) & b.get(x, y));
        }
    }
    out
}
