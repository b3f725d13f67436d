//! Owned RGB frame, the unit the pipeline consumes and annotates.
use super::traits::{ImageView, ImageViewMut};
use super::GrayImage;

/// 8-bit RGB color triplet.
pub type Rgb = [u8; 3];

/// Owned RGB raster in row-major order.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RgbFrame {
    width: usize,
    height: usize,
    data: Vec<Rgb>,
}

impl RgbFrame {
    pub fn filled(width: usize, height: usize, color: Rgb) -> Self {
        Self {
            width,
            height,
            data: vec![color; width * height],
        }
    }

    /// Wrap interleaved RGB bytes. Returns `None` when the length does not match.
    pub fn from_interleaved(width: usize, height: usize, bytes: &[u8]) -> Option<Self> {
        if bytes.len() != width * height * 3 {
            return None;
        }
        let data = bytes
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect();
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Replicate a grayscale raster into the three channels.
    pub fn from_gray(gray: &GrayImage) -> Self {
        Self {
            width: gray.width(),
            height: gray.height(),
            data: gray.data().iter().map(|&v| [v, v, v]).collect(),
        }
    }

    pub fn to_interleaved(&self) -> Vec<u8> {
        self.data.iter().flatten().copied().collect()
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.data[y * self.width + x]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, color: Rgb) {
        self.data[y * self.width + x] = color;
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Luma conversion `Y = 0.299 R + 0.587 G + 0.114 B` in fixed point.
    pub fn to_gray(&self) -> GrayImage {
        let data = self
            .data
            .iter()
            .map(|&[r, g, b]| {
                let y = 4899 * r as u32 + 9617 * g as u32 + 1868 * b as u32;
                ((y + (1 << 13)) >> 14) as u8
            })
            .collect();
        GrayImage::from_raw(self.width, self.height, data).unwrap_or_default()
    }
}

impl ImageView for RgbFrame {
    type Pixel = Rgb;

    #[inline]
    fn width(&self) -> usize {
        self.width
    }
    #[inline]
    fn height(&self) -> usize {
        self.height
    }
    #[inline]
    fn stride(&self) -> usize {
        self.width
    }
    #[inline]
    fn row(&self, y: usize) -> &[Rgb] {
        let start = y * self.width;
        &self.data[start..start + self.width]
    }
    #[inline]
    fn as_slice(&self) -> Option<&[Rgb]> {
        Some(&self.data)
    }
}

impl ImageViewMut for RgbFrame {
    #[inline]
    fn row_mut(&mut self, y: usize) -> &mut [Rgb] {
        let start = y * self.width;
        &mut self.data[start..start + self.width]
    }

    #[inline]
    fn as_mut_slice(&mut self) -> Option<&mut [Rgb]> {
        Some(&mut self.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gray_conversion_uses_bt601_weights() {
        let frame = RgbFrame::from_interleaved(3, 1, &[255, 0, 0, 0, 255, 0, 0, 0, 255]).unwrap();
        let gray = frame.to_gray();
        assert_eq!(gray.data(), &[76, 150, 29]);
    }

    #[test]
    fn interleaved_roundtrip_keeps_layout() {
        let bytes: Vec<u8> = (0..24).collect();
        let frame = RgbFrame::from_interleaved(4, 2, &bytes).unwrap();
        assert_eq!(frame.get(1, 1), [15, 16, 17]);
        assert_eq!(frame.to_interleaved(), bytes);
    }
}
