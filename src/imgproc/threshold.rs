//! Global thresholding with optional Otsu selection, on top of
//! `imageproc::contrast`.
use crate::image::io::{gray_from_luma_image, gray_to_luma_image};
use crate::image::GrayImage;
use imageproc::contrast::{otsu_level, threshold as threshold_luma, ThresholdType};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdKind {
    /// `src > thresh ? 255 : 0`
    Binary,
    /// `src > thresh ? 0 : 255`
    BinaryInv,
}

impl From<ThresholdKind> for ThresholdType {
    fn from(kind: ThresholdKind) -> Self {
        match kind {
            ThresholdKind::Binary => ThresholdType::Binary,
            ThresholdKind::BinaryInv => ThresholdType::BinaryInverted,
        }
    }
}

/// Apply a global threshold. With `otsu` set, `thresh` is ignored and the
/// Otsu level is used instead. Returns the image and the threshold applied.
pub fn threshold(src: &GrayImage, thresh: u8, kind: ThresholdKind, otsu: bool) -> (GrayImage, u8) {
    let luma = gray_to_luma_image(src);
    let level = if otsu { otsu_level(&luma) } else { thresh };
    let out = threshold_luma(&luma, level, kind.into());
    (gray_from_luma_image(&out), level)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binary_inverse_flips_polarity() {
        let mut img = GrayImage::new(4, 1);
        img.set(1, 0, 200);
        img.set(2, 0, 150);
        let (out, t) = threshold(&img, 150, ThresholdKind::BinaryInv, false);
        assert_eq!(t, 150);
        assert_eq!(out.data(), &[255, 0, 255, 255]);
        let (out, _) = threshold(&img, 150, ThresholdKind::Binary, false);
        assert_eq!(out.data(), &[0, 255, 0, 0]);
    }

    #[test]
    fn otsu_splits_bimodal_histogram() {
        let mut img = GrayImage::filled(10, 10, 20);
        for x in 0..5 {
            for y in 0..10 {
                img.set(x, y, 220);
            }
        }
        let (out, t) = threshold(&img, 0, ThresholdKind::Binary, true);
        assert!((20..220).contains(&t), "threshold {t}");
        assert_eq!(out.count_nonzero(), 50);
        let (inv, _) = threshold(&img, 0, ThresholdKind::BinaryInv, true);
        assert_eq!(inv.get(0, 0), 0);
        assert_eq!(inv.get(9, 0), 255);
    }
}
