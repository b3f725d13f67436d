//! Text labels on annotated frames.
//!
//! Glyphs are rasterised with `ab_glyph` through `imageproc`. No font is
//! bundled: one is loaded from the configured path or from a short list of
//! common system locations, and labels are skipped when none is available.
use crate::image::{Rgb, RgbFrame};
use ab_glyph::{FontArc, PxScale};
use imageproc::drawing::{draw_text_mut, text_size};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// A parsed TrueType/OpenType font used for overlay labels.
#[derive(Clone)]
pub struct LabelFont {
    font: FontArc,
    path: PathBuf,
}

impl fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelFont").field("path", &self.path).finish()
    }
}

impl LabelFont {
    pub fn load(path: &Path) -> Result<Self, String> {
        let bytes =
            fs::read(path).map_err(|e| format!("Failed to read font {}: {e}", path.display()))?;
        let font = FontArc::try_from_vec(bytes)
            .map_err(|e| format!("Failed to parse font {}: {e}", path.display()))?;
        Ok(Self {
            font,
            path: path.to_path_buf(),
        })
    }

    /// The configured font if it loads, else the first system font found.
    pub fn discover(configured: Option<&Path>) -> Option<Self> {
        if let Some(path) = configured {
            match Self::load(path) {
                Ok(font) => return Some(font),
                Err(err) => log::warn!("{err}; trying system fonts"),
            }
        }
        let found = SYSTEM_FONTS
            .iter()
            .map(Path::new)
            .filter(|p| p.is_file())
            .find_map(|p| Self::load(p).ok());
        match &found {
            Some(font) => log::debug!("overlay font {}", font.path.display()),
            None => log::warn!("No overlay font found; text labels are disabled"),
        }
        found
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Draw `text` with its bottom-left corner at `(x, bottom)`.
pub fn draw_label(
    frame: &mut RgbFrame,
    text: &str,
    x: i32,
    bottom: i32,
    scale: f32,
    color: Rgb,
    font: &LabelFont,
) {
    let scale = PxScale::from(scale);
    let (_, h) = text_size(scale, &font.font, text);
    draw_text_mut(frame, image::Rgb(color), x, bottom - h as i32, scale, &font.font, text);
}
