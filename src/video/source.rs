//! Frame sources: video files and capture devices (with the `opencv`
//! feature), image sequences, animated GIFs and single images.
//!
//! A source yields frames in capture order until it is exhausted. A frame
//! that cannot be decoded ends the stream, the same way an empty capture
//! does.
use crate::image::io::{frame_from_rgb_image, load_rgb_image};
use crate::image::RgbFrame;
use image::codecs::gif::GifDecoder;
use image::{AnimationDecoder, DynamicImage, Frames};
use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "tif", "tiff", "gif", "ppm", "pgm"];

pub trait FrameSource {
    /// Next frame, or `None` once the stream has ended.
    fn next_frame(&mut self) -> Option<RgbFrame>;

    fn describe(&self) -> String;
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Every image file of a directory, in file-name order.
pub struct ImageSequenceSource {
    dir: PathBuf,
    files: Vec<PathBuf>,
    next: usize,
}

impl ImageSequenceSource {
    pub fn open(dir: &Path) -> Result<Self, String> {
        let entries = fs::read_dir(dir)
            .map_err(|e| format!("Failed to read directory {}: {e}", dir.display()))?;
        let mut files: Vec<PathBuf> = entries
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_file() && has_image_extension(p))
            .collect();
        if files.is_empty() {
            return Err(format!("No image files in {}", dir.display()));
        }
        files.sort();
        log::info!("Image sequence {}: {} frames", dir.display(), files.len());
        Ok(Self {
            dir: dir.to_path_buf(),
            files,
            next: 0,
        })
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl FrameSource for ImageSequenceSource {
    fn next_frame(&mut self) -> Option<RgbFrame> {
        let path = self.files.get(self.next)?;
        self.next += 1;
        match load_rgb_image(path) {
            Ok(frame) => Some(frame),
            Err(err) => {
                log::warn!("{err}; ending stream");
                None
            }
        }
    }

    fn describe(&self) -> String {
        format!("image sequence {}", self.dir.display())
    }
}

/// Frames of an animated GIF.
pub struct GifSource {
    path: PathBuf,
    frames: Frames<'static>,
}

impl GifSource {
    pub fn open(path: &Path) -> Result<Self, String> {
        let file = File::open(path).map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
        let decoder = GifDecoder::new(BufReader::new(file))
            .map_err(|e| format!("Failed to decode GIF {}: {e}", path.display()))?;
        Ok(Self {
            path: path.to_path_buf(),
            frames: decoder.into_frames(),
        })
    }
}

impl FrameSource for GifSource {
    fn next_frame(&mut self) -> Option<RgbFrame> {
        match self.frames.next()? {
            Ok(frame) => {
                let rgb = DynamicImage::ImageRgba8(frame.into_buffer()).into_rgb8();
                match frame_from_rgb_image(&rgb) {
                    Ok(f) => Some(f),
                    Err(err) => {
                        log::warn!("{err}; ending stream");
                        None
                    }
                }
            }
            Err(e) => {
                log::warn!("Failed to decode frame of {}: {e}; ending stream", self.path.display());
                None
            }
        }
    }

    fn describe(&self) -> String {
        format!("GIF {}", self.path.display())
    }
}

/// A still image treated as a one-frame stream.
pub struct SingleImageSource {
    path: PathBuf,
    frame: Option<RgbFrame>,
}

impl SingleImageSource {
    pub fn open(path: &Path) -> Result<Self, String> {
        let frame = load_rgb_image(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            frame: Some(frame),
        })
    }
}

impl FrameSource for SingleImageSource {
    fn next_frame(&mut self) -> Option<RgbFrame> {
        self.frame.take()
    }

    fn describe(&self) -> String {
        format!("image {}", self.path.display())
    }
}

fn has_gif_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("gif"))
}

fn open_path(path: &Path) -> Result<Box<dyn FrameSource>, String> {
    if path.is_dir() {
        return Ok(Box::new(ImageSequenceSource::open(path)?));
    }
    if path.is_file() && has_gif_extension(path) {
        return Ok(Box::new(GifSource::open(path)?));
    }
    if path.is_file() && has_image_extension(path) {
        return Ok(Box::new(SingleImageSource::open(path)?));
    }
    open_video(path)
}

#[cfg(feature = "opencv")]
fn open_video(path: &Path) -> Result<Box<dyn FrameSource>, String> {
    Ok(Box::new(super::capture::CaptureSource::open_file(path)?))
}

#[cfg(not(feature = "opencv"))]
fn open_video(path: &Path) -> Result<Box<dyn FrameSource>, String> {
    if !path.exists() {
        return Err(format!("Failed to open {}: no such file or directory", path.display()));
    }
    Err(format!(
        "Failed to open {}: video files need the `opencv` feature",
        path.display()
    ))
}

#[cfg(feature = "opencv")]
fn open_device(index: u32) -> Result<Box<dyn FrameSource>, String> {
    Ok(Box::new(super::capture::CaptureSource::open_device(index)?))
}

#[cfg(not(feature = "opencv"))]
fn open_device(index: u32) -> Result<Box<dyn FrameSource>, String> {
    Err(format!(
        "Failed to open device {index}: capture devices need the `opencv` feature"
    ))
}

/// Open `spec` as a path; on failure retry it as a capture device index.
///
/// Only the second failure is returned. An input that is not an integer
/// reports the path failure.
pub fn open_source(spec: &str) -> Result<Box<dyn FrameSource>, String> {
    let path_err = match open_path(Path::new(spec)) {
        Ok(source) => {
            log::info!("Opened {}", source.describe());
            return Ok(source);
        }
        Err(err) => err,
    };
    match spec.trim().parse::<u32>() {
        Ok(index) => {
            log::warn!("{path_err}; retrying as device {index}");
            open_device(index)
        }
        Err(_) => Err(path_err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::io::save_rgb_png;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lane_detector_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn numeric_spec_is_retried_as_device() {
        // No file called "97" exists, so the device retry decides the outcome.
        match open_source("97") {
            Ok(source) => assert!(source.describe().contains("device 97")),
            Err(err) => {
                assert!(err.starts_with("Failed to open device 97"), "{err}");
                assert!(!err.contains("no such file"), "{err}");
            }
        }
    }

    #[cfg(not(feature = "opencv"))]
    #[test]
    fn devices_and_videos_need_opencv_feature() {
        let err = open_source("7").err().expect("no device backend");
        assert!(err.contains("device 7") && err.contains("opencv"), "{err}");

        let dir = scratch_dir("container");
        let clip = dir.join("clip.avi");
        fs::write(&clip, b"RIFF").unwrap();
        let err = open_source(clip.to_str().unwrap()).err().expect("no video backend");
        assert!(err.contains("clip.avi") && err.contains("opencv"), "{err}");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn missing_path_reports_path_failure() {
        let err = open_source("/definitely/not/here.avi").err().expect("missing file");
        assert!(err.contains("/definitely/not/here.avi"), "{err}");
        assert!(!err.contains("device"), "{err}");
    }

    #[test]
    fn directory_is_read_in_name_order() {
        let dir = scratch_dir("sequence");
        save_rgb_png(&RgbFrame::filled(4, 3, [200, 0, 0]), &dir.join("b.png")).unwrap();
        save_rgb_png(&RgbFrame::filled(4, 3, [0, 200, 0]), &dir.join("a.png")).unwrap();
        fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let mut source = open_source(dir.to_str().unwrap()).unwrap();
        assert_eq!(source.next_frame().unwrap().get(0, 0), [0, 200, 0]);
        assert_eq!(source.next_frame().unwrap().get(0, 0), [200, 0, 0]);
        assert!(source.next_frame().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn single_image_yields_one_frame() {
        let dir = scratch_dir("single");
        let path = dir.join("still.png");
        save_rgb_png(&RgbFrame::filled(5, 5, [1, 2, 3]), &path).unwrap();
        let mut source = open_source(path.to_str().unwrap()).unwrap();
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn undecodable_sequence_frame_ends_stream() {
        let dir = scratch_dir("broken");
        save_rgb_png(&RgbFrame::filled(4, 4, [9, 9, 9]), &dir.join("0.png")).unwrap();
        fs::write(dir.join("1.png"), b"not a png").unwrap();
        save_rgb_png(&RgbFrame::filled(4, 4, [9, 9, 9]), &dir.join("2.png")).unwrap();
        let mut source = ImageSequenceSource::open(&dir).unwrap();
        assert_eq!(source.len(), 3);
        assert!(source.next_frame().is_some());
        assert!(source.next_frame().is_none());
        let _ = fs::remove_dir_all(&dir);
    }
}
