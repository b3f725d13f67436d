//! Annotated-frame sinks and the per-frame stage dump.
use crate::image::io::{ensure_parent_dir, frame_to_rgb_image, save_gray_png, save_rgb_png};
use crate::image::RgbFrame;
use crate::pipeline::StageImages;
use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, DynamicImage, Frame};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

pub const DEFAULT_FPS: f64 = 20.0;

pub trait FrameSink {
    fn write_frame(&mut self, frame: &RgbFrame) -> Result<(), String>;

    /// Flush and close the output.
    fn finish(self: Box<Self>) -> Result<(), String>;
}

/// Numbered PNG files in a directory.
pub struct PngSequenceSink {
    dir: PathBuf,
    written: usize,
}

impl PngSequenceSink {
    pub fn create(dir: &Path) -> Result<Self, String> {
        fs::create_dir_all(dir).map_err(|e| format!("Failed to create {}: {e}", dir.display()))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            written: 0,
        })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.dir.join(format!("frame_{index:05}.png"))
    }
}

impl FrameSink for PngSequenceSink {
    fn write_frame(&mut self, frame: &RgbFrame) -> Result<(), String> {
        save_rgb_png(frame, &self.frame_path(self.written))?;
        self.written += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), String> {
        log::info!("Wrote {} frames to {}", self.written, self.dir.display());
        Ok(())
    }
}

/// Looping animated GIF.
pub struct GifSink {
    path: PathBuf,
    encoder: GifEncoder<BufWriter<File>>,
    delay: Delay,
    written: usize,
}

impl GifSink {
    pub fn create(path: &Path, fps: f64) -> Result<Self, String> {
        ensure_parent_dir(path)?;
        let file = File::create(path).map_err(|e| format!("Failed to create {}: {e}", path.display()))?;
        let mut encoder = GifEncoder::new(BufWriter::new(file));
        encoder
            .set_repeat(Repeat::Infinite)
            .map_err(|e| format!("Failed to configure {}: {e}", path.display()))?;
        let fps = if fps > 0.0 { fps } else { DEFAULT_FPS };
        let delay = Delay::from_numer_denom_ms((1_000_000.0 / fps).round() as u32, 1000);
        Ok(Self {
            path: path.to_path_buf(),
            encoder,
            delay,
            written: 0,
        })
    }
}

impl FrameSink for GifSink {
    fn write_frame(&mut self, frame: &RgbFrame) -> Result<(), String> {
        let rgba = DynamicImage::ImageRgb8(frame_to_rgb_image(frame)?).into_rgba8();
        self.encoder
            .encode_frame(Frame::from_parts(rgba, 0, 0, self.delay))
            .map_err(|e| format!("Failed to write frame to {}: {e}", self.path.display()))?;
        self.written += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), String> {
        let GifSink {
            path,
            encoder,
            written,
            ..
        } = *self;
        // The trailer is written when the encoder is dropped.
        drop(encoder);
        log::info!("Wrote {written} frames to {}", path.display());
        Ok(())
    }
}

const VIDEO_EXTENSIONS: &[&str] = &["avi", "mp4", "mkv", "mov"];

#[cfg(feature = "opencv")]
fn create_video_sink(path: &Path, fps: f64) -> Result<Box<dyn FrameSink>, String> {
    Ok(Box::new(super::capture::VideoFileSink::create(path, fps)?))
}

#[cfg(not(feature = "opencv"))]
fn create_video_sink(path: &Path, _fps: f64) -> Result<Box<dyn FrameSink>, String> {
    Err(format!(
        "Failed to create {}: video files need the `opencv` feature",
        path.display()
    ))
}

/// `.gif` paths get an animated GIF, video containers (`.avi`, `.mp4`, ...)
/// a `VideoWriter` file; anything else a PNG directory.
pub fn create_sink(path: &Path, fps: f64) -> Result<Box<dyn FrameSink>, String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    if ext == "gif" {
        Ok(Box::new(GifSink::create(path, fps)?))
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        create_video_sink(path, fps)
    } else {
        Ok(Box::new(PngSequenceSink::create(path)?))
    }
}

/// Write every stage image of one frame into `dir/frame_NNNNN/`.
pub fn write_stage_images(dir: &Path, frame_index: usize, stages: &StageImages) -> Result<(), String> {
    let frame_dir = dir.join(format!("frame_{frame_index:05}"));
    for (name, image) in stages.iter() {
        save_gray_png(image, &frame_dir.join(format!("{name}.png")))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::video::source::{open_source, FrameSource};

    fn scratch(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("lane_detector_sink_{}_{name}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn png_sequence_is_readable_as_source() {
        let dir = scratch("png");
        let mut sink = create_sink(&dir, DEFAULT_FPS).unwrap();
        sink.write_frame(&RgbFrame::filled(6, 4, [10, 20, 30])).unwrap();
        sink.write_frame(&RgbFrame::filled(6, 4, [40, 50, 60])).unwrap();
        sink.finish().unwrap();

        let mut source = open_source(dir.to_str().unwrap()).unwrap();
        assert_eq!(source.next_frame().unwrap().get(0, 0), [10, 20, 30]);
        assert_eq!(source.next_frame().unwrap().get(0, 0), [40, 50, 60]);
        assert!(source.next_frame().is_none());
        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(not(feature = "opencv"))]
    #[test]
    fn video_container_needs_opencv_feature() {
        let err = create_sink(Path::new("out/clip.avi"), DEFAULT_FPS)
            .err()
            .expect("no video backend");
        assert!(err.contains("clip.avi") && err.contains("opencv"), "{err}");
    }

    #[test]
    fn gif_output_decodes_to_same_frame_count() {
        let dir = scratch("gif");
        let path = dir.join("out.gif");
        let mut sink = create_sink(&path, 10.0).unwrap();
        for v in [0u8, 255, 0] {
            sink.write_frame(&RgbFrame::filled(8, 8, [v, v, v])).unwrap();
        }
        sink.finish().unwrap();

        let mut source = open_source(path.to_str().unwrap()).unwrap();
        let mut frames = 0;
        while let Some(frame) = source.next_frame() {
            assert_eq!(frame.get(0, 0), [if frames == 1 { 255 } else { 0 }; 3]);
            frames += 1;
        }
        assert_eq!(frames, 3);
        let _ = fs::remove_dir_all(&dir);
    }
}
