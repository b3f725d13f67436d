//! Video containers and camera devices through OpenCV's `videoio`.
//!
//! Frames cross the boundary as packed 8-bit BGR `Mat`s; channel order is
//! swapped on the way in and out.
use super::sink::FrameSink;
use super::source::FrameSource;
use crate::image::{ImageView, RgbFrame};
use opencv::core::{Mat, Scalar, Size, CV_8UC3};
use opencv::prelude::*;
use opencv::videoio::{self, VideoCapture, VideoWriter};
use std::path::{Path, PathBuf};

fn path_str(path: &Path) -> Result<&str, String> {
    path.to_str()
        .ok_or_else(|| format!("Failed to open {}: path is not valid UTF-8", path.display()))
}

/// Frames read from a video file, stream URL or capture device.
pub struct CaptureSource {
    cap: VideoCapture,
    label: String,
    frames_read: usize,
}

impl CaptureSource {
    pub fn open_file(path: &Path) -> Result<Self, String> {
        let cap = VideoCapture::from_file(path_str(path)?, videoio::CAP_ANY)
            .map_err(|e| format!("Failed to open {}: {e}", path.display()))?;
        Self::opened(cap, path.display().to_string())
    }

    pub fn open_device(index: u32) -> Result<Self, String> {
        let cap = VideoCapture::new(index as i32, videoio::CAP_ANY)
            .map_err(|e| format!("Failed to open device {index}: {e}"))?;
        Self::opened(cap, format!("device {index}"))
    }

    fn opened(cap: VideoCapture, label: String) -> Result<Self, String> {
        let is_open = cap
            .is_opened()
            .map_err(|e| format!("Failed to open {label}: {e}"))?;
        if !is_open {
            return Err(format!("Failed to open {label}: capture did not open"));
        }
        let width = VideoCaptureTraitConst::get(&cap, videoio::CAP_PROP_FRAME_WIDTH).unwrap_or(0.0);
        let height = VideoCaptureTraitConst::get(&cap, videoio::CAP_PROP_FRAME_HEIGHT).unwrap_or(0.0);
        let fps = VideoCaptureTraitConst::get(&cap, videoio::CAP_PROP_FPS).unwrap_or(0.0);
        log::info!("Capture {label}: {width}x{height} @ {fps:.1} fps");
        Ok(Self {
            cap,
            label,
            frames_read: 0,
        })
    }

    /// Frame rate reported by the backend, when it reports one.
    pub fn fps(&self) -> Option<f64> {
        VideoCaptureTraitConst::get(&self.cap, videoio::CAP_PROP_FPS)
            .ok()
            .filter(|fps| *fps > 0.0)
    }
}

impl FrameSource for CaptureSource {
    fn next_frame(&mut self) -> Option<RgbFrame> {
        let mut bgr = Mat::default();
        match VideoCaptureTrait::read(&mut self.cap, &mut bgr) {
            Ok(true) if !bgr.empty() => {}
            Ok(_) => {
                log::info!("{}: end of stream after {} frames", self.label, self.frames_read);
                return None;
            }
            Err(e) => {
                log::warn!("Failed to read frame from {}: {e}; ending stream", self.label);
                return None;
            }
        }
        match frame_from_bgr_mat(&bgr) {
            Ok(frame) => {
                self.frames_read += 1;
                Some(frame)
            }
            Err(err) => {
                log::warn!("{}: {err}; ending stream", self.label);
                None
            }
        }
    }

    fn describe(&self) -> String {
        format!("capture {}", self.label)
    }
}

fn frame_from_bgr_mat(bgr: &Mat) -> Result<RgbFrame, String> {
    if bgr.typ() != CV_8UC3 {
        return Err(format!("unsupported frame type {}", bgr.typ()));
    }
    let owned;
    let mat = if bgr.is_continuous() {
        bgr
    } else {
        owned = bgr.try_clone().map_err(|e| e.to_string())?;
        &owned
    };
    let (w, h) = (mat.cols() as usize, mat.rows() as usize);
    let bytes = mat.data_bytes().map_err(|e| e.to_string())?;
    let rgb: Vec<u8> = bytes
        .chunks_exact(3)
        .flat_map(|px| [px[2], px[1], px[0]])
        .collect();
    RgbFrame::from_interleaved(w, h, &rgb).ok_or_else(|| format!("unexpected {w}x{h} frame layout"))
}

fn bgr_mat_from_frame(frame: &RgbFrame) -> Result<Mat, String> {
    let (w, h) = (frame.width(), frame.height());
    let mut mat = Mat::new_rows_cols_with_default(h as i32, w as i32, CV_8UC3, Scalar::all(0.0))
        .map_err(|e| e.to_string())?;
    let dst = mat.data_bytes_mut().map_err(|e| e.to_string())?;
    for (out, px) in dst.chunks_exact_mut(3).zip(frame.rows().flatten()) {
        out.copy_from_slice(&[px[2], px[1], px[0]]);
    }
    Ok(mat)
}

/// Video file written through `VideoWriter`.
///
/// The writer is opened on the first frame, whose size fixes the size of
/// the whole video.
pub struct VideoFileSink {
    path: PathBuf,
    fps: f64,
    writer: Option<(VideoWriter, (usize, usize))>,
    written: usize,
}

impl VideoFileSink {
    pub fn create(path: &Path, fps: f64) -> Result<Self, String> {
        crate::image::io::ensure_parent_dir(path)?;
        path_str(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            fps: if fps > 0.0 { fps } else { super::DEFAULT_FPS },
            writer: None,
            written: 0,
        })
    }

    fn fourcc(&self) -> Result<i32, String> {
        let is_mp4 = self
            .path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("mp4"));
        let code = if is_mp4 {
            VideoWriter::fourcc('m', 'p', '4', 'v')
        } else {
            VideoWriter::fourcc('M', 'J', 'P', 'G')
        };
        code.map_err(|e| e.to_string())
    }

    fn open(&self, size: (usize, usize)) -> Result<VideoWriter, String> {
        let writer = VideoWriter::new(
            path_str(&self.path)?,
            self.fourcc()?,
            self.fps,
            Size::new(size.0 as i32, size.1 as i32),
            true,
        )
        .map_err(|e| format!("Failed to create {}: {e}", self.path.display()))?;
        let is_open = writer
            .is_opened()
            .map_err(|e| format!("Failed to create {}: {e}", self.path.display()))?;
        if !is_open {
            return Err(format!("Failed to create {}: writer did not open", self.path.display()));
        }
        log::info!(
            "Output video {}: {}x{} @ {:.1} fps",
            self.path.display(),
            size.0,
            size.1,
            self.fps
        );
        Ok(writer)
    }
}

impl FrameSink for VideoFileSink {
    fn write_frame(&mut self, frame: &RgbFrame) -> Result<(), String> {
        let size = (frame.width(), frame.height());
        if self.writer.is_none() {
            self.writer = Some((self.open(size)?, size));
        }
        let Some((writer, expected)) = self.writer.as_mut() else {
            return Err(format!("Failed to write to {}", self.path.display()));
        };
        if *expected != size {
            return Err(format!(
                "Frame {}x{} does not match video size {}x{} of {}",
                size.0,
                size.1,
                expected.0,
                expected.1,
                self.path.display()
            ));
        }
        let mat = bgr_mat_from_frame(frame)?;
        writer
            .write(&mat)
            .map_err(|e| format!("Failed to write frame to {}: {e}", self.path.display()))?;
        self.written += 1;
        Ok(())
    }

    fn finish(self: Box<Self>) -> Result<(), String> {
        let VideoFileSink {
            path,
            writer,
            written,
            ..
        } = *self;
        if let Some((mut writer, _)) = writer {
            writer
                .release()
                .map_err(|e| format!("Failed to close {}: {e}", path.display()))?;
        }
        log::info!("Wrote {written} frames to {}", path.display());
        Ok(())
    }
}
