//! Frame acquisition and output.
//!
//! Sources are opened from a path (video file, directory, GIF or still
//! image) with a device-index fallback; sinks write video files, animated
//! GIFs or PNG sequences. Video files and devices go through OpenCV and are
//! only available with the `opencv` feature.

#[cfg(feature = "opencv")]
pub mod capture;
pub mod sink;
pub mod source;

pub use sink::{create_sink, write_stage_images, FrameSink, GifSink, PngSequenceSink, DEFAULT_FPS};
pub use source::{open_source, FrameSource, GifSource, ImageSequenceSource, SingleImageSource};

#[cfg(feature = "opencv")]
pub use capture::{CaptureSource, VideoFileSink};
