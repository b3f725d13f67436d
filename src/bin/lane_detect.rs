use lane_detector::config::lane_detect::{self, LaneToolConfig};
use lane_detector::diagnostics::RunReport;
use lane_detector::image::io::write_json_file;
use lane_detector::pipeline::LanePipeline;
use lane_detector::video::{create_sink, open_source, write_stage_images, FrameSink};
use std::env;
use std::path::{Path, PathBuf};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = lane_detect::load_config(Path::new(&config_path))?;

    let mut source = open_source(&config.input)?;
    let mut sink: Option<Box<dyn FrameSink>> = match &config.output.video {
        Some(path) => Some(create_sink(path, config.fps)?),
        None => None,
    };
    let steps_dir = steps_dir(&config);

    let pipeline = LanePipeline::new(config.lanes.clone());
    let mut state = pipeline.initial_state();
    let mut run_report = RunReport::new(config.input.clone());

    let mut frame_index = 0usize;
    while let Some(frame) = source.next_frame() {
        if config.max_frames.is_some_and(|max| frame_index >= max) {
            break;
        }
        if frame.is_empty() {
            log::info!("Empty frame {frame_index}; end of stream");
            break;
        }

        let mut output = pipeline.process(&frame, state, steps_dir.is_some());
        state = output.state;
        output.report.frame_index = frame_index;
        log::info!("{}", output.report.summary());

        if let (Some(dir), Some(stages)) = (&steps_dir, &output.stages) {
            write_stage_images(dir, frame_index, stages)?;
        }
        if let Some(sink) = sink.as_mut() {
            sink.write_frame(&output.annotated)?;
        }
        run_report.record(output.report);
        frame_index += 1;
    }

    if let Some(sink) = sink {
        sink.finish()?;
    }
    if let Some(path) = &config.output.report_json {
        write_json_file(path, &run_report)?;
        println!("Saved report to {}", path.display());
    }
    println!(
        "Processed {} frames from {} ({} with a lane center), {:.1} ms total",
        run_report.frames_processed, run_report.input, run_report.frames_with_center, run_report.total_ms
    );
    Ok(())
}

fn steps_dir(config: &LaneToolConfig) -> Option<PathBuf> {
    if !config.show_steps {
        return None;
    }
    Some(
        config
            .output
            .steps_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("steps")),
    )
}

fn usage() -> String {
    "Usage: lane_detect <config.json>".to_string()
}
