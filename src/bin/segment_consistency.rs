use lane_detector::config::consistency;
use lane_detector::edges::{canny, orientation_field};
use lane_detector::image::io::{load_rgb_image, save_rgb_png, write_json_file};
use lane_detector::imgproc::draw_line;
use lane_detector::lanes::{find_segments, remove_inconsistent_orientations, LineSegment};
use serde::Serialize;
use std::env;
use std::path::Path;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ConsistencyReport {
    percentage: f64,
    delta_deg: f64,
    detected: usize,
    zeroed: usize,
    segments: Vec<LineSegment>,
}

fn main() {
    env_logger::init();
    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let config_path = env::args().nth(1).ok_or_else(usage)?;
    let config = consistency::load_config(Path::new(&config_path))?;

    let frame = load_rgb_image(&config.input)?;
    let gray = frame.to_gray();
    let edges = canny(&gray, &config.edges);
    let mut segments = find_segments(&edges, &config.detector);
    let detected = segments.len();

    let orientations = orientation_field(&gray);
    let zeroed = remove_inconsistent_orientations(
        &orientations,
        &mut segments,
        config.filter.percentage,
        config.filter.delta_deg.to_radians(),
    );

    if let Some(path) = &config.output.overlay_image {
        let mut overlay = frame.clone();
        for s in segments.iter().filter(|s| !s.is_degenerate()) {
            draw_line(&mut overlay, s.start(), s.end(), image::Rgb([255, 0, 0]), 2);
        }
        save_rgb_png(&overlay, path)?;
        println!("Saved overlay to {}", path.display());
    }

    let report = ConsistencyReport {
        percentage: config.filter.percentage,
        delta_deg: config.filter.delta_deg,
        detected,
        zeroed,
        segments,
    };
    write_json_file(&config.output.segments_json, &report)?;
    println!(
        "Kept {} of {} segments; saved to {}",
        detected - zeroed,
        detected,
        config.output.segments_json.display()
    );
    Ok(())
}

fn usage() -> String {
    "Usage: segment_consistency <config.json>".to_string()
}
