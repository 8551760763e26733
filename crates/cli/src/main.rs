use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, ValueEnum};

use faceswap_core::detection::infrastructure::json_face_detector::JsonFaceDetector;
use faceswap_core::imaging::domain::image_reader::ImageReader;
use faceswap_core::imaging::domain::image_writer::ImageWriter;
use faceswap_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use faceswap_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use faceswap_core::landmarks::domain::landmark_extractor::ExtractionConfig;
use faceswap_core::landmarks::domain::landmark_set::LandmarkSet;
use faceswap_core::pipeline::handoff_manifest::HandoffManifest;
use faceswap_core::pipeline::swap_config::SwapConfig;
use faceswap_core::pipeline::swap_faces_use_case::{Preparation, SwapFacesUseCase};
use faceswap_core::pipeline::swap_logger::StdoutSwapLogger;
use faceswap_core::pipeline::swap_status::SwapStatus;
use faceswap_core::resizing::domain::resize_policy::ResizePolicy;
use faceswap_core::resizing::infrastructure::triangle_resizer::TriangleResizer;
use faceswap_core::shared::constants::{
    CONTOUR_STRIDE, EYEBROW_COMPRESSION, IMAGE_EXTENSIONS, MAX_INPUT_SIZE, MIN_INPUT_SIZE,
    MIN_LANDMARK_VALUES,
};
use faceswap_core::shared::raster::Raster;
use faceswap_core::swapping::domain::swap_engine::{SwapEngine, SwapEngineError};

const EXIT_REJECTED: i32 = 2;

/// Prepares two portraits for a face swap.
///
/// Checks sizes, downscales oversized photos, turns recorded landmark
/// detections into pixel landmark sets and writes the normalized images
/// plus a manifest for the swap engine.
#[derive(Parser)]
#[command(name = "faceswap")]
struct Cli {
    /// First portrait.
    image_a: PathBuf,

    /// Second portrait.
    image_b: PathBuf,

    /// Landmark detections for the first portrait (JSON).
    #[arg(long)]
    faces_a: PathBuf,

    /// Landmark detections for the second portrait (JSON).
    #[arg(long)]
    faces_b: PathBuf,

    /// Directory for the normalized images and manifest.json.
    #[arg(long)]
    output_dir: PathBuf,

    /// Reject photos with a side shorter than this.
    #[arg(long, default_value_t = MIN_INPUT_SIZE)]
    min_size: u32,

    /// Downscale photos with a side longer than this.
    #[arg(long, default_value_t = MAX_INPUT_SIZE)]
    max_size: u32,

    /// How oversized photos are scaled down.
    #[arg(long, value_enum, default_value = "width")]
    resize_policy: ResizePolicyArg,

    /// Multiplier for eyebrow y-coordinates (0.0-1.0].
    #[arg(long, default_value_t = EYEBROW_COMPRESSION)]
    eyebrow_compression: f64,

    /// Keep every Nth face-contour point.
    #[arg(long, default_value_t = CONTOUR_STRIDE)]
    contour_stride: usize,
}

#[derive(Clone, Copy, ValueEnum)]
enum ResizePolicyArg {
    /// Pin the width to the maximum.
    Width,
    /// Pin the longer side to the maximum.
    Longest,
}

impl From<ResizePolicyArg> for ResizePolicy {
    fn from(arg: ResizePolicyArg) -> Self {
        match arg {
            ResizePolicyArg::Width => ResizePolicy::WidthBound,
            ResizePolicyArg::Longest => ResizePolicy::LongestSide,
        }
    }
}

/// Preparation never reaches the engine; swapping happens downstream
/// from the manifest.
struct HandoffOnlyEngine;

impl SwapEngine for HandoffOnlyEngine {
    fn swap(
        &self,
        _source: &Raster,
        _target: &Raster,
        _source_landmarks: &LandmarkSet,
        _target_landmarks: &LandmarkSet,
    ) -> Result<Raster, SwapEngineError> {
        Err("no swap engine configured; use the written manifest".into())
    }
}

fn main() {
    env_logger::init();

    match run() {
        Ok(SwapStatus::Success) => {}
        Ok(status) => {
            eprintln!("Cannot swap: {status}");
            process::exit(EXIT_REJECTED);
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run() -> Result<SwapStatus, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let reader = ImageFileReader::new();
    let image_a = reader.read(&cli.image_a)?;
    let image_b = reader.read(&cli.image_b)?;

    let detector = JsonFaceDetector::replaying(vec![cli.faces_a.clone(), cli.faces_b.clone()]);
    let mut use_case = SwapFacesUseCase::new(
        Box::new(detector),
        Box::new(HandoffOnlyEngine),
        Box::new(TriangleResizer::new()),
        Box::new(StdoutSwapLogger::new()),
        build_config(&cli),
    )?;

    match use_case.prepare(image_a, image_b)? {
        Preparation::Ready(pair) => {
            let writer = ImageFileWriter::new();
            let path_a = cli.output_dir.join("a.png");
            let path_b = cli.output_dir.join("b.png");
            writer.write(&path_a, &pair.image_a)?;
            writer.write(&path_b, &pair.image_b)?;

            let manifest_path = cli.output_dir.join("manifest.json");
            HandoffManifest::new(&pair, &path_a, &path_b).write(&manifest_path)?;
            log::info!(
                "Prepared {} + {} landmark points, manifest at {}",
                pair.landmarks_a.pair_count(),
                pair.landmarks_b.pair_count(),
                manifest_path.display()
            );
            Ok(SwapStatus::Success)
        }
        rejected => Ok(rejected.status()),
    }
}

fn build_config(cli: &Cli) -> SwapConfig {
    SwapConfig {
        min_size: cli.min_size,
        max_size: cli.max_size,
        min_landmark_values: MIN_LANDMARK_VALUES,
        resize_policy: cli.resize_policy.into(),
        extraction: ExtractionConfig {
            eyebrow_compression: cli.eyebrow_compression,
            contour_stride: cli.contour_stride,
        },
        parallel_swaps: false,
    }
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    for input in [&cli.image_a, &cli.image_b, &cli.faces_a, &cli.faces_b] {
        if !input.exists() {
            return Err(format!("Input file not found: {}", input.display()).into());
        }
    }
    for image in [&cli.image_a, &cli.image_b] {
        if !is_image(image) {
            return Err(format!(
                "Unsupported image extension: {} (expected one of {})",
                image.display(),
                IMAGE_EXTENSIONS.join(", ")
            )
            .into());
        }
    }
    build_config(cli).validate()?;
    Ok(())
}

fn is_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}
