use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

use thiserror::Error;

use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::landmarks::domain::landmark_extractor::LandmarkExtractor;
use crate::landmarks::domain::landmark_set::LandmarkSet;
use crate::pipeline::swap_config::{ConfigError, SwapConfig};
use crate::pipeline::swap_logger::SwapLogger;
use crate::pipeline::swap_status::{ImageSlot, SwapStage, SwapStatus};
use crate::resizing::domain::image_resizer::{resize_to_fit, ImageResizer, ResizeError};
use crate::resizing::domain::resize_policy::needs_resize;
use crate::shared::raster::Raster;
use crate::swapping::domain::swap_engine::{SwapEngine, SwapEngineError};

#[derive(Debug, Error)]
pub enum SwapError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("{slot} image: {source}")]
    UnexpectedDetectorOutput {
        slot: ImageSlot,
        #[source]
        source: DetectionError,
    },

    #[error("resize failed: {0}")]
    Resize(#[from] ResizeError),

    #[error("swap engine failed: {0}")]
    Engine(#[source] SwapEngineError),
}

/// Both inputs after size normalization, with their landmarks.
#[derive(Clone, Debug, PartialEq)]
pub struct PreparedPair {
    pub image_a: Raster,
    pub image_b: Raster,
    pub landmarks_a: LandmarkSet,
    pub landmarks_b: LandmarkSet,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Preparation {
    Ready(PreparedPair),
    TooSmallInput,
    FaceMissing,
}

impl Preparation {
    /// `Success` for a ready pair, otherwise the rejecting status.
    pub fn status(&self) -> SwapStatus {
        match self {
            Preparation::Ready(_) => SwapStatus::Success,
            Preparation::TooSmallInput => SwapStatus::TooSmallInput,
            Preparation::FaceMissing => SwapStatus::FaceMissing,
        }
    }
}

#[derive(Clone, Debug)]
struct SwapResults {
    first: Raster,
    second: Raster,
}

/// Two-photo face swap: validate → resize → detect landmarks → check →
/// swap both ways.
///
/// Extraction runs strictly one image after the other. Landmarks are
/// returned from each extraction rather than stored in shared state, so
/// the first image's set can never land in the second's slot.
pub struct SwapFacesUseCase {
    detector: Box<dyn FaceDetector>,
    engine: Box<dyn SwapEngine>,
    resizer: Box<dyn ImageResizer>,
    logger: Box<dyn SwapLogger>,
    extractor: LandmarkExtractor,
    config: SwapConfig,
    results: Option<SwapResults>,
}

impl SwapFacesUseCase {
    pub fn new(
        detector: Box<dyn FaceDetector>,
        engine: Box<dyn SwapEngine>,
        resizer: Box<dyn ImageResizer>,
        logger: Box<dyn SwapLogger>,
        config: SwapConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut use_case = Self {
            detector,
            engine,
            resizer,
            logger,
            extractor: LandmarkExtractor::new(config.extraction),
            config,
            results: None,
        };
        use_case.enter(SwapStage::Idle);
        Ok(use_case)
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    /// Swaps the faces of `image_a` and `image_b`.
    ///
    /// On `Success` the results are available through
    /// [`result_image_1`](Self::result_image_1) (A's face on B) and
    /// [`result_image_2`](Self::result_image_2) (B's face on A).
    pub fn swap_faces(
        &mut self,
        image_a: Raster,
        image_b: Raster,
    ) -> Result<SwapStatus, SwapError> {
        let outcome = self.run_swap(image_a, image_b);
        match &outcome {
            Ok(status) => self.finish(*status),
            Err(e) => self.fail(e),
        }
        self.logger.summary();
        outcome
    }

    /// Runs everything up to the swap and hands back the normalized pair,
    /// for callers that drive the swap engine themselves.
    ///
    /// A ready pair ends in [`SwapStage::Prepared`]; no swap is reported.
    pub fn prepare(
        &mut self,
        image_a: Raster,
        image_b: Raster,
    ) -> Result<Preparation, SwapError> {
        let outcome = self.run_preparation(image_a, image_b);
        match &outcome {
            Ok(Preparation::Ready(_)) => {
                self.enter(SwapStage::Prepared);
                log::info!("Face swap inputs prepared");
            }
            Ok(rejected) => self.finish(rejected.status()),
            Err(e) => self.fail(e),
        }
        self.logger.summary();
        outcome
    }

    /// A's face composited onto B. `None` unless the last swap succeeded.
    pub fn result_image_1(&self) -> Option<&Raster> {
        self.results.as_ref().map(|r| &r.first)
    }

    /// B's face composited onto A. `None` unless the last swap succeeded.
    pub fn result_image_2(&self) -> Option<&Raster> {
        self.results.as_ref().map(|r| &r.second)
    }

    /// Moves both results out, leaving the use case empty.
    pub fn take_results(&mut self) -> Option<(Raster, Raster)> {
        self.results.take().map(|r| (r.first, r.second))
    }

    fn run_swap(&mut self, image_a: Raster, image_b: Raster) -> Result<SwapStatus, SwapError> {
        let pair = match self.run_preparation(image_a, image_b)? {
            Preparation::Ready(pair) => pair,
            rejected => return Ok(rejected.status()),
        };

        self.enter(SwapStage::Swapping);
        let start = Instant::now();
        let (first, second) = self.run_swaps(&pair)?;
        self.logger.timing("swap", elapsed_ms(start));

        self.results = Some(SwapResults { first, second });
        Ok(SwapStatus::Success)
    }

    fn run_preparation(
        &mut self,
        image_a: Raster,
        image_b: Raster,
    ) -> Result<Preparation, SwapError> {
        self.results = None;

        self.enter(SwapStage::Validating);
        let min = self.config.min_size;
        if image_a.is_smaller_than(min) || image_b.is_smaller_than(min) {
            self.logger.info(&format!(
                "Input too small: {}x{} and {}x{} (minimum {min})",
                image_a.width(),
                image_a.height(),
                image_b.width(),
                image_b.height()
            ));
            return Ok(Preparation::TooSmallInput);
        }

        self.enter(SwapStage::Resizing);
        let image_a = self.normalize(image_a)?;
        let image_b = self.normalize(image_b)?;

        let landmarks_a = self.extract(ImageSlot::First, &image_a)?;
        let landmarks_b = self.extract(ImageSlot::Second, &image_b)?;

        self.enter(SwapStage::CheckingSufficiency);
        let needed = self.config.min_landmark_values;
        if !landmarks_a.is_sufficient(needed) || !landmarks_b.is_sufficient(needed) {
            self.logger.info(&format!(
                "Not enough landmarks: {} and {} values (need {needed})",
                landmarks_a.len(),
                landmarks_b.len()
            ));
            return Ok(Preparation::FaceMissing);
        }

        Ok(Preparation::Ready(PreparedPair {
            image_a,
            image_b,
            landmarks_a,
            landmarks_b,
        }))
    }

    fn normalize(&mut self, image: Raster) -> Result<Raster, ResizeError> {
        if !needs_resize(image.width(), image.height(), self.config.max_size) {
            return Ok(image);
        }
        let start = Instant::now();
        let resized = resize_to_fit(
            self.resizer.as_ref(),
            &image,
            self.config.max_size,
            self.config.resize_policy,
        )?;
        self.logger.timing("resize", elapsed_ms(start));
        Ok(resized)
    }

    fn extract(&mut self, slot: ImageSlot, image: &Raster) -> Result<LandmarkSet, SwapError> {
        self.enter(SwapStage::Extracting(slot));
        let start = Instant::now();
        let landmarks = self
            .extractor
            .extract(self.detector.as_mut(), image)
            .map_err(|source| SwapError::UnexpectedDetectorOutput { slot, source })?;
        self.logger.timing("extract", elapsed_ms(start));
        self.logger
            .metric(&format!("landmarks_{slot}"), landmarks.len() as f64);
        Ok(landmarks)
    }

    /// A→B and B→A. The directions are independent; with
    /// `parallel_swaps` the second runs on a scoped thread. A panicking
    /// engine becomes `SwapError::Engine` whichever direction it hits.
    fn run_swaps(&self, pair: &PreparedPair) -> Result<(Raster, Raster), SwapError> {
        let engine = self.engine.as_ref();
        let forward = || {
            engine.swap(
                &pair.image_a,
                &pair.image_b,
                &pair.landmarks_a,
                &pair.landmarks_b,
            )
        };
        let backward = || {
            engine.swap(
                &pair.image_b,
                &pair.image_a,
                &pair.landmarks_b,
                &pair.landmarks_a,
            )
        };

        let (first, second) = if self.config.parallel_swaps {
            std::thread::scope(|s| {
                let handle = s.spawn(move || guarded(backward));
                let first = guarded(forward);
                let second = handle
                    .join()
                    .unwrap_or_else(|_| Err("swap engine panicked".into()));
                (first, second)
            })
        } else {
            (guarded(forward), guarded(backward))
        };

        Ok((
            first.map_err(SwapError::Engine)?,
            second.map_err(SwapError::Engine)?,
        ))
    }

    fn enter(&mut self, stage: SwapStage) {
        self.logger.stage(stage);
    }

    fn finish(&mut self, status: SwapStatus) {
        self.enter(SwapStage::Done(status));
        log::info!("Face swap finished: {status}");
    }

    fn fail(&mut self, error: &SwapError) {
        self.enter(SwapStage::Failed);
        log::warn!("Face swap failed: {error}");
    }
}

fn guarded<F>(swap: F) -> Result<Raster, SwapEngineError>
where
    F: FnOnce() -> Result<Raster, SwapEngineError>,
{
    panic::catch_unwind(AssertUnwindSafe(swap))
        .unwrap_or_else(|_| Err("swap engine panicked".into()))
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}
