use std::sync::Arc;

use crate::detection::domain::async_face_detector::{AsyncFaceDetector, DetectionResult};
use crate::detection::domain::face_detector::{DetectionError, FaceDetector};
use crate::detection::domain::face_observation::FaceObservation;
use crate::shared::raster::Raster;

/// Adapts a callback-based detector to the synchronous [`FaceDetector`].
///
/// Each call issues one request and parks the calling thread on a
/// one-slot channel until the callback fires, so requests never overlap.
/// There is no timeout: a detector that never answers (and never drops
/// the callback) blocks forever.
pub struct BlockingFaceDetector<D: AsyncFaceDetector> {
    inner: D,
}

impl<D: AsyncFaceDetector> BlockingFaceDetector<D> {
    pub fn new(inner: D) -> Self {
        Self { inner }
    }
}

impl<D: AsyncFaceDetector> FaceDetector for BlockingFaceDetector<D> {
    fn detect(&mut self, image: &Raster) -> Result<Vec<FaceObservation>, DetectionError> {
        let (tx, rx) = crossbeam_channel::bounded::<DetectionResult>(1);
        self.inner.detect_async(
            Arc::new(image.clone()),
            Box::new(move |result| {
                // Receiver only goes away if the caller already gave up.
                let _ = tx.send(result);
            }),
        );
        rx.recv().map_err(|_| {
            DetectionError::Failed("detector dropped its completion callback".to_string())
        })?
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::domain::async_face_detector::DetectionCallback;
    use crate::detection::domain::face_observation::BoundingBox;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    fn observation(x: f64) -> FaceObservation {
        FaceObservation::new(BoundingBox::new(x, 0.1, 0.5, 0.5))
    }

    /// Answers from a background thread after a short delay.
    struct ThreadedDetector {
        calls: Arc<AtomicUsize>,
    }

    impl AsyncFaceDetector for ThreadedDetector {
        fn detect_async(&self, image: Arc<Raster>, on_complete: DetectionCallback) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            std::thread::spawn(move || {
                std::thread::sleep(Duration::from_millis(20));
                let x = image.width() as f64 / 1000.0;
                on_complete(Ok(vec![observation(x)]));
            });
        }
    }

    /// Answers before `detect_async` returns.
    struct InlineDetector {
        result: DetectionResult,
    }

    impl AsyncFaceDetector for InlineDetector {
        fn detect_async(&self, _image: Arc<Raster>, on_complete: DetectionCallback) {
            on_complete(self.result.clone());
        }
    }

    struct ForgetfulDetector;

    impl AsyncFaceDetector for ForgetfulDetector {
        fn detect_async(&self, _image: Arc<Raster>, on_complete: DetectionCallback) {
            drop(on_complete);
        }
    }

    #[test]
    fn test_waits_for_background_callback() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut detector = BlockingFaceDetector::new(ThreadedDetector {
            calls: calls.clone(),
        });

        let result = detector.detect(&Raster::filled(300, 300, [0, 0, 0])).unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(result, vec![observation(0.3)]);
    }

    #[test]
    fn test_sequential_calls_keep_results_apart() {
        let mut detector = BlockingFaceDetector::new(ThreadedDetector {
            calls: Arc::new(AtomicUsize::new(0)),
        });

        let first = detector.detect(&Raster::filled(300, 300, [0, 0, 0])).unwrap();
        let second = detector.detect(&Raster::filled(400, 300, [0, 0, 0])).unwrap();

        assert_eq!(first, vec![observation(0.3)]);
        assert_eq!(second, vec![observation(0.4)]);
    }

    #[test]
    fn test_inline_callback_does_not_deadlock() {
        let mut detector = BlockingFaceDetector::new(InlineDetector {
            result: Ok(vec![observation(0.2), observation(0.6)]),
        });
        let result = detector.detect(&Raster::filled(10, 10, [0, 0, 0])).unwrap();
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_errors_pass_through() {
        let mut detector = BlockingFaceDetector::new(InlineDetector {
            result: Err(DetectionError::Failed("no GPU".to_string())),
        });
        let err = detector.detect(&Raster::filled(10, 10, [0, 0, 0])).unwrap_err();
        assert_eq!(err, DetectionError::Failed("no GPU".to_string()));
    }

    #[test]
    fn test_dropped_callback_is_a_failure() {
        let mut detector = BlockingFaceDetector::new(ForgetfulDetector);
        let err = detector.detect(&Raster::filled(10, 10, [0, 0, 0])).unwrap_err();
        assert!(matches!(err, DetectionError::Failed(_)));
    }
}
