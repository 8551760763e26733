use std::collections::HashMap;
use std::time::Instant;

use crate::pipeline::swap_status::SwapStage;

/// Observer for swap orchestration events.
///
/// Keeps the use case free of any particular output mechanism; the CLI
/// logs through the `log` crate, tests record or discard.
pub trait SwapLogger: Send {
    /// Called on every state-machine transition.
    fn stage(&mut self, stage: SwapStage);

    /// Record how long a named step took.
    fn timing(&mut self, step: &str, duration_ms: f64);

    /// Record a point-in-time metric (e.g. landmark count).
    fn metric(&mut self, name: &str, value: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Discards all events.
pub struct NullSwapLogger;

impl SwapLogger for NullSwapLogger {
    fn stage(&mut self, _stage: SwapStage) {}
    fn timing(&mut self, _step: &str, _duration_ms: f64) {}
    fn metric(&mut self, _name: &str, _value: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logs transitions through `log` and keeps per-step timings and
/// metrics for a summary report when the run finishes.
pub struct StdoutSwapLogger {
    stages: Vec<SwapStage>,
    timings: HashMap<String, Vec<f64>>,
    metrics: HashMap<String, f64>,
    start_time: Instant,
    messages: Vec<String>,
}

impl StdoutSwapLogger {
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            timings: HashMap::new(),
            metrics: HashMap::new(),
            start_time: Instant::now(),
            messages: Vec::new(),
        }
    }

    /// Returns the formatted summary string, or `None` if nothing ran.
    pub fn summary_string(&self) -> Option<String> {
        let last = self.stages.last()?;
        let elapsed_ms = self.start_time.elapsed().as_secs_f64() * 1000.0;
        let mut lines = vec![format!(
            "Swap summary ({last}, {:.1}s total):",
            elapsed_ms / 1000.0
        )];

        let mut steps: Vec<_> = self.timings.keys().collect();
        steps.sort();
        for step in steps {
            let durations = &self.timings[step];
            let total_ms: f64 = durations.iter().sum();
            lines.push(format!(
                "  {step:12}: {total_ms:7.1}ms over {} call(s)",
                durations.len()
            ));
        }

        let mut names: Vec<_> = self.metrics.keys().collect();
        names.sort();
        for name in names {
            lines.push(format!("  {name}: {}", self.metrics[name]));
        }

        Some(lines.join("\n"))
    }

    pub fn stages(&self) -> &[SwapStage] {
        &self.stages
    }

    pub fn timings_for(&self, step: &str) -> Option<&[f64]> {
        self.timings.get(step).map(|v| v.as_slice())
    }

    pub fn metric_value(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).copied()
    }
}

impl Default for StdoutSwapLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SwapLogger for StdoutSwapLogger {
    fn stage(&mut self, stage: SwapStage) {
        log::debug!("Swap stage: {stage}");
        self.stages.push(stage);
    }

    fn timing(&mut self, step: &str, duration_ms: f64) {
        self.timings
            .entry(step.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn metric(&mut self, name: &str, value: f64) {
        self.metrics.insert(name.to_string(), value);
    }

    fn info(&mut self, message: &str) {
        self.messages.push(message.to_string());
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::swap_status::{ImageSlot, SwapStatus};

    #[test]
    fn test_null_logger_all_methods_are_noop() {
        let mut logger = NullSwapLogger;
        logger.stage(SwapStage::Validating);
        logger.timing("extract", 5.0);
        logger.metric("landmarks_first", 10.0);
        logger.info("hello");
        logger.summary();
    }

    #[test]
    fn test_stages_recorded_in_order() {
        let mut logger = StdoutSwapLogger::new();
        logger.stage(SwapStage::Validating);
        logger.stage(SwapStage::Extracting(ImageSlot::First));
        logger.stage(SwapStage::Done(SwapStatus::FaceMissing));
        assert_eq!(
            logger.stages(),
            &[
                SwapStage::Validating,
                SwapStage::Extracting(ImageSlot::First),
                SwapStage::Done(SwapStatus::FaceMissing),
            ]
        );
    }

    #[test]
    fn test_timing_records_values() {
        let mut logger = StdoutSwapLogger::new();
        logger.timing("extract", 20.0);
        logger.timing("extract", 30.0);
        logger.timing("swap", 5.0);

        let extract = logger.timings_for("extract").unwrap();
        assert_eq!(extract.len(), 2);
        assert!((extract[1] - 30.0).abs() < f64::EPSILON);
        assert_eq!(logger.timings_for("swap").unwrap().len(), 1);
        assert!(logger.timings_for("resize").is_none());
    }

    #[test]
    fn test_metric_keeps_latest_value() {
        let mut logger = StdoutSwapLogger::new();
        logger.metric("landmarks_first", 8.0);
        logger.metric("landmarks_first", 12.0);
        assert_eq!(logger.metric_value("landmarks_first"), Some(12.0));
    }

    #[test]
    fn test_summary_includes_final_stage_timing_and_metrics() {
        let mut logger = StdoutSwapLogger::new();
        logger.stage(SwapStage::Swapping);
        logger.stage(SwapStage::Done(SwapStatus::Success));
        logger.timing("swap", 12.0);
        logger.metric("landmarks_second", 24.0);

        let summary = logger.summary_string().unwrap();
        assert!(summary.contains("Swap summary (done: success"));
        assert!(summary.contains("swap"));
        assert!(summary.contains("landmarks_second: 24"));
    }

    #[test]
    fn test_empty_summary_returns_none() {
        assert!(StdoutSwapLogger::new().summary_string().is_none());
    }

    #[test]
    fn test_info_stores_messages() {
        let mut logger = StdoutSwapLogger::new();
        logger.info("hello world");
        assert_eq!(logger.messages, vec!["hello world".to_string()]);
    }
}
