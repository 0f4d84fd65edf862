use std::collections::HashMap;
use std::time::Instant;

/// Cross-cutting logger for collection and filtering runs.
///
/// Keeps use cases free of output concerns: the CLI logs through the `log`
/// crate, tests discard everything.
pub trait RunLogger: Send {
    /// Report item-level progress within a category.
    fn progress(&mut self, category: &str, current: usize, total: usize);

    /// Record how long one named stage (search, download, detect) took.
    fn timing(&mut self, stage: &str, duration_ms: f64);

    /// Log a human-readable status message.
    fn info(&mut self, message: &str);

    /// Emit an end-of-run summary. Default: no-op.
    fn summary(&self) {}
}

/// Logger that discards all events.
pub struct NullRunLogger;

impl RunLogger for NullRunLogger {
    fn progress(&mut self, _category: &str, _current: usize, _total: usize) {}
    fn timing(&mut self, _stage: &str, _duration_ms: f64) {}
    fn info(&mut self, _message: &str) {}
}

/// Logger backed by the `log` crate.
///
/// Progress lines are throttled to every `throttle_items` items so a
/// 4000-image category does not flood the terminal.
pub struct LogRunLogger {
    throttle_items: usize,
    timings: HashMap<String, Vec<f64>>,
    start_time: Instant,
    items: usize,
}

impl LogRunLogger {
    pub fn new(throttle_items: usize) -> Self {
        Self {
            throttle_items: throttle_items.max(1),
            timings: HashMap::new(),
            start_time: Instant::now(),
            items: 0,
        }
    }

    /// Returns the formatted summary, or `None` if no timings were recorded.
    pub fn summary_string(&self) -> Option<String> {
        if self.timings.is_empty() {
            return None;
        }

        let elapsed_s = self.start_time.elapsed().as_secs_f64();
        let mut lines = vec![format!(
            "Run summary ({} items, {elapsed_s:.1}s total):",
            self.items
        )];

        let mut stages: Vec<_> = self.timings.keys().collect();
        stages.sort();
        for stage in stages {
            let durations = &self.timings[stage];
            let total_ms: f64 = durations.iter().sum();
            let avg_ms = total_ms / durations.len() as f64;
            lines.push(format!(
                "  {stage:10}: {count:6} calls  avg {avg_ms:7.1}ms  total {total_s:7.1}s",
                count = durations.len(),
                total_s = total_ms / 1000.0,
            ));
        }

        Some(lines.join("\n"))
    }

    pub fn timings_for(&self, stage: &str) -> Option<&[f64]> {
        self.timings.get(stage).map(|v| v.as_slice())
    }
}

impl Default for LogRunLogger {
    fn default() -> Self {
        Self::new(50)
    }
}

impl RunLogger for LogRunLogger {
    fn progress(&mut self, category: &str, current: usize, total: usize) {
        self.items += 1;
        if current % self.throttle_items == 0 || current == total {
            log::info!("[{category}] progress: {current}/{total} images");
        }
    }

    fn timing(&mut self, stage: &str, duration_ms: f64) {
        self.timings
            .entry(stage.to_string())
            .or_default()
            .push(duration_ms);
    }

    fn info(&mut self, message: &str) {
        log::info!("{message}");
    }

    fn summary(&self) {
        if let Some(text) = self.summary_string() {
            log::info!("\n\n{text}");
        }
    }
}
